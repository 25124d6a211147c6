//! Error types shared by the whole crate.
//!
//! Parse problems are collected as [`ParseError`] values rather than aborting
//! the lexer, so a caller sees every problem in a script at once. A run fails
//! with [`ScrubError::Parse`] when any were found.

use codespan_reporting::diagnostic::{Diagnostic, Label};
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::lexer::{Position, Span};

/// Top-level error of a scrub run
#[derive(Error, Debug)]
pub enum ScrubError {
    /// The source script could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The destination could not be written
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The tokenizer reported errors; nothing was written
    #[error("errors when parsing T-SQL ({} found)", errors.len())]
    Parse { errors: Vec<ParseError> },
}

impl ScrubError {
    /// Parse errors carried by this error, if any.
    pub fn parse_errors(&self) -> &[ParseError] {
        match self {
            ScrubError::Parse { errors } => errors,
            _ => &[],
        }
    }
}

/// What went wrong at a particular location
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    #[error("unrecognized character '{0}'")]
    UnrecognizedCharacter(String),

    #[error("unclosed quotation mark in string literal")]
    UnterminatedString,

    #[error("unclosed quoted identifier")]
    UnterminatedQuotedIdentifier,

    #[error("missing end comment mark '*/'")]
    UnterminatedComment,

    #[error("incorrect syntax near '{0}'")]
    Unexpected(String),

    #[error("'{0}' is never closed")]
    Unclosed(String),

    #[error("incorrect syntax: {0}")]
    Grammar(String),
}

/// A single diagnostic reported while tokenizing or checking a script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: SyntaxErrorKind,
    pub span: Span,
    pub position: Position,
}

impl ParseError {
    pub fn new(kind: SyntaxErrorKind, span: Span, position: Position) -> Self {
        Self {
            kind,
            span,
            position,
        }
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Convert into a codespan-reporting diagnostic
    pub fn to_diagnostic(&self, file_id: usize) -> Diagnostic<usize> {
        let label = match &self.kind {
            SyntaxErrorKind::UnrecognizedCharacter(_) => "not valid in T-SQL",
            SyntaxErrorKind::UnterminatedString => "string starts here",
            SyntaxErrorKind::UnterminatedQuotedIdentifier => "identifier starts here",
            SyntaxErrorKind::UnterminatedComment => "comment starts here",
            SyntaxErrorKind::Unexpected(_) => "nothing to close here",
            SyntaxErrorKind::Unclosed(_) => "opened here",
            SyntaxErrorKind::Grammar(_) => "near here",
        };

        Diagnostic::error()
            .with_message(self.message())
            .with_labels(vec![
                Label::primary(file_id, self.span.clone()).with_message(label)
            ])
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.position, self.kind)
    }
}

impl std::error::Error for ParseError {}

/// Result alias
pub type ScrubResult<T> = Result<T, ScrubError>;
