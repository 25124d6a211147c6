//! Lexical analysis for T-SQL.
//!
//! The lexer is lossless: every character of the input ends up in exactly one
//! token, including whitespace, comments and text it could not classify.
//! Which words are keywords and which operators exist depends on the
//! [`SqlVersion`](crate::dialect::SqlVersion) being lexed.

use serde::Serialize;
use std::fmt;

pub mod keywords;
#[allow(clippy::module_inception)]
mod lexer;
mod token;

pub use lexer::Lexer;
pub use token::{LexicalError, Span, Token, TokenKind};

use crate::dialect::SqlVersion;

/// Position tracking for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new() -> Self {
        Position { line: 1, column: 1 }
    }

    pub fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Lex `input` and drop the error list; handy for inspecting token kinds.
pub fn tokenize(input: &str, version: SqlVersion) -> Vec<Token> {
    Lexer::new(input, version).collect()
}
