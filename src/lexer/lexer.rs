//! Version-aware T-SQL lexer

use logos::{Lexer as LogosLexer, Logos};
use std::collections::VecDeque;

use super::keywords;
use super::token::{LexicalError, Span, Token, TokenKind};
use super::Position;
use crate::dialect::SqlVersion;
use crate::error::{ParseError, SyntaxErrorKind};

/// Lexer for T-SQL scripts.
///
/// Wraps the raw logos lexer and applies the rules that depend on the
/// grammar version: keyword reservation, batch separators and which
/// multi-character operators exist. Lexical errors become `Error` tokens
/// (so no text is lost) and are collected separately.
pub struct Lexer<'a> {
    inner: LogosLexer<'a, TokenKind>,
    version: SqlVersion,
    quoted_identifiers: bool,
    position: Position,
    line_has_code: bool,
    pending: VecDeque<Token>,
    errors: Vec<ParseError>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str, version: SqlVersion) -> Self {
        Self {
            inner: TokenKind::lexer(input),
            version,
            quoted_identifiers: true,
            position: Position::new(),
            line_has_code: false,
            pending: VecDeque::new(),
            errors: Vec::new(),
        }
    }

    /// With `QUOTED_IDENTIFIER OFF` semantics, `"..."` is a string literal.
    pub fn quoted_identifiers(mut self, enabled: bool) -> Self {
        self.quoted_identifiers = enabled;
        self
    }

    pub fn version(&self) -> SqlVersion {
        self.version
    }

    /// Errors found so far
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Lex the whole input, returning the tokens and any lexical errors.
    pub fn collect_tokens(mut self) -> (Vec<Token>, Vec<ParseError>) {
        let tokens: Vec<Token> = self.by_ref().collect();
        (tokens, self.errors)
    }

    fn classify(&self, kind: TokenKind, text: &str) -> TokenKind {
        match kind {
            TokenKind::Identifier if !self.line_has_code && text.eq_ignore_ascii_case("GO") => {
                TokenKind::BatchSeparator
            }
            TokenKind::Identifier if keywords::is_reserved(text, self.version) => {
                TokenKind::Keyword
            }
            TokenKind::QuotedIdentifier if !self.quoted_identifiers && text.starts_with('"') => {
                TokenKind::AsciiStringLiteral
            }
            _ => kind,
        }
    }

    fn report(&mut self, error: LexicalError, text: &str, span: Span) {
        let kind = match error {
            LexicalError::UnterminatedQuotedIdentifier
                if !self.quoted_identifiers && text.starts_with('"') =>
            {
                SyntaxErrorKind::UnterminatedString
            }
            other => other.into_syntax_error(text),
        };
        log::debug!("lexical error at {}: {}", self.position, kind);
        self.errors.push(ParseError::new(kind, span, self.position));
    }

    /// Operators this grammar version does not know as a unit.
    fn is_unsupported_operator(&self, kind: TokenKind) -> bool {
        (kind.is_compound_assignment() && self.version < SqlVersion::Sql100)
            || (kind == TokenKind::DoubleColon && self.version < SqlVersion::Sql90)
    }

    fn make_token(&mut self, kind: TokenKind, text: &str, span: Span) -> Token {
        let token = Token::new(kind, text, span, self.position);

        for ch in text.chars() {
            self.position.advance(ch);
        }

        if kind.is_trivia() {
            if text.contains('\n') {
                self.line_has_code = false;
            }
        } else {
            self.line_has_code = true;
        }

        token
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(token) = self.pending.pop_front() {
            return Some(token);
        }

        let result = self.inner.next()?;
        let span = self.inner.span();
        let text = self.inner.slice();

        let kind = match result {
            Ok(kind) => self.classify(kind, text),
            Err(error) => {
                self.report(error, text, span.clone());
                TokenKind::Error
            }
        };

        if self.is_unsupported_operator(kind) {
            for (offset, ch) in text.char_indices() {
                let start = span.start + offset;
                let part = &text[offset..offset + ch.len_utf8()];
                let part_kind = TokenKind::from_single_char(ch).unwrap_or(TokenKind::Error);
                let token = self.make_token(part_kind, part, start..start + part.len());
                self.pending.push_back(token);
            }
            return self.pending.pop_front();
        }

        Some(self.make_token(kind, text, span))
    }
}
