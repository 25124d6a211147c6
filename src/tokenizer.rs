//! The tokenizer seam: turns a whole script into a [`TokenStream`] for one
//! grammar version.

use serde::Serialize;

use crate::dialect::SqlVersion;
use crate::error::ParseError;
use crate::lexer::{Lexer, Token};
use crate::parser;

/// Anything that can tokenize a complete T-SQL document.
///
/// Implementations must be lossless: the concatenated text of the returned
/// tokens equals `source`, whether or not errors were reported.
pub trait Tokenizer {
    fn tokenize(&self, source: &str, version: SqlVersion) -> TokenStream;
}

impl<T: Tokenizer + ?Sized> Tokenizer for &T {
    fn tokenize(&self, source: &str, version: SqlVersion) -> TokenStream {
        (**self).tokenize(source, version)
    }
}

/// Ordered tokens of one document plus the errors found while producing them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenStream {
    version: SqlVersion,
    tokens: Vec<Token>,
    #[serde(skip)]
    errors: Vec<ParseError>,
}

impl TokenStream {
    pub fn new(version: SqlVersion, tokens: Vec<Token>, errors: Vec<ParseError>) -> Self {
        Self {
            version,
            tokens,
            errors,
        }
    }

    pub fn version(&self) -> SqlVersion {
        self.version
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Concatenate every token's text; equals the source for a lossless tokenizer.
    pub fn source_text(&self) -> String {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    pub fn into_parts(self) -> (SqlVersion, Vec<Token>, Vec<ParseError>) {
        (self.version, self.tokens, self.errors)
    }
}

/// The built-in T-SQL tokenizer: the version-aware lexer followed by the
/// structural checks of [`parser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TSqlTokenizer {
    quoted_identifiers: bool,
}

impl TSqlTokenizer {
    pub fn new() -> Self {
        Self {
            quoted_identifiers: true,
        }
    }

    /// Whether `"..."` delimits identifiers (`SET QUOTED_IDENTIFIER ON`).
    pub fn with_quoted_identifiers(mut self, enabled: bool) -> Self {
        self.quoted_identifiers = enabled;
        self
    }
}

impl Default for TSqlTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for TSqlTokenizer {
    fn tokenize(&self, source: &str, version: SqlVersion) -> TokenStream {
        let (tokens, mut errors) = Lexer::new(source, version)
            .quoted_identifiers(self.quoted_identifiers)
            .collect_tokens();
        log::debug!("lexed {} tokens with {}", tokens.len(), version);

        errors.extend(parser::check(&tokens));
        errors.sort_by_key(|e| e.span.start);

        TokenStream::new(version, tokens, errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyntaxErrorKind;

    #[test]
    fn test_clean_script() {
        let source = "SELECT a, b FROM t -- x\n";
        let stream = TSqlTokenizer::new().tokenize(source, SqlVersion::Sql140);
        assert!(!stream.has_errors());
        assert_eq!(stream.version(), SqlVersion::Sql140);
        assert_eq!(stream.source_text(), source);
    }

    #[test]
    fn test_errors_are_ordered_by_offset() {
        let source = "SELECT ( ? FROM t";
        let stream = TSqlTokenizer::new().tokenize(source, SqlVersion::Sql110);
        let kinds: Vec<_> = stream.errors().iter().map(|e| e.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxErrorKind::Unclosed("(".to_string()),
                SyntaxErrorKind::UnrecognizedCharacter("?".to_string()),
            ]
        );
        assert_eq!(stream.source_text(), source);
    }

    #[test]
    fn test_quoted_identifier_setting() {
        let source = "SELECT \"x\"";
        let on = TSqlTokenizer::new().tokenize(source, SqlVersion::Sql110);
        let off = TSqlTokenizer::new()
            .with_quoted_identifiers(false)
            .tokenize(source, SqlVersion::Sql110);
        assert_ne!(on.tokens()[2].kind, off.tokens()[2].kind);
    }
}
