//! Comment removal

use crate::dialect::SqlVersion;
use crate::lexer::Token;
use crate::tokenizer::TokenStream;

/// A token stream with its comments removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredStream {
    version: SqlVersion,
    tokens: Vec<Token>,
    comments_removed: usize,
}

impl FilteredStream {
    pub fn version(&self) -> SqlVersion {
        self.version
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn comments_removed(&self) -> usize {
        self.comments_removed
    }
}

/// Drop single-line and block comments; every other token is kept as is,
/// in its original order.
pub fn strip_comments(stream: TokenStream) -> FilteredStream {
    let (version, tokens, _) = stream.into_parts();
    let total = tokens.len();

    let tokens: Vec<Token> = tokens
        .into_iter()
        .filter(|token| !token.kind.is_comment())
        .collect();
    let comments_removed = total - tokens.len();

    log::debug!("removed {} comment tokens", comments_removed);
    FilteredStream {
        version,
        tokens,
        comments_removed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{Position, TokenKind};
    use pretty_assertions::assert_eq;

    fn token(kind: TokenKind, text: &str) -> Token {
        Token::new(kind, text, 0..text.len(), Position::new())
    }

    #[test]
    fn test_removes_only_comment_kinds() {
        let stream = TokenStream::new(
            SqlVersion::Sql110,
            vec![
                token(TokenKind::Keyword, "SELECT"),
                token(TokenKind::Whitespace, " "),
                token(TokenKind::SingleLineComment, "-- a"),
                token(TokenKind::Whitespace, "\n"),
                token(TokenKind::MultilineComment, "/* b */"),
                token(TokenKind::Integer, "1"),
            ],
            Vec::new(),
        );

        let filtered = strip_comments(stream);
        let texts: Vec<_> = filtered.tokens().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["SELECT", " ", "\n", "1"]);
        assert_eq!(filtered.comments_removed(), 2);
    }

    #[test]
    fn test_comment_lookalikes_are_kept() {
        // Classification belongs to the tokenizer; text is never inspected here.
        let stream = TokenStream::new(
            SqlVersion::Sql110,
            vec![
                token(TokenKind::AsciiStringLiteral, "'-- x'"),
                token(TokenKind::Identifier, "/*weird*/"),
                token(TokenKind::Divide, "/"),
            ],
            Vec::new(),
        );
        let filtered = strip_comments(stream.clone());
        assert_eq!(filtered.tokens(), stream.tokens());
        assert_eq!(filtered.comments_removed(), 0);
    }
}
