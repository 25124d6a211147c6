//! Lexer tests
//!
//! Covers token classification across grammar versions, edge cases around
//! comment delimiters, and error reporting.

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sqlscrub::lexer::{tokenize, Lexer, Position, Token, TokenKind};
    use sqlscrub::{SqlVersion, SyntaxErrorKind};
    use test_case::test_case;

    /// Kinds of the non-whitespace tokens
    fn extract_kinds(source: &str, version: SqlVersion) -> Vec<TokenKind> {
        tokenize(source, version)
            .into_iter()
            .filter(|t| t.kind != TokenKind::Whitespace)
            .map(|t| t.kind)
            .collect()
    }

    fn extract_tokens(source: &str) -> Vec<Token> {
        tokenize(source, SqlVersion::DEFAULT)
    }

    #[test]
    fn test_operators() {
        let source = "+ - * / % = <> != < > <= >= !< !> & | ^ ~";
        assert_eq!(
            extract_kinds(source, SqlVersion::Sql140),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Divide,
                TokenKind::Modulo,
                TokenKind::EqualsSign,
                TokenKind::NotEqual,
                TokenKind::NotEqual,
                TokenKind::LessThan,
                TokenKind::GreaterThan,
                TokenKind::LessOrEqual,
                TokenKind::GreaterOrEqual,
                TokenKind::NotLessThan,
                TokenKind::NotGreaterThan,
                TokenKind::Ampersand,
                TokenKind::Bar,
                TokenKind::Circumflex,
                TokenKind::Tilde,
            ]
        );
    }

    #[test]
    fn test_compound_assignments() {
        let source = "+= -= *= /= %= &= |= ^=";
        let kinds = extract_kinds(source, SqlVersion::Sql100);
        assert_eq!(kinds.len(), 8);
        assert!(kinds.iter().all(|k| k.is_compound_assignment()));

        let kinds = extract_kinds(source, SqlVersion::Sql90);
        assert_eq!(kinds.len(), 16);
        assert!(!kinds.iter().any(|k| k.is_compound_assignment()));
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(
            extract_kinds("( ) { } , ; . :", SqlVersion::DEFAULT),
            vec![
                TokenKind::LeftParenthesis,
                TokenKind::RightParenthesis,
                TokenKind::LeftCurly,
                TokenKind::RightCurly,
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::Dot,
                TokenKind::Colon,
            ]
        );
    }

    #[test]
    fn test_names() {
        assert_eq!(
            extract_kinds("#temp ##global @local @@ROWCOUNT $action [x] \"y\"", SqlVersion::DEFAULT),
            vec![
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Variable,
                TokenKind::Variable,
                TokenKind::PseudoColumn,
                TokenKind::QuotedIdentifier,
                TokenKind::QuotedIdentifier,
            ]
        );
    }

    #[test_case("PIVOT", SqlVersion::Sql80, TokenKind::Identifier)]
    #[test_case("PIVOT", SqlVersion::Sql90, TokenKind::Keyword)]
    #[test_case("merge", SqlVersion::Sql90, TokenKind::Identifier)]
    #[test_case("merge", SqlVersion::Sql100, TokenKind::Keyword)]
    #[test_case("try_convert", SqlVersion::Sql100, TokenKind::Identifier)]
    #[test_case("try_convert", SqlVersion::Sql110, TokenKind::Keyword)]
    #[test_case("Select", SqlVersion::Sql80, TokenKind::Keyword)]
    fn test_keywords_by_version(word: &str, version: SqlVersion, expected: TokenKind) {
        assert_eq!(extract_kinds(word, version), vec![expected]);
    }

    #[test]
    fn test_minus_minus_starts_a_comment() {
        let tokens = extract_tokens("SELECT 5--3");
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::SingleLineComment));
        assert_eq!(tokens.last().map(|t| t.text.as_str()), Some("--3"));
    }

    #[test]
    fn test_minus_negative_is_not_a_comment() {
        assert_eq!(
            extract_kinds("5 - -3", SqlVersion::DEFAULT),
            vec![
                TokenKind::Integer,
                TokenKind::Minus,
                TokenKind::Minus,
                TokenKind::Integer
            ]
        );
    }

    #[test]
    fn test_block_comment_spanning_lines() {
        let tokens = extract_tokens("SELECT /* a\n b\n */ x");
        let comment = &tokens[2];
        assert_eq!(comment.kind, TokenKind::MultilineComment);
        assert_eq!(tokens[4].position, Position { line: 3, column: 5 });
    }

    #[test]
    fn test_unterminated_block_comment() {
        let (tokens, errors) = Lexer::new("SELECT 1 /* open /* nested */", SqlVersion::DEFAULT)
            .collect_tokens();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, SyntaxErrorKind::UnterminatedComment);
        assert_eq!(errors[0].position, Position { line: 1, column: 10 });
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Error));
    }

    #[test]
    fn test_unterminated_bracket_identifier() {
        let (_, errors) = Lexer::new("SELECT [abc", SqlVersion::DEFAULT).collect_tokens();
        assert_eq!(errors[0].kind, SyntaxErrorKind::UnterminatedQuotedIdentifier);
    }

    #[test]
    fn test_unterminated_double_quote_without_quoted_identifiers() {
        let (_, errors) = Lexer::new("SELECT \"abc", SqlVersion::DEFAULT)
            .quoted_identifiers(false)
            .collect_tokens();
        assert_eq!(errors[0].kind, SyntaxErrorKind::UnterminatedString);
    }

    #[test]
    fn test_spans_are_contiguous() {
        let source = "SELECT N'Grüße' AS [col]] x], 1.5e3 -- é\nGO";
        let tokens = extract_tokens(source);
        let mut expected_start = 0;
        for token in &tokens {
            assert_eq!(token.span.start, expected_start);
            assert_eq!(&source[token.span.clone()], token.text);
            expected_start = token.span.end;
        }
        assert_eq!(expected_start, source.len());
    }
}
