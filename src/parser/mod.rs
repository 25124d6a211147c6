//! Syntax checks over a token sequence, one `GO` batch at a time.
//!
//! Every batch first gets the structural checks of [`Parser`]: parentheses
//! and `BEGIN`/`CASE` ... `END` blocks have to balance. A batch that passes
//! them, and has no lexical errors, is then parsed statement by statement
//! (see [`grammar`]).

mod grammar;

use crate::error::{ParseError, SyntaxErrorKind};
use crate::lexer::{Token, TokenKind};

/// Words that turn `BEGIN` into a statement instead of a block opener
const BEGIN_STATEMENTS: [&str; 5] = ["TRAN", "TRANSACTION", "DISTRIBUTED", "DIALOG", "CONVERSATION"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpenerKind {
    Parenthesis,
    Begin,
    Case,
}

#[derive(Debug, Clone, Copy)]
struct Opener {
    kind: OpenerKind,
    index: usize,
}

/// Checks bracket and block balance within one batch
pub struct Parser<'t> {
    tokens: &'t [Token],
    stack: Vec<Opener>,
    errors: Vec<ParseError>,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            stack: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Run the checks, returning every problem found.
    pub fn check(mut self) -> Vec<ParseError> {
        let tokens = self.tokens;
        let significant: Vec<usize> = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.kind.is_trivia() && t.kind != TokenKind::Error)
            .map(|(i, _)| i)
            .collect();

        for (pos, &index) in significant.iter().enumerate() {
            let next = significant.get(pos + 1).map(|&i| &tokens[i]);
            self.visit(index, next);
        }
        self.end_batch();

        self.errors
    }

    fn visit(&mut self, index: usize, next: Option<&Token>) {
        let tokens = self.tokens;
        let token = &tokens[index];
        match token.kind {
            TokenKind::LeftParenthesis => self.open(OpenerKind::Parenthesis, index),
            TokenKind::RightParenthesis => self.close(&[OpenerKind::Parenthesis], index),
            TokenKind::Keyword if token.is_word("CASE") => self.open(OpenerKind::Case, index),
            TokenKind::Keyword if token.is_word("BEGIN") => {
                let is_statement = next.is_some_and(|n| {
                    BEGIN_STATEMENTS.iter().any(|word| n.is_word(word))
                });
                if !is_statement {
                    self.open(OpenerKind::Begin, index);
                }
            }
            TokenKind::Keyword if token.is_word("END") => {
                // END CONVERSATION is a Service Broker statement
                if !next.is_some_and(|n| n.is_word("CONVERSATION")) {
                    self.close(&[OpenerKind::Begin, OpenerKind::Case], index);
                }
            }
            _ => {}
        }
    }

    fn open(&mut self, kind: OpenerKind, index: usize) {
        self.stack.push(Opener { kind, index });
    }

    /// Close the innermost opener of an accepted kind; anything opened after
    /// it was left unclosed.
    fn close(&mut self, accepts: &[OpenerKind], index: usize) {
        match self.stack.iter().rposition(|o| accepts.contains(&o.kind)) {
            Some(found) => {
                let unclosed = self.stack.split_off(found + 1);
                for opener in unclosed {
                    self.unclosed(opener);
                }
                self.stack.pop();
            }
            None => {
                let token = &self.tokens[index];
                self.errors.push(ParseError::new(
                    SyntaxErrorKind::Unexpected(token.text.clone()),
                    token.span.clone(),
                    token.position,
                ));
            }
        }
    }

    fn end_batch(&mut self) {
        let unclosed = std::mem::take(&mut self.stack);
        for opener in unclosed {
            self.unclosed(opener);
        }
    }

    fn unclosed(&mut self, opener: Opener) {
        let token = &self.tokens[opener.index];
        self.errors.push(ParseError::new(
            SyntaxErrorKind::Unclosed(token.text.clone()),
            token.span.clone(),
            token.position,
        ));
    }
}

/// Check a token sequence for syntax errors.
pub fn check(tokens: &[Token]) -> Vec<ParseError> {
    let mut errors = Vec::new();
    for batch in batches(tokens) {
        let structural = Parser::new(batch).check();
        let lexically_clean = !batch.iter().any(|t| t.kind == TokenKind::Error);
        if structural.is_empty() && lexically_clean {
            errors.extend(grammar::check_batch(batch));
        }
        errors.extend(structural);
    }
    errors
}

/// Split at `GO` separators. A repeat count on the same line (`GO 5`)
/// belongs to the separator, not to the next batch.
fn batches(tokens: &[Token]) -> Vec<&[Token]> {
    let mut batches = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < tokens.len() {
        if tokens[i].kind != TokenKind::BatchSeparator {
            i += 1;
            continue;
        }
        batches.push(&tokens[start..i]);
        i += 1;

        let mut j = i;
        while tokens
            .get(j)
            .is_some_and(|t| t.kind == TokenKind::Whitespace && !t.text.contains('\n'))
        {
            j += 1;
        }
        if tokens.get(j).is_some_and(|t| t.kind == TokenKind::Integer) {
            i = j + 1;
        }
        start = i;
    }
    batches.push(&tokens[start..]);

    batches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::SqlVersion;
    use crate::lexer::tokenize;
    use test_case::test_case;

    fn errors_in(source: &str) -> Vec<SyntaxErrorKind> {
        check(&tokenize(source, SqlVersion::Sql110))
            .into_iter()
            .map(|e| e.kind)
            .collect()
    }

    #[test]
    fn test_balanced_script() {
        let source = "
            IF EXISTS (SELECT 1 FROM t)
            BEGIN
                SELECT CASE WHEN (a > 1) THEN 'x' ELSE 'y' END FROM t
            END";
        assert!(errors_in(source).is_empty());
    }

    #[test]
    fn test_unclosed_parenthesis() {
        assert_eq!(
            errors_in("SELECT * FROM ("),
            vec![SyntaxErrorKind::Unclosed("(".to_string())]
        );
    }

    #[test]
    fn test_unexpected_closer() {
        assert_eq!(
            errors_in("SELECT 1)"),
            vec![SyntaxErrorKind::Unexpected(")".to_string())]
        );
        assert_eq!(
            errors_in("SELECT 1 END"),
            vec![SyntaxErrorKind::Unexpected("END".to_string())]
        );
    }

    #[test]
    fn test_missing_end() {
        assert_eq!(
            errors_in("BEGIN SELECT 1"),
            vec![SyntaxErrorKind::Unclosed("BEGIN".to_string())]
        );
    }

    #[test]
    fn test_closer_skips_inner_openers() {
        assert_eq!(
            errors_in("SELECT (CASE WHEN a = 1 THEN 2)"),
            vec![SyntaxErrorKind::Unclosed("CASE".to_string())]
        );
    }

    #[test]
    fn test_transaction_statements_are_not_blocks() {
        let source = "BEGIN TRAN; UPDATE t SET a = 1; COMMIT; BEGIN TRANSACTION x; COMMIT";
        assert!(errors_in(source).is_empty());
        assert!(errors_in("BEGIN DISTRIBUTED TRANSACTION").is_empty());
        assert!(errors_in("END CONVERSATION @h").is_empty());
    }

    #[test]
    fn test_try_catch_blocks() {
        let source = "BEGIN TRY SELECT 1/0 END TRY BEGIN CATCH SELECT ERROR_MESSAGE() END CATCH";
        assert!(errors_in(source).is_empty());
    }

    #[test]
    fn test_batches_are_checked_separately() {
        let source = "BEGIN\nGO\nEND\nGO\n";
        assert_eq!(
            errors_in(source),
            vec![
                SyntaxErrorKind::Unclosed("BEGIN".to_string()),
                SyntaxErrorKind::Unexpected("END".to_string()),
            ]
        );
    }

    #[test_case("SELEC 1 FRM")]
    #[test_case("SELECT 1 WHERE")]
    #[test_case("INSERT INTO")]
    #[test_case("UPDATE SET = ;")]
    #[test_case("CREATE TABLE")]
    fn test_grammar_errors(source: &str) {
        let errors = errors_in(source);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], SyntaxErrorKind::Grammar(_)));
    }

    #[test]
    fn test_grammar_is_checked_per_batch() {
        let source = "SELECT 1\nGO\nSELEC 2\nGO\nSELECT 3\nGO\nINSERT INTO\n";
        let errors = check(&tokenize(source, SqlVersion::Sql110));
        let lines: Vec<_> = errors.iter().map(|e| e.position.line).collect();
        assert_eq!(lines, vec![3, 7]);
    }

    #[test]
    fn test_structural_errors_take_precedence() {
        assert_eq!(
            errors_in("SELEC (1"),
            vec![SyntaxErrorKind::Unclosed("(".to_string())]
        );
    }

    #[test]
    fn test_separator_after_comment_splits_batches() {
        assert!(errors_in("SELECT 1\n/* done */ GO\nSELECT 2").is_empty());
    }

    #[test]
    fn test_separator_repeat_count() {
        assert!(errors_in("INSERT INTO t VALUES (1)\nGO 5\nSELECT 2\nGO").is_empty());
    }

    #[test]
    fn test_comments_and_literals_are_ignored() {
        assert!(errors_in("SELECT '(' -- )\n/* BEGIN */ , [END]").is_empty());
    }
}
