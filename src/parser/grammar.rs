//! Statement grammar checks backed by `sqlparser`'s MS SQL dialect.
//!
//! Each batch is re-assembled from its tokens with comments blanked out, so
//! line and column numbers reported by `sqlparser` line up with the original
//! script, and handed to the parser one statement at a time. T-SQL does not
//! require `;` between statements, so none is demanded here either.
//!
//! The dialect only covers part of T-SQL. Batches using procedural or
//! session-level constructs it does not model are left to the structural
//! checks alone; anything else it fails to parse is reported.

use sqlparser::dialect::MsSqlDialect;
use sqlparser::parser::{Parser as SqlParser, ParserError};
use sqlparser::tokenizer::Token as SqlToken;

use crate::error::{ParseError, SyntaxErrorKind};
use crate::lexer::{Position, Token, TokenKind};

/// Words that mark a batch as using T-SQL the MS SQL dialect cannot parse
const UNMODELED_WORDS: &[&str] = &[
    "BACKUP",
    "BEGIN",
    "BREAK",
    "BULK",
    "CATCH",
    "CHECKPOINT",
    "CLOSE",
    "COMMIT",
    "CONTINUE",
    "CONVERSATION",
    "CURSOR",
    "DBCC",
    "DEALLOCATE",
    "DENY",
    "DIALOG",
    "EXEC",
    "EXECUTE",
    "FETCH",
    "FUNCTION",
    "GOTO",
    "IF",
    "KILL",
    "MERGE",
    "OPEN",
    "OPTION",
    "OUTPUT",
    "PRINT",
    "PROC",
    "PROCEDURE",
    "RAISERROR",
    "READTEXT",
    "RECONFIGURE",
    "RESTORE",
    "RETURN",
    "REVERT",
    "ROLLBACK",
    "SAVE",
    "SETUSER",
    "SHUTDOWN",
    "THROW",
    "TRIGGER",
    "TRY",
    "UPDATETEXT",
    "WAITFOR",
    "WHILE",
    "WRITETEXT",
];

/// Parse one batch and report the first grammar error, if any.
pub fn check_batch(batch: &[Token]) -> Option<ParseError> {
    let significant: Vec<&Token> = batch.iter().filter(|t| !t.kind.is_trivia()).collect();
    let first = significant.first()?;
    let base = batch.first()?.position;

    if let Some(reason) = unmodeled_construct(&significant) {
        log::debug!(
            "batch at {} uses {}, skipping grammar check",
            first.position,
            reason
        );
        return None;
    }

    let text = batch_text(batch);
    let error = match parse_statements(&text) {
        Ok(()) => return None,
        Err(ParserError::RecursionLimitExceeded) => {
            log::debug!("batch at {} nests too deeply to check", first.position);
            return None;
        }
        Err(ParserError::TokenizerError(message)) | Err(ParserError::ParserError(message)) => {
            message
        }
    };

    let (message, location) = split_location(&error);
    let token = location
        .map(|(line, column)| relative_to(base, line, column))
        .and_then(|at| significant.iter().find(|t| t.position >= at))
        .or_else(|| significant.last())?;

    Some(ParseError::new(
        SyntaxErrorKind::Grammar(message.to_string()),
        token.span.clone(),
        token.position,
    ))
}

/// Name of the first construct in `tokens` the dialect cannot parse.
fn unmodeled_construct(tokens: &[&Token]) -> Option<String> {
    for (i, token) in tokens.iter().enumerate() {
        let next = tokens.get(i + 1);
        match token.kind {
            TokenKind::Money | TokenKind::PseudoColumn => return Some(token.kind.to_string()),
            TokenKind::DoubleColon | TokenKind::LeftCurly => return Some(token.kind.to_string()),
            kind if kind.is_compound_assignment() => return Some(kind.to_string()),
            TokenKind::Identifier | TokenKind::Keyword => {
                if let Some(word) = UNMODELED_WORDS.iter().find(|w| token.is_word(w)) {
                    return Some(word.to_string());
                }
                if token.is_word("SET") && is_set_option(next.copied(), tokens.get(i + 2).copied()) {
                    return Some("SET option".to_string());
                }
            }
            TokenKind::Variable if next.is_some_and(|n| n.is_word("TABLE")) => {
                return Some("table variable".to_string());
            }
            _ => {}
        }
    }
    None
}

/// `SET NOCOUNT ON`, `SET ANSI_NULLS, QUOTED_IDENTIFIER OFF` and friends,
/// as opposed to `UPDATE ... SET col = ...` or `SET @v = ...`.
fn is_set_option(name: Option<&Token>, after: Option<&Token>) -> bool {
    let Some(name) = name else {
        return false;
    };
    if !matches!(name.kind, TokenKind::Identifier | TokenKind::Keyword) {
        return false;
    }
    !after.is_some_and(|t| matches!(t.kind, TokenKind::EqualsSign | TokenKind::Dot))
}

/// The batch's text with every comment replaced by spaces, keeping line
/// breaks. A byte-order mark becomes a plain space as well.
fn batch_text(batch: &[Token]) -> String {
    let mut text = String::new();
    for token in batch {
        if token.kind.is_comment() {
            text.extend(token.text.chars().map(|ch| if ch == '\n' { '\n' } else { ' ' }));
        } else if token.kind == TokenKind::Whitespace {
            text.extend(token.text.chars().map(|ch| if ch == '\u{FEFF}' { ' ' } else { ch }));
        } else {
            text.push_str(&token.text);
        }
    }
    text
}

fn parse_statements(text: &str) -> Result<(), ParserError> {
    let dialect = MsSqlDialect {};
    let mut parser = SqlParser::new(&dialect).try_with_sql(text)?;
    loop {
        while parser.consume_token(&SqlToken::SemiColon) {}
        if parser.peek_token().token == SqlToken::EOF {
            return Ok(());
        }
        parser.parse_statement()?;
    }
}

/// Split `"... at Line: 3, Column: 7"` into the message and its location.
fn split_location(error: &str) -> (&str, Option<(usize, usize)>) {
    let Some((message, location)) = error.rsplit_once(" at Line: ") else {
        return (error, None);
    };
    let parsed = location.split_once(", Column: ").and_then(|(line, column)| {
        Some((line.trim().parse().ok()?, column.trim().parse().ok()?))
    });
    match parsed {
        Some(location) => (message, Some(location)),
        None => (error, None),
    }
}

/// Translate a 1-based location inside a batch to a position in the script.
fn relative_to(base: Position, line: usize, column: usize) -> Position {
    if line <= 1 {
        Position {
            line: base.line,
            column: base.column + column.saturating_sub(1),
        }
    } else {
        Position {
            line: base.line + line - 1,
            column,
        }
    }
}
