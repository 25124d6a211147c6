//! Token definitions

use logos::{Lexer as LogosLexer, Logos};
use serde::Serialize;
use std::fmt;
use std::ops::Range;

use super::Position;
use crate::error::SyntaxErrorKind;

/// Byte range of a token within the source text
pub type Span = Range<usize>;

/// Failures the raw lexer can report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LexicalError {
    #[default]
    UnrecognizedCharacter,
    UnterminatedString,
    UnterminatedQuotedIdentifier,
    UnterminatedComment,
}

impl LexicalError {
    /// Attach the offending source text to produce a reportable error kind.
    pub fn into_syntax_error(self, text: &str) -> SyntaxErrorKind {
        match self {
            LexicalError::UnrecognizedCharacter => {
                SyntaxErrorKind::UnrecognizedCharacter(text.to_owned())
            }
            LexicalError::UnterminatedString => SyntaxErrorKind::UnterminatedString,
            LexicalError::UnterminatedQuotedIdentifier => {
                SyntaxErrorKind::UnterminatedQuotedIdentifier
            }
            LexicalError::UnterminatedComment => SyntaxErrorKind::UnterminatedComment,
        }
    }
}

/// Token categories of T-SQL.
///
/// Nothing is skipped: whitespace and comments are tokens too, so the
/// concatenated text of a token sequence always equals its source.
/// `Keyword`, `BatchSeparator` and `Error` have no pattern of their own;
/// the [`Lexer`](super::Lexer) assigns them after matching.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[logos(error = LexicalError)]
pub enum TokenKind {
    #[regex(r"[ \t\r\n\x0B\x0C\u{FEFF}]+")]
    Whitespace,

    // Comments
    #[regex(r"--[^\r\n]*")]
    SingleLineComment,
    #[token("/*", block_comment)]
    MultilineComment,

    // Names
    #[regex(r"[\p{L}_#][\p{L}\p{N}_@#$]*")]
    Identifier,
    #[token("[", |lex| delimited(lex, b']', LexicalError::UnterminatedQuotedIdentifier))]
    #[token("\"", |lex| delimited(lex, b'"', LexicalError::UnterminatedQuotedIdentifier))]
    QuotedIdentifier,
    #[regex(r"@[\p{L}\p{N}_@#$]+")]
    Variable,
    #[regex(r"\$[\p{L}_][\p{L}\p{N}_]*")]
    PseudoColumn,
    Keyword,
    BatchSeparator,

    // Literals
    #[regex(r"[0-9]+")]
    Integer,
    #[regex(r"[0-9]+\.[0-9]*|\.[0-9]+")]
    Numeric,
    #[regex(r"([0-9]+(\.[0-9]*)?|\.[0-9]+)[eE][+-]?[0-9]+")]
    Real,
    #[regex(r"\$[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)")]
    Money,
    #[regex(r"0[xX][0-9a-fA-F]*")]
    HexLiteral,
    #[token("'", |lex| delimited(lex, b'\'', LexicalError::UnterminatedString))]
    AsciiStringLiteral,
    #[regex(r"[Nn]'", |lex| delimited(lex, b'\'', LexicalError::UnterminatedString))]
    UnicodeStringLiteral,

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Divide,
    #[token("%")]
    Modulo,
    #[token("=")]
    EqualsSign,
    #[token("<>")]
    #[token("!=")]
    NotEqual,
    #[token("<")]
    LessThan,
    #[token(">")]
    GreaterThan,
    #[token("<=")]
    LessOrEqual,
    #[token(">=")]
    GreaterOrEqual,
    #[token("!<")]
    NotLessThan,
    #[token("!>")]
    NotGreaterThan,
    #[token("&")]
    Ampersand,
    #[token("|")]
    Bar,
    #[token("^")]
    Circumflex,
    #[token("~")]
    Tilde,
    #[token("+=")]
    AddEquals,
    #[token("-=")]
    SubtractEquals,
    #[token("*=")]
    MultiplyEquals,
    #[token("/=")]
    DivideEquals,
    #[token("%=")]
    ModEquals,
    #[token("&=")]
    BitwiseAndEquals,
    #[token("|=")]
    BitwiseOrEquals,
    #[token("^=")]
    BitwiseXorEquals,
    #[token("::")]
    DoubleColon,

    // Punctuation
    #[token("(")]
    LeftParenthesis,
    #[token(")")]
    RightParenthesis,
    #[token("{")]
    LeftCurly,
    #[token("}")]
    RightCurly,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,

    // Text the lexer could not classify
    Error,
}

/// Consume a block comment body; T-SQL block comments nest.
fn block_comment(lex: &mut LogosLexer<TokenKind>) -> Result<(), LexicalError> {
    let bytes = lex.remainder().as_bytes();
    let mut depth = 1usize;
    let mut i = 0;

    while i < bytes.len() {
        match (bytes[i], bytes.get(i + 1)) {
            (b'*', Some(b'/')) => {
                depth -= 1;
                i += 2;
                if depth == 0 {
                    lex.bump(i);
                    return Ok(());
                }
            }
            (b'/', Some(b'*')) => {
                depth += 1;
                i += 2;
            }
            _ => i += 1,
        }
    }

    lex.bump(bytes.len());
    Err(LexicalError::UnterminatedComment)
}

/// Consume up to and including `close`, where a doubled `close` is an escape.
fn delimited(
    lex: &mut LogosLexer<TokenKind>,
    close: u8,
    unterminated: LexicalError,
) -> Result<(), LexicalError> {
    let bytes = lex.remainder().as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == close {
            if bytes.get(i + 1) == Some(&close) {
                i += 2;
                continue;
            }
            lex.bump(i + 1);
            return Ok(());
        }
        i += 1;
    }

    lex.bump(bytes.len());
    Err(unterminated)
}

impl TokenKind {
    /// True for the two comment kinds, the only tokens scrubbing removes.
    pub fn is_comment(self) -> bool {
        matches!(
            self,
            TokenKind::SingleLineComment | TokenKind::MultilineComment
        )
    }

    /// Whitespace and comments: tokens that carry no syntax.
    pub fn is_trivia(self) -> bool {
        self == TokenKind::Whitespace || self.is_comment()
    }

    /// Compound assignment operators, introduced with SQL Server 2008.
    pub fn is_compound_assignment(self) -> bool {
        matches!(
            self,
            TokenKind::AddEquals
                | TokenKind::SubtractEquals
                | TokenKind::MultiplyEquals
                | TokenKind::DivideEquals
                | TokenKind::ModEquals
                | TokenKind::BitwiseAndEquals
                | TokenKind::BitwiseOrEquals
                | TokenKind::BitwiseXorEquals
        )
    }

    /// Kind of a single-character operator or punctuation mark.
    pub fn from_single_char(ch: char) -> Option<TokenKind> {
        let kind = match ch {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Divide,
            '%' => TokenKind::Modulo,
            '=' => TokenKind::EqualsSign,
            '<' => TokenKind::LessThan,
            '>' => TokenKind::GreaterThan,
            '&' => TokenKind::Ampersand,
            '|' => TokenKind::Bar,
            '^' => TokenKind::Circumflex,
            '~' => TokenKind::Tilde,
            '(' => TokenKind::LeftParenthesis,
            ')' => TokenKind::RightParenthesis,
            '{' => TokenKind::LeftCurly,
            '}' => TokenKind::RightCurly,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '.' => TokenKind::Dot,
            ':' => TokenKind::Colon,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Whitespace => "whitespace",
            TokenKind::SingleLineComment => "single-line comment",
            TokenKind::MultilineComment => "block comment",
            TokenKind::Identifier => "identifier",
            TokenKind::QuotedIdentifier => "quoted identifier",
            TokenKind::Variable => "variable",
            TokenKind::PseudoColumn => "pseudo column",
            TokenKind::Keyword => "keyword",
            TokenKind::BatchSeparator => "batch separator",
            TokenKind::Integer => "integer",
            TokenKind::Numeric => "numeric",
            TokenKind::Real => "real",
            TokenKind::Money => "money",
            TokenKind::HexLiteral => "binary literal",
            TokenKind::AsciiStringLiteral => "string literal",
            TokenKind::UnicodeStringLiteral => "unicode string literal",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Divide => "/",
            TokenKind::Modulo => "%",
            TokenKind::EqualsSign => "=",
            TokenKind::NotEqual => "<>",
            TokenKind::LessThan => "<",
            TokenKind::GreaterThan => ">",
            TokenKind::LessOrEqual => "<=",
            TokenKind::GreaterOrEqual => ">=",
            TokenKind::NotLessThan => "!<",
            TokenKind::NotGreaterThan => "!>",
            TokenKind::Ampersand => "&",
            TokenKind::Bar => "|",
            TokenKind::Circumflex => "^",
            TokenKind::Tilde => "~",
            TokenKind::AddEquals => "+=",
            TokenKind::SubtractEquals => "-=",
            TokenKind::MultiplyEquals => "*=",
            TokenKind::DivideEquals => "/=",
            TokenKind::ModEquals => "%=",
            TokenKind::BitwiseAndEquals => "&=",
            TokenKind::BitwiseOrEquals => "|=",
            TokenKind::BitwiseXorEquals => "^=",
            TokenKind::DoubleColon => "::",
            TokenKind::LeftParenthesis => "(",
            TokenKind::RightParenthesis => ")",
            TokenKind::LeftCurly => "{",
            TokenKind::RightCurly => "}",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Dot => ".",
            TokenKind::Colon => ":",
            TokenKind::Error => "error",
        };
        f.write_str(name)
    }
}

/// A classified slice of source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span, position: Position) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
            position,
        }
    }

    /// Case-insensitive comparison against a word, as T-SQL compares keywords.
    pub fn is_word(&self, word: &str) -> bool {
        self.text.eq_ignore_ascii_case(word)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} @ {}", self.kind, self.text, self.position)
    }
}
