//! sqlscrub: T-SQL comment removal.
//!
//! This library tokenizes a T-SQL script with the grammar selected by a
//! compatibility level, drops the comment tokens and rebuilds the script from
//! what is left, leaving every other character exactly where it was.

pub mod dialect;
pub mod error;
pub mod filter;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod tokenizer;

// Re-export commonly used types
pub use dialect::SqlVersion;
pub use error::{ParseError, ScrubError, ScrubResult, SyntaxErrorKind};
pub use filter::{strip_comments, FilteredStream};
pub use lexer::{Lexer, Position, Token, TokenKind};
pub use output::{render, write_output, Destination};
pub use pipeline::{ScrubOutput, ScrubReport, Scrubber};
pub use tokenizer::{TSqlTokenizer, TokenStream, Tokenizer};
