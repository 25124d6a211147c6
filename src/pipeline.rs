//! The scrub pipeline.
//!
//! Resolve the dialect, tokenize, stop on parse errors, otherwise strip the
//! comments, rebuild the text and write it out. Output is all-or-nothing.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::dialect::SqlVersion;
use crate::error::{ScrubError, ScrubResult};
use crate::filter::strip_comments;
use crate::output::{render, write_output, Destination};
use crate::tokenizer::{TSqlTokenizer, TokenStream, Tokenizer};

/// Summary of a successful run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrubReport {
    pub version: SqlVersion,
    pub tokens: usize,
    pub comments_removed: usize,
    pub bytes_in: usize,
    pub bytes_out: usize,
}

impl fmt::Display for ScrubReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tokens, {} comments removed, {} -> {} bytes ({})",
            self.tokens, self.comments_removed, self.bytes_in, self.bytes_out, self.version
        )
    }
}

/// Scrubbed text together with its report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrubOutput {
    pub text: String,
    pub report: ScrubReport,
}

/// Runs the pipeline with a given tokenizer
#[derive(Debug, Clone, Default)]
pub struct Scrubber<T = TSqlTokenizer> {
    tokenizer: T,
}

impl Scrubber<TSqlTokenizer> {
    pub fn new() -> Self {
        Self::with_tokenizer(TSqlTokenizer::new())
    }
}

impl<T: Tokenizer> Scrubber<T> {
    pub fn with_tokenizer(tokenizer: T) -> Self {
        Self { tokenizer }
    }

    /// Resolve the compatibility level and tokenize, without judging errors.
    pub fn tokenize(&self, source: &str, compat_level: u32) -> TokenStream {
        let version = SqlVersion::from_compat_level(compat_level);
        log::debug!("compatibility level {} resolved to {}", compat_level, version);
        self.tokenizer.tokenize(source, version)
    }

    /// Tokenize and fail if the tokenizer reported any error.
    pub fn check_text(&self, source: &str, compat_level: u32) -> ScrubResult<TokenStream> {
        let stream = self.tokenize(source, compat_level);
        if stream.has_errors() {
            log::debug!("tokenizer reported {} errors", stream.errors().len());
            let (_, _, errors) = stream.into_parts();
            return Err(ScrubError::Parse { errors });
        }
        Ok(stream)
    }

    /// Remove every comment from `source`.
    pub fn scrub_text(&self, source: &str, compat_level: u32) -> ScrubResult<ScrubOutput> {
        let stream = self.check_text(source, compat_level)?;
        let tokens = stream.len();

        let filtered = strip_comments(stream);
        let text = render(&filtered);

        let report = ScrubReport {
            version: filtered.version(),
            tokens,
            comments_removed: filtered.comments_removed(),
            bytes_in: source.len(),
            bytes_out: text.len(),
        };
        Ok(ScrubOutput { text, report })
    }

    /// Read `source`, scrub it and replace `destination` with the result.
    /// On any error the destination is left untouched.
    pub fn scrub_file(
        &self,
        source: &Path,
        destination: &Destination,
        compat_level: u32,
    ) -> ScrubResult<ScrubReport> {
        let text = fs::read_to_string(source).map_err(|e| ScrubError::Read {
            path: source.to_path_buf(),
            source: e,
        })?;

        let output = self.scrub_text(&text, compat_level)?;
        write_output(destination, &output.text)?;

        log::info!("{} -> {}: {}", source.display(), destination, output.report);
        Ok(output.report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scrub_text_report() {
        let source = "SELECT 1 -- one\n/* two */SELECT 2";
        let output = Scrubber::new().scrub_text(source, 130).unwrap();

        assert_eq!(output.text, "SELECT 1 \nSELECT 2");
        assert_eq!(output.report.version, SqlVersion::Sql130);
        assert_eq!(output.report.comments_removed, 2);
        assert_eq!(output.report.bytes_in, source.len());
        assert_eq!(output.report.bytes_out, output.text.len());
    }

    #[test]
    fn test_check_text_fails_on_errors() {
        let err = Scrubber::new().check_text("SELECT * FROM (", 110).unwrap_err();
        assert_eq!(err.parse_errors().len(), 1);
    }

    #[test]
    fn test_unknown_level_uses_default_grammar() {
        let stream = Scrubber::new().tokenize("SELECT 1", 999);
        assert_eq!(stream.version(), SqlVersion::DEFAULT);
    }
}
