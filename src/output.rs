//! Output reconstruction and destination writing

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::{ScrubError, ScrubResult};
use crate::filter::FilteredStream;

/// Where scrubbed text goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    File(PathBuf),
    Stdout,
}

impl Destination {
    /// `-` means standard output, anything else is a file path.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if path.as_os_str() == "-" {
            Destination::Stdout
        } else {
            Destination::File(path)
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::File(path) => write!(f, "{}", path.display()),
            Destination::Stdout => write!(f, "<stdout>"),
        }
    }
}

/// Concatenate the remaining tokens' text, adding nothing in between.
pub fn render(stream: &FilteredStream) -> String {
    let capacity = stream.tokens().iter().map(|t| t.text.len()).sum();
    let mut out = String::with_capacity(capacity);
    for token in stream.tokens() {
        out.push_str(&token.text);
    }
    out
}

/// Replace the destination's content with `text`.
pub fn write_output(destination: &Destination, text: &str) -> ScrubResult<()> {
    match destination {
        Destination::File(path) => write_file(path, text),
        Destination::Stdout => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(text.as_bytes())
                .and_then(|_| handle.flush())
                .map_err(|source| ScrubError::Write {
                    path: PathBuf::from("-"),
                    source,
                })
        }
    }
}

/// Write through a temporary file in the same directory and rename it over
/// `path`, so readers see either the old content or all of the new.
///
/// A symlinked destination is resolved first and its target replaced, so the
/// link itself survives. A read-only destination is refused.
fn write_file(path: &Path, text: &str) -> ScrubResult<()> {
    let write_err = |source: io::Error| ScrubError::Write {
        path: path.to_path_buf(),
        source,
    };

    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let existing = fs::metadata(&target).ok();
    if existing.as_ref().is_some_and(|m| m.permissions().readonly()) {
        return Err(write_err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "destination is read-only",
        )));
    }

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(write_err)?;
    file.write_all(text.as_bytes()).map_err(write_err)?;
    file.flush().map_err(write_err)?;

    if let Some(metadata) = existing {
        fs::set_permissions(file.path(), metadata.permissions()).map_err(write_err)?;
    }

    file.persist(&target).map_err(|e| write_err(e.error))?;
    log::debug!("wrote {} bytes to {}", text.len(), target.display());
    Ok(())
}
