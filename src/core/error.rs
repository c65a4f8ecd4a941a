use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading, repairing or writing a fixture.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FixtureError {
    /// The file is not well-formed XML.
    #[error("XML parse error: {0}")]
    Parse(String),

    /// The in-memory tree could not be serialized.
    #[error("XML write error: {0}")]
    Write(String),

    /// Reading or writing the file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The target directory does not exist.
    #[error("directory {} does not exist", .0.display())]
    MissingDirectory(PathBuf),

    /// The target directory holds no `*.xml` files.
    #[error("no XML files found in {}", .0.display())]
    NoXmlFiles(PathBuf),
}

impl FixtureError {
    /// Whether this error means the file itself is malformed, as opposed to
    /// an environment failure.
    pub fn is_parse(&self) -> bool {
        matches!(self, FixtureError::Parse(_))
    }
}
