//! Error types for Quire operations.
//!
//! This module provides a common `Error` type and `Result<T>` alias used across
//! all Quire crates. Uses `thiserror` for derive macros.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur in Quire operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error tied to a specific file or directory.
    #[error("I/O error at {path}: {source}")]
    IoWithPath {
        /// Path that was being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Content not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data or format.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A content file whose front matter is unterminated or cannot be parsed.
    #[error("Malformed document {}: {reason}", path.display())]
    MalformedDocument {
        /// Path of the offending document.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },
}

impl Error {
    /// Create an I/O error from anything that displays (walker errors included).
    pub fn io(err: impl std::fmt::Display) -> Self {
        Self::Io(std::io::Error::other(err.to_string()))
    }

    /// Create an I/O error that remembers which path failed.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::IoWithPath {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a not found error.
    pub fn not_found_msg(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an invalid data error.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Create a malformed document error for `path`.
    pub fn malformed(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Returns true for [`Error::MalformedDocument`].
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedDocument { .. })
    }

    /// Returns true for [`Error::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// The file path this error refers to, when it has one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::IoWithPath { path, .. } | Self::MalformedDocument { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Result type alias using Quire's Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_names_path() {
        let err = Error::malformed("content/posts/a.md", "unterminated front matter");
        let msg = err.to_string();
        assert!(msg.contains("content/posts/a.md"));
        assert!(msg.contains("unterminated front matter"));
        assert!(err.is_malformed());
        assert_eq!(err.path(), Some(Path::new("content/posts/a.md")));
    }

    #[test]
    fn test_io_with_path_display() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::io_with_path(source, "/tmp/missing.md");
        assert!(err.to_string().contains("/tmp/missing.md"));
        assert_eq!(err.path(), Some(Path::new("/tmp/missing.md")));
        assert!(!err.is_malformed());
    }

    #[test]
    fn test_io_from_display() {
        let err = Error::io("walk failed");
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("walk failed"));
        assert!(err.path().is_none());
    }

    #[test]
    fn test_from_std_io() {
        fn fails() -> Result<()> {
            Err(std::io::Error::other("boom"))?;
            Ok(())
        }
        assert!(matches!(fails(), Err(Error::Io(_))));
    }

    #[test]
    fn test_constructors() {
        assert!(Error::not_found_msg("x").is_not_found());
        assert!(matches!(Error::config("x"), Error::Config(_)));
        assert!(matches!(Error::invalid_data("x"), Error::InvalidData(_)));
        assert!(matches!(Error::serialization("x"), Error::Serialization(_)));
    }
}
