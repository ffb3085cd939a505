//! Error types for fsext.
//!
//! This module provides the [`Error`] enum containing all possible errors
//! that can occur in the file operations, and the [`Result`] type alias.
//!
//! # Error Categories
//!
//! | Category | Errors |
//! |----------|--------|
//! | IO | [`Error::Io`] |
//! | Validation | [`Error::SourceNotFound`], [`Error::InvalidArgument`] |
//! | Conflict | [`Error::SameFile`] |
//!
//! A cancelled copy is not an error: it is reported as
//! [`CopyOutcome::Cancelled`](crate::CopyOutcome::Cancelled).

use std::path::PathBuf;
use thiserror::Error;

/// Result type for fsext operations.
///
/// This is a type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during file operations.
///
/// Validation errors carry the offending path. Anything that goes wrong
/// once the operation has reached the operating system is an [`Error::Io`].
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// IO error while copying, applying metadata or setting timestamps
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Source path does not exist or is not a regular file
    #[error("Source file does not exist: {0}")]
    SourceNotFound(PathBuf),

    /// An argument was rejected before any IO took place
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Source and resolved destination refer to the same file
    #[error("Source {src} and destination {dst} are the same file")]
    SameFile {
        /// Source path as given
        src: PathBuf,
        /// Resolved destination path
        dst: PathBuf,
    },
}

/// Fieldless classification of an [`Error`].
///
/// Useful to map failures to exit codes or to branch without matching on
/// the payload of every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Source file missing
    NotFound,
    /// Rejected argument
    InvalidArgument,
    /// Source and destination are the same file
    IdentityConflict,
    /// Operating system failure
    Io,
}

impl Error {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) => ErrorKind::Io,
            Error::SourceNotFound(_) => ErrorKind::NotFound,
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::SameFile { .. } => ErrorKind::IdentityConflict,
        }
    }

    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}
