//! Error types for vue-style-flatten.

use std::io;
use thiserror::Error;

/// Result type alias for flattening operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a run.
///
/// A missing style section is not an error; see [`crate::Outcome`].
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing the target file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A rule table pattern failed to compile.
    #[error("Invalid rule pattern: {0}")]
    Pattern(#[from] regex::Error),
}
