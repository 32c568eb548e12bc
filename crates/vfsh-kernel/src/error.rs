//! Error types for the VFS core and loader.
//!
//! Lookups never fail with an error: resolution misses are reported as
//! `None`/`false` so the shell can phrase them. Only tree construction and
//! loading produce a [`VfsError`].

use thiserror::Error;

/// Errors raised while building or loading a virtual filesystem.
#[derive(Debug, Error)]
pub enum VfsError {
    /// The path has no segments where at least one is required.
    #[error("invalid path: {0:?}")]
    InvalidPath(String),

    /// A CSV row could not be turned into a path entry.
    #[error("row {row}: {message}")]
    Load { row: usize, message: String },

    /// The CSV source is syntactically broken.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The source could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VfsError>;
