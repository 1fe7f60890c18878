use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by profile operations.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// An argument was empty, too long, or not representable in the
    /// document's encoding.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    /// No matching section, key, or section occurrence.
    #[error("not found")]
    NotFound,

    /// The value does not fit the caller's capacity.
    ///
    /// `partial` holds the first `capacity - 1` characters; `required` is the
    /// capacity (value length + 1) that would have succeeded.
    #[error("buffer too small: {required} required")]
    BufferTooSmall { partial: String, required: usize },

    /// Memory for a new entry or value could not be reserved. The document
    /// is left unchanged.
    #[error("out of resources")]
    OutOfResources,

    /// `create` was asked to overwrite an existing file.
    #[error("access denied: {} already exists", .0.display())]
    AccessDenied(PathBuf),

    /// An error from the underlying byte store, unmodified.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl ProfileError {
    /// Returns `true` for [`ProfileError::NotFound`].
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProfileError::NotFound)
    }
}

pub type Result<T> = std::result::Result<T, ProfileError>;
