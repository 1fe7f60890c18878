//! Argument checks shared by every public operation.
use codec::Encoding;
use document::{trim, MAX_STRING_LEN};
use std::path::{Path, PathBuf};

use crate::{ProfileError, Result};

/// Validates a section name or key and returns it trimmed.
///
/// Rejects text longer than [`MAX_STRING_LEN`] units of the document
/// encoding, text that encoding cannot represent, and text that is empty
/// after trimming.
pub(crate) fn name<'a>(encoding: Encoding, text: &'a str, what: &'static str) -> Result<&'a str> {
    let text = text_arg(encoding, text, what)?;
    if text.is_empty() {
        return Err(ProfileError::InvalidParameter(what));
    }
    Ok(text)
}

/// Validates a value and returns it trimmed. Empty values are allowed.
pub(crate) fn value<'a>(encoding: Encoding, text: &'a str) -> Result<&'a str> {
    text_arg(encoding, text, "value")
}

pub(crate) fn capacity(capacity: usize) -> Result<usize> {
    if capacity == 0 {
        return Err(ProfileError::InvalidParameter("capacity"));
    }
    Ok(capacity)
}

fn text_arg<'a>(encoding: Encoding, text: &'a str, what: &'static str) -> Result<&'a str> {
    if encoding.unit_len(text) > MAX_STRING_LEN {
        return Err(ProfileError::InvalidParameter(what));
    }
    if !text.chars().all(|c| encoding.can_encode(c)) {
        return Err(ProfileError::InvalidParameter(what));
    }
    Ok(trim(text))
}

/// Paths are bounded like names, counted in UTF-16 units.
pub(crate) fn path(path: &Path) -> Result<PathBuf> {
    let units = Encoding::Wide.unit_len(&path.to_string_lossy());
    if units == 0 || units > MAX_STRING_LEN {
        return Err(ProfileError::InvalidParameter("path"));
    }
    Ok(path.to_path_buf())
}
