//! # Profile - INI Profile Engine
//!
//! Loads an INI-style profile into memory, answers section/key queries,
//! applies edits, and writes the file back while keeping its comments and
//! its original encoding.
//!
//! ## Architecture
//!
//! ```text
//! Caller
//!   |
//!   v
//! ┌───────────────────────────────────────────────┐
//! │                  PROFILE                      │
//! │                                               │
//! │ open()  → ByteStore read → parse.rs → Document│
//! │                                               │
//! │ read.rs  → get_string / _by_order / order_num │
//! │ write.rs → set_string / remove_section (+ord) │
//! │              |                                │
//! │              |  modified = true               │
//! │              v                                │
//! │ flush.rs → ByteStore truncate-write           │
//! │                                               │
//! │ close() → flush once, release everything      │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Module Responsibilities
//!
//! | Module       | Purpose                                              |
//! |--------------|------------------------------------------------------|
//! | `lib.rs`     | `Profile` struct, open/create/close, accessors, `Drop` |
//! | [`parse`]    | line classification and document construction        |
//! | [`read`]     | `get_string()`, `get_string_by_order()`, `get_order_num()` |
//! | [`write`]    | `set_string()`, `remove_section()` and order variants |
//! | [`flush`]    | serialization back to the byte store                 |
//! | [`store`]    | `ByteStore` trait and the filesystem implementation  |
//!
//! ## Example
//!
//! ```rust,no_run
//! use profile::Profile;
//!
//! let mut p = Profile::open("test.ini").unwrap();
//! p.set_string("Net", "port", "8080").unwrap();
//! assert_eq!(p.get_string("net", "PORT", 64).unwrap(), "8080");
//! p.close().unwrap();
//! ```
mod error;
mod flush;
pub mod parse;
mod read;
pub mod store;
mod validate;
mod write;

pub use codec::Encoding;
pub use document::{Document, Entry, MAX_STRING_LEN};
pub use error::{ProfileError, Result};
pub use store::{ByteStore, FsStore};

use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// An open profile document.
///
/// The whole file lives in memory between [`Profile::open`] and
/// [`Profile::close`]. Mutations only mark the document modified; nothing is
/// written until [`Profile::flush`] or `close`.
pub struct Profile<S: ByteStore = FsStore> {
    pub(crate) store: S,
    pub(crate) path: PathBuf,
    /// Fixed when the profile is opened or created.
    pub(crate) encoding: Encoding,
    pub(crate) doc: Document,
    pub(crate) modified: bool,
}

impl<S: ByteStore> std::fmt::Debug for Profile<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profile")
            .field("path", &self.path)
            .field("encoding", &self.encoding)
            .field("entries", &self.doc.len())
            .field("sections", &self.doc.section_names().count())
            .field("comments", &self.doc.comment_count())
            .field("modified", &self.modified)
            .finish()
    }
}

impl Profile<FsStore> {
    /// Opens and parses an existing profile on the local filesystem.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(FsStore, path)
    }

    /// Creates a new, empty wide-encoded profile on the local filesystem.
    ///
    /// Fails with [`ProfileError::AccessDenied`] if `path` already exists.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::create_with(FsStore, path)
    }
}

impl<S: ByteStore> Profile<S> {
    /// Opens and parses the profile at `path` through `store`.
    ///
    /// The encoding is taken from the first two bytes of the file. A read
    /// error anywhere in the file fails the whole open.
    pub fn open_with<P: AsRef<Path>>(store: S, path: P) -> Result<Self> {
        let path = validate::path(path.as_ref())?;

        let reader = store.open_read(&path)?;
        let (doc, encoding) = parse::parse_document(reader)?;

        debug!(
            path = %path.display(),
            ?encoding,
            entries = doc.len(),
            comments = doc.comment_count(),
            "opened profile"
        );

        Ok(Self {
            store,
            path,
            encoding,
            doc,
            modified: false,
        })
    }

    /// Creates an empty profile at `path` through `store`.
    ///
    /// The file is written immediately with just the wide-encoding marker, so
    /// it exists (and reopens as wide) even if nothing is ever added.
    pub fn create_with<P: AsRef<Path>>(store: S, path: P) -> Result<Self> {
        let path = validate::path(path.as_ref())?;

        if store.exists(&path)? {
            return Err(ProfileError::AccessDenied(path));
        }

        let encoding = Encoding::Wide;
        {
            let mut w = store.open_write_truncate(&path)?;
            encoding.write_marker(&mut w)?;
            w.flush()?;
        }

        debug!(path = %path.display(), "created profile");

        Ok(Self {
            store,
            path,
            encoding,
            doc: Document::new(),
            modified: false,
        })
    }

    /// Flushes pending changes and releases the document.
    ///
    /// The document is released even when the flush fails; the flush error is
    /// still returned.
    pub fn close(mut self) -> Result<()> {
        let res = self.flush();
        // the flush has had its one attempt; keep Drop from retrying it
        self.modified = false;
        res
    }

    /// Path the profile was opened or created with.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Returns `true` if there are changes not yet flushed.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Read-only view of the in-memory model.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.doc
    }
}

/// Best-effort flush on drop.
///
/// A `Profile` dropped without [`Profile::close`] still writes its pending
/// changes. Errors are logged and otherwise ignored because Drop cannot
/// propagate them.
impl<S: ByteStore> Drop for Profile<S> {
    fn drop(&mut self) {
        if self.modified {
            if let Err(e) = self.flush() {
                warn!(path = %self.path.display(), error = %e, "flush on drop failed");
            }
        }
    }
}

#[cfg(test)]
mod tests;
