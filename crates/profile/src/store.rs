//! Byte store: where profile bytes come from and go to.
//!
//! The profile never holds a handle across calls. `open`, `create` and
//! `flush` each acquire a reader or writer, use it, and drop it.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;

/// Source and sink of raw profile bytes.
pub trait ByteStore {
    type Reader: Read;
    type Writer: Write;

    /// Opens `path` for sequential reading.
    fn open_read(&self, path: &Path) -> io::Result<Self::Reader>;

    /// Opens `path` for writing, creating it if needed and discarding any
    /// previous content.
    fn open_write_truncate(&self, path: &Path) -> io::Result<Self::Writer>;

    /// Returns `true` if something already exists at `path`.
    fn exists(&self, path: &Path) -> io::Result<bool>;
}

/// [`ByteStore`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl ByteStore for FsStore {
    type Reader = File;
    type Writer = File;

    fn open_read(&self, path: &Path) -> io::Result<File> {
        File::open(path)
    }

    fn open_write_truncate(&self, path: &Path) -> io::Result<File> {
        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
    }

    fn exists(&self, path: &Path) -> io::Result<bool> {
        path.try_exists()
    }
}
