use crate::store::{ByteStore, FsStore};
use crate::{Encoding, Profile};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path
}

pub fn wide_bytes(text: &str) -> Vec<u8> {
    let mut out = codec::BOM.to_vec();
    Encoding::Wide.encode_into(text, &mut out).unwrap();
    out
}

/// Writes `text` (narrow) to a fresh temp dir and opens it.
pub fn open_text(text: &str) -> (TempDir, Profile) {
    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "test.ini", text.as_bytes());
    let profile = Profile::open(&path).unwrap();
    (dir, profile)
}

/// Flushes and returns the raw file contents.
pub fn flushed<S: ByteStore>(p: &mut Profile<S>) -> Vec<u8> {
    p.flush().unwrap();
    fs::read(p.path()).unwrap()
}

/// `(lowercased section, occurrence, key, value)` for every key/value entry.
pub fn triples<S: ByteStore>(p: &Profile<S>) -> Vec<(String, usize, String, String)> {
    let mut out = Vec::new();
    let mut seen: Vec<String> = Vec::new();
    let mut occurrence = 0;
    for e in p.document().entries() {
        let name = e.section.to_ascii_lowercase();
        if e.is_header() {
            occurrence = seen.iter().filter(|s| **s == name).count();
            seen.push(name);
        } else {
            out.push((name, occurrence, e.key.clone(), e.value.clone()));
        }
    }
    out
}

/// Writer whose every write fails.
pub struct BrokenWriter;

impl Write for BrokenWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "disk full"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "disk full"))
    }
}

/// Reader that yields `head` and then fails.
pub struct BrokenReader {
    head: Vec<u8>,
}

impl Read for BrokenReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.head.is_empty() {
            return Err(io::Error::new(io::ErrorKind::Other, "device gone"));
        }
        let n = buf.len().min(self.head.len());
        buf[..n].copy_from_slice(&self.head[..n]);
        self.head.drain(..n);
        Ok(n)
    }
}

/// Reads from disk, fails every write.
pub struct FailingWrites;

impl ByteStore for FailingWrites {
    type Reader = File;
    type Writer = BrokenWriter;

    fn open_read(&self, path: &Path) -> io::Result<File> {
        FsStore.open_read(path)
    }

    fn open_write_truncate(&self, _path: &Path) -> io::Result<BrokenWriter> {
        Ok(BrokenWriter)
    }

    fn exists(&self, path: &Path) -> io::Result<bool> {
        FsStore.exists(path)
    }
}

/// Serves the first bytes of the file, then a read error.
pub struct FailingReads;

impl ByteStore for FailingReads {
    type Reader = BrokenReader;
    type Writer = File;

    fn open_read(&self, path: &Path) -> io::Result<BrokenReader> {
        let mut head = fs::read(path)?;
        head.truncate(8);
        Ok(BrokenReader { head })
    }

    fn open_write_truncate(&self, path: &Path) -> io::Result<File> {
        FsStore.open_write_truncate(path)
    }

    fn exists(&self, path: &Path) -> io::Result<bool> {
        FsStore.exists(path)
    }
}
