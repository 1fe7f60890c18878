/// Serializer: writes the in-memory document back through the byte store.
///
/// Output layout for each entry, in document order:
///
/// ```text
/// <blank line>          only before a header that is not the first one
/// # comment ...         comments carrying the entry's comment_no
/// [section]  | key=value
/// ```
///
/// followed by the trailing comments (ids above every entry's id). Every line
/// ends with CRLF and is encoded in the document's encoding; wide documents
/// start with the BOM.
use std::io::{BufWriter, Write};

use codec::Encoding;
use document::Document;
use tracing::debug;

use crate::store::ByteStore;
use crate::{Profile, Result};

impl<S: ByteStore> Profile<S> {
    /// Writes the document if it has unflushed changes.
    ///
    /// A no-op when nothing changed. On failure the error from the store is
    /// returned unchanged and the document stays modified, so the caller can
    /// retry.
    pub fn flush(&mut self) -> Result<()> {
        if !self.modified {
            return Ok(());
        }

        let file = self.store.open_write_truncate(&self.path)?;
        let mut w = BufWriter::new(file);
        write_document(&mut w, &self.doc, self.encoding)?;
        w.flush()?;

        self.modified = false;
        debug!(
            path = %self.path.display(),
            entries = self.doc.len(),
            "flushed profile"
        );
        Ok(())
    }

    /// Renders the document as it would be flushed, lines joined by CRLF.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in render_lines(&self.doc) {
            out.push_str(&line);
            out.push_str(codec::LINE_TERMINATOR);
        }
        out
    }
}

/// Encodes `doc` into `w`, marker first.
pub(crate) fn write_document<W: Write>(
    w: &mut W,
    doc: &Document,
    encoding: Encoding,
) -> Result<()> {
    encoding.write_marker(w)?;

    // Reusable buffer to avoid allocation per line
    let mut buf = Vec::with_capacity(256);
    for line in render_lines(doc) {
        buf.clear();
        encoding.encode_line(&line, &mut buf)?;
        w.write_all(&buf)?;
    }
    Ok(())
}

/// Output lines of `doc` without terminators.
pub(crate) fn render_lines(doc: &Document) -> Vec<String> {
    let mut lines = Vec::with_capacity(doc.len() + doc.comment_count());
    let mut first_header = true;

    for entry in doc.entries() {
        if entry.is_header() {
            if first_header {
                first_header = false;
            } else {
                lines.push(String::new());
            }
        }

        lines.extend(doc.comments_for(entry.comment_no).iter().cloned());

        if entry.is_header() {
            lines.push(format!("[{}]", entry.section));
        } else {
            lines.push(format!("{}={}", entry.key, entry.value));
        }
    }

    lines.extend(doc.comments_after(doc.max_comment_no()).map(str::to_string));
    lines
}
