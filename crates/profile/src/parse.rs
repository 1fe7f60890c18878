/// Line classifier and parser: builds a [`Document`] from a byte stream.
///
/// Each physical line is trimmed and classified, first match wins:
///
/// ```text
/// ""                  -> blank      (ignored)
/// "# text"            -> comment    (attached to the next counted line)
/// "[ name ]"          -> section    (empty name -> "UNKNOWN")
/// "key = value # c"   -> key/value  (split on first '=', inline '#' cut)
/// anything else       -> ignored
/// ```
///
/// While building the document, names and values longer than
/// [`MAX_STRING_LEN`] units of the file's encoding are truncated silently.
use codec::{Encoding, LineReader};
use document::{trim, Document, DocumentBuilder, MAX_STRING_LEN, UNKNOWN_NAME};
use std::io::Read;
use tracing::trace;

use crate::Result;

/// Classification of one trimmed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    Comment(&'a str),
    Section(String),
    Pair { key: String, value: String },
    Other,
}

/// Classifies a single line of profile text.
pub fn classify(raw: &str) -> Line<'_> {
    let line = trim(raw);

    if line.is_empty() {
        return Line::Blank;
    }
    if line.starts_with('#') {
        return Line::Comment(line);
    }
    if let Some(rest) = line.strip_prefix('[') {
        if let Some(close) = rest.find(']') {
            return Line::Section(name_or_unknown(&rest[..close]));
        }
    }
    if let Some((key, value)) = line.split_once('=') {
        let mut value = trim(value);
        if let Some(hash) = value.find('#') {
            value = trim(&value[..hash]);
        }
        return Line::Pair {
            key: name_or_unknown(key),
            value: value.to_string(),
        };
    }
    Line::Other
}

fn name_or_unknown(raw: &str) -> String {
    let name = trim(raw);
    if name.is_empty() {
        UNKNOWN_NAME.to_string()
    } else {
        name.to_string()
    }
}

/// Reads a whole profile from `reader`.
///
/// # Errors
///
/// Any read error aborts the parse; the partially built document is dropped.
pub fn parse_document<R: Read>(reader: R) -> Result<(Document, Encoding)> {
    let lines = LineReader::new(reader)?;
    let encoding = lines.encoding();
    let bound = |text: String| {
        if encoding.unit_len(&text) > MAX_STRING_LEN {
            encoding.truncate(&text, MAX_STRING_LEN)
        } else {
            text
        }
    };
    let mut builder = DocumentBuilder::new();

    for raw in lines {
        let raw = raw?;
        match classify(&raw) {
            Line::Comment(text) => builder.comment(text),
            Line::Section(name) => builder.section(bound(name)),
            Line::Pair { key, value } => {
                if !builder.pair(bound(key), bound(value)) {
                    trace!(line = %raw, "dropping key/value line outside any section");
                }
            }
            Line::Blank | Line::Other => {}
        }
    }

    Ok((builder.finish(), encoding))
}
