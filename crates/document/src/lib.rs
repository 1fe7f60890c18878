//! # Document - In-Memory Profile Model
//!
//! Ordered model of a parsed profile: a sequence of [`Entry`] values
//! (section headers and key/value pairs, in file order) plus the comment
//! lines that were attached to them.
//!
//! ```text
//!  entries                              comments
//! ┌────┬───────────┬───────┬───────┐   ┌────┬──────────────┐
//! │ no │ section   │ key   │ value │   │ no │ text         │
//! ├────┼───────────┼───────┼───────┤   ├────┼──────────────┤
//! │ 1  │ Net       │       │       │◄──│ 1  │ # network    │
//! │ 2  │ Net       │ port  │ 80    │   │ 4  │ # trailing   │
//! │ 3  │ Net       │ host  │ a.b   │   └────┴──────────────┘
//! └────┴───────────┴───────┴───────┘
//! ```
//!
//! A header is an entry with an empty key. Every entry after a header and
//! before the next one belongs to that header's section. Section names and
//! keys compare with ASCII case folding; the stored text keeps its case.
//!
//! Comments are keyed by the `comment_no` of the entry they precede. Ids
//! larger than every entry's id belong to the end of the file.

mod builder;
mod locate;

pub use builder::DocumentBuilder;

use std::collections::{BTreeMap, TryReserveError};
use std::ops::{Bound, Range};

/// Maximum length, in encoding units, of a section name, key, or value.
pub const MAX_STRING_LEN: usize = 250;

/// Name substituted for an empty section name or key while parsing.
pub const UNKNOWN_NAME: &str = "UNKNOWN";

/// Trims spaces and line terminators from both ends of `s`.
///
/// Tabs are kept: the profile dialect only treats spaces as padding.
#[must_use]
pub fn trim(s: &str) -> &str {
    s.trim_matches(|c| c == ' ' || c == '\r' || c == '\n')
}

/// A section header or a key/value line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Sequence id linking the entry to the comments written before it.
    /// Entries added after parsing use `0`.
    pub comment_no: u32,
    pub section: String,
    /// Empty for a section header.
    pub key: String,
    /// Empty for a section header.
    pub value: String,
}

impl Entry {
    pub fn header(section: impl Into<String>, comment_no: u32) -> Self {
        Self {
            comment_no,
            section: section.into(),
            key: String::new(),
            value: String::new(),
        }
    }

    pub fn pair(
        section: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
        comment_no: u32,
    ) -> Self {
        Self {
            comment_no,
            section: section.into(),
            key: key.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn is_header(&self) -> bool {
        self.key.is_empty()
    }

    /// Case-insensitive section name comparison.
    #[must_use]
    pub fn in_section(&self, section: &str) -> bool {
        self.section.eq_ignore_ascii_case(section)
    }

    /// Case-insensitive section + key comparison. Never true for a header
    /// unless `key` is empty.
    #[must_use]
    pub fn matches(&self, section: &str, key: &str) -> bool {
        self.in_section(section) && self.key.eq_ignore_ascii_case(key)
    }
}

/// Entries and comments of one profile, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    entries: Vec<Entry>,
    comments: BTreeMap<u32, Vec<String>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries in document order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry(&self, idx: usize) -> Option<&Entry> {
        self.entries.get(idx)
    }

    pub fn entry_mut(&mut self, idx: usize) -> Option<&mut Entry> {
        self.entries.get_mut(idx)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends an entry at the end of the document.
    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Inserts an entry before position `idx` (`idx == len()` appends).
    ///
    /// # Panics
    ///
    /// Panics if `idx > len()`.
    pub fn insert(&mut self, idx: usize, entry: Entry) {
        self.entries.insert(idx, entry);
    }

    /// Reserves room for `additional` more entries without aborting on
    /// allocation failure.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.entries.try_reserve(additional)
    }

    /// Attaches a comment line to `comment_no`.
    pub fn push_comment(&mut self, comment_no: u32, text: impl Into<String>) {
        self.comments.entry(comment_no).or_default().push(text.into());
    }

    /// Comments attached to `comment_no`, in file order.
    pub fn comments_for(&self, comment_no: u32) -> &[String] {
        self.comments
            .get(&comment_no)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Comments whose id is strictly greater than `comment_no`, ordered by id.
    pub fn comments_after(&self, comment_no: u32) -> impl Iterator<Item = &str> {
        self.comments
            .range((Bound::Excluded(comment_no), Bound::Unbounded))
            .flat_map(|(_, texts)| texts.iter().map(String::as_str))
    }

    /// Total number of comment lines.
    pub fn comment_count(&self) -> usize {
        self.comments.values().map(Vec::len).sum()
    }

    /// Highest `comment_no` carried by any entry, `0` for an empty document.
    pub fn max_comment_no(&self) -> u32 {
        self.entries.iter().map(|e| e.comment_no).max().unwrap_or(0)
    }

    /// Removes every entry in `section` (header and members, wherever they
    /// appear) together with their comments. Returns the number removed.
    pub fn remove_section_entries(&mut self, section: &str) -> usize {
        let before = self.entries.len();
        let mut dropped_ids = Vec::new();
        self.entries.retain(|e| {
            if e.in_section(section) {
                dropped_ids.push(e.comment_no);
                false
            } else {
                true
            }
        });
        for id in dropped_ids {
            self.comments.remove(&id);
        }
        before - self.entries.len()
    }

    /// Removes the entries in `span` together with their comments.
    ///
    /// # Panics
    ///
    /// Panics if `span` is out of bounds.
    pub fn remove_span(&mut self, span: Range<usize>) -> usize {
        let removed: Vec<Entry> = self.entries.drain(span).collect();
        for e in &removed {
            self.comments.remove(&e.comment_no);
        }
        removed.len()
    }
}

#[cfg(test)]
mod tests;
