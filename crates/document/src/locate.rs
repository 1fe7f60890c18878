//! Section locator: header-to-header navigation over the entry list.
//!
//! All lookups are linear scans. Duplicate section names are addressed by a
//! zero-based *order*: the Nth header with that name in document order.

use std::ops::Range;

use crate::{Document, Entry};

impl Document {
    /// Index of the first header after `idx`, skipping key/value entries.
    pub fn next_section(&self, idx: usize) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .skip(idx + 1)
            .find(|(_, e)| e.is_header())
            .map(|(i, _)| i)
    }

    /// Index of the first header in the document.
    pub fn first_section(&self) -> Option<usize> {
        self.entries.iter().position(Entry::is_header)
    }

    /// Index of the `order`-th header named `section` (case-insensitive).
    pub fn find_section(&self, section: &str, order: usize) -> Option<usize> {
        self.section_indices(section).nth(order)
    }

    /// Number of headers named `section`.
    pub fn count_sections(&self, section: &str) -> usize {
        self.section_indices(section).count()
    }

    /// Exclusive end of the section that starts at `header`: the next header
    /// or the end of the document.
    pub fn section_end(&self, header: usize) -> usize {
        self.next_section(header).unwrap_or(self.entries.len())
    }

    /// Member entries of the section whose header is at `header`.
    pub fn members(&self, header: usize) -> Range<usize> {
        header + 1..self.section_end(header)
    }

    /// First entry anywhere in the document matching `section` + `key`.
    pub fn find_pair(&self, section: &str, key: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.matches(section, key))
    }

    /// First member of the section at `header` matching `section` + `key`.
    pub fn find_pair_in(&self, header: usize, section: &str, key: &str) -> Option<usize> {
        self.members(header)
            .find(|&i| self.entries[i].matches(section, key))
    }

    /// Header names in document order, duplicates included.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| e.is_header())
            .map(|e| e.section.as_str())
    }

    fn section_indices<'a>(&'a self, section: &'a str) -> impl Iterator<Item = usize> + 'a {
        std::iter::successors(self.first_section(), move |&i| self.next_section(i))
            .filter(move |&i| self.entries[i].in_section(section))
    }
}
