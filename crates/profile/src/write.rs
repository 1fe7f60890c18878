/// Write path: `set_string()`, `remove_section()` and their order variants.
///
/// Every change happens in memory and sets `modified`; [`Profile::flush`]
/// persists it. New entries get `comment_no == 0`, so no parsed comment is
/// ever written in front of them.
///
/// Insertion policy when `key` is not present yet:
///
/// ```text
/// set_string          -> after the last entry of `section` seen anywhere
/// set_string_by_order -> after the last member of the order-th `section`
/// no such section     -> new "[section]" + "key=value" at the very end
/// ```
use document::Entry;
use tracing::trace;

use crate::store::ByteStore;
use crate::{validate, Profile, ProfileError, Result};

impl<S: ByteStore> Profile<S> {
    /// Sets `key` in `section` to `value`.
    ///
    /// An existing entry (first match in the whole document) is updated in
    /// place; an equal value (ignoring ASCII case) leaves the document
    /// unmodified.
    ///
    /// # Errors
    ///
    /// - [`ProfileError::InvalidParameter`] for a bad section, key, or value.
    /// - [`ProfileError::OutOfResources`] if memory for the change cannot be
    ///   reserved; the document is unchanged.
    pub fn set_string(&mut self, section: &str, key: &str, value: &str) -> Result<()> {
        let section = validate::name(self.encoding, section, "section")?;
        let key = validate::name(self.encoding, key, "key")?;
        let value = validate::value(self.encoding, value)?;

        // one pass: the match, or the last entry of the section seen before it
        let mut found = None;
        let mut last_in_section = None;
        for (idx, entry) in self.doc.entries().iter().enumerate() {
            if entry.in_section(section) {
                if entry.matches(section, key) {
                    found = Some(idx);
                    break;
                }
                last_in_section = Some(idx);
            }
        }

        match (found, last_in_section) {
            (Some(idx), _) => self.update_value(idx, value),
            (None, Some(prev)) => self.insert_pair(prev + 1, section, key, value),
            (None, None) => self.append_section(section, key, value),
        }
    }

    /// Sets `key` inside the `order`-th (zero-based) section named `section`.
    ///
    /// If that section does not exist, a new one is appended at the end of
    /// the document.
    pub fn set_string_by_order(
        &mut self,
        order: usize,
        section: &str,
        key: &str,
        value: &str,
    ) -> Result<()> {
        let section = validate::name(self.encoding, section, "section")?;
        let key = validate::name(self.encoding, key, "key")?;
        let value = validate::value(self.encoding, value)?;

        let Some(header) = self.doc.find_section(section, order) else {
            return self.append_section(section, key, value);
        };

        match self.doc.find_pair_in(header, section, key) {
            Some(idx) => self.update_value(idx, value),
            None => {
                let end = self.doc.section_end(header);
                self.insert_pair(end, section, key, value)
            }
        }
    }

    /// Removes every section named `section`, with all members and comments.
    ///
    /// # Errors
    ///
    /// [`ProfileError::NotFound`] if nothing was removed.
    pub fn remove_section(&mut self, section: &str) -> Result<()> {
        let section = validate::name(self.encoding, section, "section")?;

        let removed = self.doc.remove_section_entries(section);
        if removed == 0 {
            return Err(ProfileError::NotFound);
        }
        trace!(section, removed, "removed section");
        self.modified = true;
        Ok(())
    }

    /// Removes only the `order`-th section named `section`: its header, the
    /// members up to the next header, and their comments.
    pub fn remove_section_by_order(&mut self, order: usize, section: &str) -> Result<()> {
        let section = validate::name(self.encoding, section, "section")?;

        let header = self
            .doc
            .find_section(section, order)
            .ok_or(ProfileError::NotFound)?;
        let end = self.doc.section_end(header);
        let removed = self.doc.remove_span(header..end);
        trace!(section, order, removed, "removed section occurrence");
        self.modified = true;
        Ok(())
    }

    fn update_value(&mut self, idx: usize, value: &str) -> Result<()> {
        let Some(entry) = self.doc.entry_mut(idx) else {
            return Err(ProfileError::NotFound);
        };
        if entry.value.eq_ignore_ascii_case(value) {
            return Ok(());
        }
        entry.value = owned(value)?;
        self.modified = true;
        Ok(())
    }

    fn insert_pair(&mut self, at: usize, section: &str, key: &str, value: &str) -> Result<()> {
        let entry = Entry::pair(owned(section)?, owned(key)?, owned(value)?, 0);
        self.doc
            .try_reserve(1)
            .map_err(|_| ProfileError::OutOfResources)?;
        self.doc.insert(at, entry);
        trace!(section, key, at, "inserted key into existing section");
        self.modified = true;
        Ok(())
    }

    fn append_section(&mut self, section: &str, key: &str, value: &str) -> Result<()> {
        let header = Entry::header(owned(section)?, 0);
        let pair = Entry::pair(owned(section)?, owned(key)?, owned(value)?, 0);
        self.doc
            .try_reserve(2)
            .map_err(|_| ProfileError::OutOfResources)?;
        self.doc.push(header);
        self.doc.push(pair);
        trace!(section, key, "appended new section");
        self.modified = true;
        Ok(())
    }
}

/// Copies `s` into a new `String`, reporting allocation failure instead of
/// aborting.
fn owned(s: &str) -> Result<String> {
    let mut out = String::new();
    out.try_reserve_exact(s.len())
        .map_err(|_| ProfileError::OutOfResources)?;
    out.push_str(s);
    Ok(out)
}
