/// Read path: `get_string()`, `get_string_by_order()`, `get_order_num()`.
///
/// Lookups never touch the byte store. The capacity-based getters follow the
/// fixed-buffer contract of the profile API: a value of `n` characters needs
/// a capacity of at least `n + 1`; a smaller capacity yields the prefix that
/// fits plus the required size.
use crate::store::ByteStore;
use crate::{validate, Profile, ProfileError, Result};

impl<S: ByteStore> Profile<S> {
    /// Returns the value of `key` in the first matching `section`, searching
    /// the whole document regardless of duplicate section names.
    ///
    /// # Errors
    ///
    /// - [`ProfileError::InvalidParameter`] for a bad name or zero capacity.
    /// - [`ProfileError::NotFound`] if no entry matches.
    /// - [`ProfileError::BufferTooSmall`] if the value needs more than
    ///   `capacity` (terminator included).
    pub fn get_string(&self, section: &str, key: &str, capacity: usize) -> Result<String> {
        let section = validate::name(self.encoding, section, "section")?;
        let key = validate::name(self.encoding, key, "key")?;
        let capacity = validate::capacity(capacity)?;

        let idx = self
            .doc
            .find_pair(section, key)
            .ok_or(ProfileError::NotFound)?;
        fit(&self.doc.entries()[idx].value, capacity)
    }

    /// Like [`get_string`](Profile::get_string) but only looks inside the
    /// `order`-th (zero-based) section named `section`.
    pub fn get_string_by_order(
        &self,
        order: usize,
        section: &str,
        key: &str,
        capacity: usize,
    ) -> Result<String> {
        let section = validate::name(self.encoding, section, "section")?;
        let key = validate::name(self.encoding, key, "key")?;
        let capacity = validate::capacity(capacity)?;

        let header = self
            .doc
            .find_section(section, order)
            .ok_or(ProfileError::NotFound)?;
        let idx = self
            .doc
            .find_pair_in(header, section, key)
            .ok_or(ProfileError::NotFound)?;
        fit(&self.doc.entries()[idx].value, capacity)
    }

    /// Number of sections named `section` (case-insensitive).
    pub fn get_order_num(&self, section: &str) -> Result<usize> {
        let section = validate::name(self.encoding, section, "section")?;
        Ok(self.doc.count_sections(section))
    }

    /// Value of `key` in the first matching `section`, without capacity
    /// handling.
    pub fn value(&self, section: &str, key: &str) -> Option<&str> {
        let (section, key) = (document::trim(section), document::trim(key));
        self.doc
            .find_pair(section, key)
            .map(|i| self.doc.entries()[i].value.as_str())
    }

    /// Value of `key` inside the `order`-th section named `section`.
    pub fn value_by_order(&self, order: usize, section: &str, key: &str) -> Option<&str> {
        let (section, key) = (document::trim(section), document::trim(key));
        let header = self.doc.find_section(section, order)?;
        self.doc
            .find_pair_in(header, section, key)
            .map(|i| self.doc.entries()[i].value.as_str())
    }

    /// Section names in document order, duplicates included.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.doc.section_names()
    }
}

fn fit(value: &str, capacity: usize) -> Result<String> {
    let len = value.chars().count();
    if len < capacity {
        return Ok(value.to_string());
    }
    Err(ProfileError::BufferTooSmall {
        partial: value.chars().take(capacity - 1).collect(),
        required: len + 1,
    })
}
