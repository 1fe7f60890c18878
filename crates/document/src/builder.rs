use crate::{Document, Entry};

/// Append-only construction of a [`Document`] from classified lines.
///
/// Carries the parser state between lines: the current section, whether any
/// header has been seen yet, and the running comment sequence number. Every
/// comment receives the number of the next header or key/value line, so the
/// serializer can write it back in front of that line.
#[derive(Debug)]
pub struct DocumentBuilder {
    doc: Document,
    current_section: String,
    section_found: bool,
    comment_no: u32,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self {
            doc: Document::new(),
            current_section: String::new(),
            section_found: false,
            comment_no: 1,
        }
    }

    /// Records a comment line (text including the leading `#`).
    pub fn comment(&mut self, text: &str) {
        self.doc.push_comment(self.comment_no, text);
    }

    /// Starts a new section.
    pub fn section(&mut self, name: String) {
        self.doc.push(Entry::header(name.clone(), self.comment_no));
        self.current_section = name;
        self.section_found = true;
        self.comment_no += 1;
    }

    /// Adds a key/value pair to the current section.
    ///
    /// Returns `false` when no section has been started; the pair is dropped
    /// but still consumes a sequence number.
    pub fn pair(&mut self, key: String, value: String) -> bool {
        let kept = self.section_found;
        if kept {
            self.doc.push(Entry::pair(
                self.current_section.clone(),
                key,
                value,
                self.comment_no,
            ));
        }
        self.comment_no += 1;
        kept
    }

    /// Sequence number the next header or pair will receive.
    pub fn comment_no(&self) -> u32 {
        self.comment_no
    }

    pub fn finish(self) -> Document {
        self.doc
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}
