//! # Codec - Profile Text Encodings
//!
//! Turns the raw bytes of a profile file into lines of text and back.
//!
//! A profile is stored in one of two encodings, chosen once when the file is
//! opened (or created) and kept for the life of the document:
//!
//! | Encoding | Marker         | Unit       | Character mapping        |
//! |----------|----------------|------------|--------------------------|
//! | Narrow   | none           | 1 byte     | one byte per character   |
//! | Wide     | `FF FE` prefix | 2 bytes LE | UTF-16 code units        |
//!
//! ## Line splitting
//!
//! ```text
//! "[A]\r\nx=1\ny=2\rz=3"  ->  "[A]" | "x=1" | "y=2" | "z=3"
//! ```
//!
//! Lines end at LF, CR, or CRLF. The final line does not need a terminator.
//! A line longer than [`MAX_LINE_LEN`]` - 1` units is cut, and the rest of it
//! is returned as the following line.
//!
//! ## Example
//!
//! ```rust
//! use codec::{Encoding, LineReader};
//!
//! let mut r = LineReader::new(&b"[A]\r\nx=1"[..]).unwrap();
//! assert_eq!(r.encoding(), Encoding::Narrow);
//! assert_eq!(r.next_line().unwrap().as_deref(), Some("[A]"));
//! assert_eq!(r.next_line().unwrap().as_deref(), Some("x=1"));
//! assert_eq!(r.next_line().unwrap(), None);
//! ```

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, BufReader, Read, Write};

/// Byte-order marker that selects the wide encoding (UTF-16 little-endian).
pub const BOM: [u8; 2] = [0xFF, 0xFE];

/// Maximum physical line length in units (bytes narrow, code units wide).
pub const MAX_LINE_LEN: usize = 512;

/// Terminator written after every line.
pub const LINE_TERMINATOR: &str = "\r\n";

const LF: u16 = b'\n' as u16;
const CR: u16 = b'\r' as u16;

/// Character encoding of a profile document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Single-byte text, one byte per character (`0x00..=0xFF`).
    Narrow,
    /// UTF-16LE text preceded by [`BOM`].
    Wide,
}

impl Encoding {
    /// Length of `text` in units: characters for narrow, UTF-16 code units
    /// for wide.
    #[must_use]
    pub fn unit_len(self, text: &str) -> usize {
        text.chars().map(|c| self.char_units(c)).sum()
    }

    /// Copies the longest prefix of `text` that fits in `max` units. A
    /// surrogate pair is never split.
    #[must_use]
    pub fn truncate(self, text: &str, max: usize) -> String {
        let mut used = 0;
        for (idx, c) in text.char_indices() {
            used += self.char_units(c);
            if used > max {
                return text[..idx].to_string();
            }
        }
        text.to_string()
    }

    fn char_units(self, c: char) -> usize {
        match self {
            Encoding::Narrow => 1,
            Encoding::Wide => c.len_utf16(),
        }
    }

    /// Returns `true` if `c` has a representation in this encoding.
    #[must_use]
    pub fn can_encode(self, c: char) -> bool {
        match self {
            Encoding::Narrow => (c as u32) <= 0xFF,
            Encoding::Wide => true,
        }
    }

    /// Appends the encoded form of `text` to `out`.
    ///
    /// Fails with `InvalidInput` if a character cannot be represented
    /// (only possible for [`Encoding::Narrow`]). `out` may hold a partial
    /// encoding in that case.
    pub fn encode_into(self, text: &str, out: &mut Vec<u8>) -> io::Result<()> {
        match self {
            Encoding::Narrow => {
                for c in text.chars() {
                    let code = c as u32;
                    if code > 0xFF {
                        return Err(io::Error::new(
                            io::ErrorKind::InvalidInput,
                            format!("character {:?} has no narrow encoding", c),
                        ));
                    }
                    out.push(code as u8);
                }
            }
            Encoding::Wide => {
                for unit in text.encode_utf16() {
                    out.write_u16::<LittleEndian>(unit)?;
                }
            }
        }
        Ok(())
    }

    /// Appends `text` followed by [`LINE_TERMINATOR`] to `out`.
    pub fn encode_line(self, text: &str, out: &mut Vec<u8>) -> io::Result<()> {
        self.encode_into(text, out)?;
        self.encode_into(LINE_TERMINATOR, out)
    }

    /// Writes the encoding marker, if this encoding has one.
    pub fn write_marker<W: Write>(self, w: &mut W) -> io::Result<()> {
        if self == Encoding::Wide {
            w.write_all(&BOM)?;
        }
        Ok(())
    }

    fn decode(self, units: &[u16]) -> String {
        match self {
            Encoding::Narrow => units.iter().map(|&u| char::from(u as u8)).collect(),
            Encoding::Wide => char::decode_utf16(units.iter().copied())
                .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
                .collect(),
        }
    }
}

/// Splits a byte stream into decoded lines.
///
/// The encoding is detected from the first two bytes when the reader is
/// constructed. The reader is generic over any `Read` implementor, so it
/// works with files as well as in-memory buffers.
pub struct LineReader<R: Read> {
    rdr: BufReader<R>,
    encoding: Encoding,
    /// Units read ahead of the current position, consumed last-in first-out.
    pushback: Vec<u16>,
    /// Reusable buffer for the line being assembled.
    units: Vec<u16>,
    finished: bool,
}

impl<R: Read> LineReader<R> {
    /// Wraps `reader`, consuming the BOM if present.
    ///
    /// # Errors
    ///
    /// Propagates any I/O error raised while probing the first two bytes.
    pub fn new(reader: R) -> io::Result<Self> {
        let mut rdr = BufReader::new(reader);
        let mut probe = [0u8; 2];
        let n = read_up_to(&mut rdr, &mut probe)?;

        let (encoding, pushback) = if n == 2 && probe == BOM {
            (Encoding::Wide, Vec::new())
        } else {
            // not a marker: the probed bytes are ordinary narrow text
            let pushback = probe[..n].iter().rev().map(|&b| u16::from(b)).collect();
            (Encoding::Narrow, pushback)
        };

        Ok(Self {
            rdr,
            encoding,
            pushback,
            units: Vec::with_capacity(MAX_LINE_LEN),
            finished: false,
        })
    }

    /// Encoding detected from the stream prefix.
    #[must_use]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Returns the next line without its terminator, or `None` once the stream
    /// is exhausted.
    ///
    /// The text after the last terminator is always returned as a final line,
    /// even when empty.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        if self.finished {
            return Ok(None);
        }
        self.units.clear();

        loop {
            match self.read_unit()? {
                None => {
                    self.finished = true;
                    break;
                }
                Some(LF) => break,
                Some(CR) => {
                    // swallow the LF of a CRLF pair
                    match self.read_unit()? {
                        Some(LF) | None => {}
                        Some(other) => self.pushback.push(other),
                    }
                    break;
                }
                Some(unit) => {
                    self.units.push(unit);
                    if self.units.len() >= MAX_LINE_LEN - 1 {
                        break;
                    }
                }
            }
        }

        Ok(Some(self.encoding.decode(&self.units)))
    }

    fn read_unit(&mut self) -> io::Result<Option<u16>> {
        if let Some(unit) = self.pushback.pop() {
            return Ok(Some(unit));
        }
        let res = match self.encoding {
            Encoding::Narrow => self.rdr.read_u8().map(u16::from),
            // a dangling odd byte at the end is dropped with the EOF
            Encoding::Wide => self.rdr.read_u16::<LittleEndian>(),
        };
        match res {
            Ok(unit) => Ok(Some(unit)),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl<R: Read> Iterator for LineReader<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

/// Reads until `buf` is full or the stream ends, returning the byte count.
fn read_up_to<R: Read>(r: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
