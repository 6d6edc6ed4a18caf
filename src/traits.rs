//! Traits for reading source resources into a [`LocalizationMap`] and writing it back out.

use std::io::{BufRead, Cursor, Write};

use crate::{error::Error, types::LocalizationMap};

/// Reads one localization file into a [`LocalizationMap`].
///
/// # Example
///
/// ```rust
/// use localization_converter::{formats::AndroidStringsParser, traits::Parser};
/// let map = AndroidStringsParser.parse(r#"<resources><string name="ok">Done</string></resources>"#)?;
/// assert_eq!(map.len(), 1);
/// # Ok::<(), localization_converter::Error>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn parse_reader<R: BufRead>(&self, reader: R) -> Result<LocalizationMap, Error>;

    /// Parse from a string.
    fn parse(&self, text: &str) -> Result<LocalizationMap, Error> {
        self.parse_reader(Cursor::new(text))
    }

    /// Parse from bytes.
    fn parse_bytes(&self, bytes: &[u8]) -> Result<LocalizationMap, Error> {
        self.parse_reader(Cursor::new(bytes))
    }
}

/// Serializes a [`LocalizationMap`] into one output file.
pub trait Formatter {
    /// Write to any writer (file, memory, etc.).
    fn write_to<W: Write>(&self, map: &LocalizationMap, writer: W) -> Result<(), Error>;

    /// Format into an owned UTF-8 buffer.
    fn format(&self, map: &LocalizationMap) -> Result<Vec<u8>, Error> {
        let mut buffer = Vec::new();
        self.write_to(map, &mut buffer)?;
        Ok(buffer)
    }
}
