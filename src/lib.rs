#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::style,
    clippy::pedantic
)]

//! Reads, edits and writes INI configuration files.
//!
//! ```rust
//! let mut ini: ini::Ini = "[server]\nip = 127.0.0.1\nport = 8080\n".parse().unwrap();
//!
//! assert_eq!(ini.get("server", "port"), Ok("8080"));
//!
//! ini.set("database", "host", "localhost");
//! assert_eq!(ini.to_string(), "[server]\nip=127.0.0.1\nport=8080\n\n[database]\nhost=localhost\n\n");
//! ```

mod error;
mod options;
mod parser;
mod section;
mod writer;

use std::fs;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;

pub use error::{LookupError, ParseError, SaveError};
pub use options::{DuplicateKeys, ParseOptions, RedeclaredSections, SplitMode};
pub use section::Section;

/// Byte Order Mark (BOM) is used to signal the encoding of a text file.
///
/// <https://en.wikipedia.org/wiki/Byte_order_mark>
const BOM_UTF8: &[u8] = &[0xEF, 0xBB, 0xBF];
const BOM_UTF16_LE: &[u8] = &[0xFF, 0xFE];

/// An INI document: sections in the order they were first declared, each holding its
/// entries in the order they were first defined.
///
/// Two documents are equal when they hold the same sections with the same entries,
/// regardless of order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ini {
    pub(crate) sections: IndexMap<String, Section>,
}

impl Ini {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses raw bytes with the default [`ParseOptions`].
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        ParseOptions::default().parse(buffer)
    }

    pub fn from_reader<R>(reader: &mut R) -> Result<Self, ParseError>
    where
        R: Read,
    {
        ParseOptions::default().parse_reader(reader)
    }

    /// Reads and parses the file at `path` with the default [`ParseOptions`].
    pub fn load<P>(path: P) -> Result<Self, ParseError>
    where
        P: AsRef<Path>,
    {
        ParseOptions::default().load(path)
    }

    /// Writes the document to `path`, which must have an `.ini` extension.
    pub fn save<P>(&self, path: P) -> Result<(), SaveError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();

        if !path.extension().is_some_and(|ext| ext == "ini") {
            return Err(SaveError::InvalidExtension {
                path: path.to_path_buf(),
            });
        }

        log::debug!("saving {} section(s) to {}", self.sections.len(), path.display());
        fs::write(path, self.to_string())?;

        Ok(())
    }

    /// Looks up a value. An entry with an empty value is found, not missing.
    pub fn get(&self, section: &str, key: &str) -> Result<&str, LookupError> {
        let found = self
            .sections
            .get(section)
            .ok_or_else(|| LookupError::SectionNotFound {
                section: section.to_owned(),
            })?;

        found.get(key).ok_or_else(|| LookupError::KeyNotFound {
            section: section.to_owned(),
            key: key.to_owned(),
        })
    }

    /// Inserts or overwrites a value, creating the section when needed.
    ///
    /// Section, key and value are trimmed like the parser trims them. Input that could not
    /// be written back as a single line of INI text is logged and ignored: an empty key, a
    /// line break anywhere, a key containing `=` or starting with `;` or `#`, and a `[` key
    /// whose value ends with `]`.
    pub fn set<S, K, V>(&mut self, section: S, key: K, value: V)
    where
        S: AsRef<str>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let (section, key, value) = (
            section.as_ref().trim(),
            key.as_ref().trim(),
            value.as_ref().trim(),
        );

        if let Some(reason) = unwritable(section, key, value) {
            log::warn!("ignoring key {key:?} in section [{section}]: {reason}");
            return;
        }

        self.sections
            .entry(section.to_owned())
            .or_insert_with(|| Section::new(section.to_owned()))
            .insert(key.to_owned(), value.to_owned());
    }

    pub fn section_names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// A read-only view of every section. Use [`Ini::set`] to make changes.
    pub fn sections(&self) -> impl ExactSizeIterator<Item = &Section> {
        self.sections.values()
    }

    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl FromStr for Ini {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParseOptions::default().parse_str(s)
    }
}

/// Explains why an entry would not survive being written out and parsed again.
fn unwritable(section: &str, key: &str, value: &str) -> Option<&'static str> {
    let has_line_break = |s: &str| s.contains(['\n', '\r']);

    if key.is_empty() {
        Some("key is empty")
    } else if has_line_break(section) || has_line_break(key) || has_line_break(value) {
        Some("line breaks cannot be written")
    } else if key.contains('=') {
        Some("key contains `=`")
    } else if key.starts_with([';', '#']) {
        Some("key would be read as a comment")
    } else if key.starts_with('[') && value.ends_with(']') {
        Some("entry would be read as a section header")
    } else {
        None
    }
}

pub(crate) fn decode_data(data: &[u8]) -> String {
    if let Some(data) = data.strip_prefix(BOM_UTF8) {
        String::from_utf8_lossy(data).into_owned()
    } else if let Some(data) = data.strip_prefix(BOM_UTF16_LE) {
        let utf16 = data
            .chunks_exact(2)
            .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
            .collect::<Vec<u16>>();

        char::decode_utf16(utf16)
            .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect::<String>()
    } else {
        String::from_utf8_lossy(data).into_owned()
    }
}
