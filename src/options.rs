use std::fs;
use std::io::Read;
use std::path::Path;

use crate::error::ParseError;
use crate::parser::Parser;
use crate::{Ini, decode_data};

/// What happens when a key appears twice in the same section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicateKeys {
    /// Fail with [`ParseError::DuplicateKey`].
    #[default]
    Reject,
    /// The last definition wins.
    Overwrite,
}

/// What happens when a section header names a section that was already opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RedeclaredSections {
    /// Continue adding entries to the existing section.
    #[default]
    Merge,
    /// Discard the existing entries and start the section over.
    Replace,
}

/// How an entry line is split into key and value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SplitMode {
    /// Split on the first `=`; the value may contain more of them.
    #[default]
    FirstEquals,
    /// The line must contain exactly one `=`.
    SingleEquals,
}

/// Configures how INI text is parsed.
///
/// The defaults are strict: duplicate keys are rejected, only `;` starts a comment, and
/// values may contain `=`.
///
/// ```rust
/// use ini::{DuplicateKeys, ParseOptions};
///
/// let ini = ParseOptions::new()
///     .duplicate_keys(DuplicateKeys::Overwrite)
///     .comment_prefixes([';', '#'])
///     .parse_str("[a]\n# note\nx = 1\nx = 2\n")
///     .unwrap();
///
/// assert_eq!(ini.get("a", "x"), Ok("2"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    pub(crate) duplicate_keys: DuplicateKeys,
    pub(crate) redeclared_sections: RedeclaredSections,
    pub(crate) comment_prefixes: Vec<char>,
    pub(crate) split: SplitMode,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            duplicate_keys: DuplicateKeys::default(),
            redeclared_sections: RedeclaredSections::default(),
            comment_prefixes: vec![';'],
            split: SplitMode::default(),
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last write wins on duplicate keys, and both `;` and `#` start comments.
    #[must_use]
    pub fn permissive() -> Self {
        Self::new()
            .duplicate_keys(DuplicateKeys::Overwrite)
            .comment_prefixes([';', '#'])
    }

    #[must_use]
    pub fn duplicate_keys(mut self, policy: DuplicateKeys) -> Self {
        self.duplicate_keys = policy;
        self
    }

    #[must_use]
    pub fn redeclared_sections(mut self, policy: RedeclaredSections) -> Self {
        self.redeclared_sections = policy;
        self
    }

    #[must_use]
    pub fn comment_prefixes<I>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        self.comment_prefixes = prefixes.into_iter().collect();
        self
    }

    #[must_use]
    pub fn split(mut self, mode: SplitMode) -> Self {
        self.split = mode;
        self
    }

    pub(crate) fn is_comment(&self, line: &str) -> bool {
        line.starts_with(self.comment_prefixes.as_slice())
    }

    pub fn parse_str(&self, text: &str) -> Result<Ini, ParseError> {
        let sections = Parser::new(text, self).into_sections()?;
        Ok(Ini { sections })
    }

    /// Parses raw bytes, detecting a UTF-8 or UTF-16 LE byte order mark.
    pub fn parse(&self, buffer: &[u8]) -> Result<Ini, ParseError> {
        self.parse_str(&decode_data(buffer))
    }

    pub fn parse_reader<R>(&self, reader: &mut R) -> Result<Ini, ParseError>
    where
        R: Read,
    {
        let mut buffer = Vec::with_capacity(4096);
        reader.read_to_end(&mut buffer)?;
        self.parse(&buffer)
    }

    pub fn load<P>(&self, path: P) -> Result<Ini, ParseError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        log::debug!("loading {}", path.display());
        let buffer = fs::read(path)?;
        self.parse(&buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_strict() {
        let options = ParseOptions::default();

        assert_eq!(options.duplicate_keys, DuplicateKeys::Reject);
        assert_eq!(options.redeclared_sections, RedeclaredSections::Merge);
        assert_eq!(options.split, SplitMode::FirstEquals);
        assert!(options.is_comment("; comment"));
        assert!(!options.is_comment("# comment"));
    }

    #[test]
    fn permissive_accepts_hash_comments() {
        let options = ParseOptions::permissive();

        assert_eq!(options.duplicate_keys, DuplicateKeys::Overwrite);
        assert!(options.is_comment("# comment"));
        assert!(options.is_comment("; comment"));
        assert!(!options.is_comment("key = value"));
    }

    #[test]
    fn empty_prefix_set_disables_comments() {
        let options = ParseOptions::new().comment_prefixes(Vec::new());

        assert!(!options.is_comment("; comment"));
    }
}
