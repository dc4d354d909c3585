use std::iter::Enumerate;
use std::str::Lines;

use indexmap::IndexMap;

use crate::error::ParseError;
use crate::options::{DuplicateKeys, ParseOptions, RedeclaredSections, SplitMode};
use crate::section::Section;

/// Represents an on-going parse.
#[derive(Debug, Clone)]
pub(crate) struct Parser<'a> {
    lines: Enumerate<Lines<'a>>,
    options: &'a ParseOptions,
    sections: IndexMap<String, Section>,
    /// Index into `sections` of the most recent section header.
    current: Option<usize>,
}

impl<'a> Parser<'a> {
    #[must_use]
    pub(crate) fn new(text: &'a str, options: &'a ParseOptions) -> Self {
        Self {
            lines: text.lines().enumerate(),
            options,
            sections: IndexMap::with_capacity(16),
            current: None,
        }
    }
}

impl Parser<'_> {
    /// Consumes the whole input, stopping at the first malformed line.
    pub(crate) fn into_sections(mut self) -> Result<IndexMap<String, Section>, ParseError> {
        while let Some((i, line)) = self.lines.next() {
            let line = line.trim();
            let number = i + 1;

            if line.is_empty() || self.options.is_comment(line) {
                continue;
            }

            if let Some(name) = section_name(line) {
                self.open_section(name.to_owned());
            } else {
                self.parse_entry(line, number)?;
            }
        }

        log::debug!("parsed {} section(s)", self.sections.len());
        Ok(self.sections)
    }

    fn open_section(&mut self, name: String) {
        let index = match self.options.redeclared_sections {
            RedeclaredSections::Merge => match self.sections.get_index_of(&name) {
                Some(index) => {
                    log::debug!("merging into existing section [{name}]");
                    index
                }
                None => self.sections.insert_full(name.clone(), Section::new(name)).0,
            },
            RedeclaredSections::Replace => {
                let (index, previous) = self.sections.insert_full(name.clone(), Section::new(name));
                if let Some(previous) = previous {
                    log::debug!(
                        "replacing section [{}] ({} entries dropped)",
                        previous.name(),
                        previous.len()
                    );
                }
                index
            }
        };

        self.current = Some(index);
    }

    fn parse_entry(&mut self, line: &str, number: usize) -> Result<(), ParseError> {
        let Some(index) = self.current else {
            return Err(ParseError::InvalidFormat { line: number });
        };

        let (key, value) = split_entry(line, self.options.split)
            .ok_or(ParseError::InvalidFormat { line: number })?;

        if key.is_empty() {
            return Err(ParseError::InvalidKeyFormat { line: number });
        }

        let section = &mut self.sections[index];

        if section.contains_key(key) {
            match self.options.duplicate_keys {
                DuplicateKeys::Reject => {
                    return Err(ParseError::DuplicateKey {
                        line: number,
                        section: section.name().to_owned(),
                        key: key.to_owned(),
                    });
                }
                DuplicateKeys::Overwrite => {
                    log::warn!(
                        "line {number}: overwriting key {key:?} in section [{}]",
                        section.name()
                    );
                }
            }
        }

        log::trace!("line {number}: [{}] {key} = {value:?}", section.name());
        section.insert(key.to_owned(), value.to_owned());

        Ok(())
    }
}

/// Returns the trimmed text between the brackets of a `[name]` line.
fn section_name(line: &str) -> Option<&str> {
    line.strip_prefix('[')?.strip_suffix(']').map(str::trim)
}

/// Splits a trimmed entry line into its trimmed key and value.
fn split_entry(line: &str, mode: SplitMode) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;

    if mode == SplitMode::SingleEquals && value.contains('=') {
        return None;
    }

    Some((key.trim(), value.trim()))
}
