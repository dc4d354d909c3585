use std::fmt;
use std::io::{self, Write};

use crate::Ini;
use crate::section::Section;

/// Renders the document as INI text that parses back into an equal document.
///
/// Every section is written as a `[name]` header followed by one `key=value` line per
/// entry and a blank line, all in insertion order.
impl fmt::Display for Ini {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in self.sections() {
            write!(f, "{section}")?;
        }

        Ok(())
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.name())?;

        for (key, value) in self.entries() {
            writeln!(f, "{key}={value}")?;
        }

        writeln!(f)
    }
}

impl Ini {
    /// Streams the same text as the [`Display`](fmt::Display) implementation into `to`.
    pub fn write_to<W>(&self, to: &mut W) -> io::Result<()>
    where
        W: Write,
    {
        for section in self.sections() {
            write!(to, "{section}")?;
        }

        to.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format() {
        let mut ini = Ini::new();
        ini.set("server", "ip", "127.0.0.1");
        ini.set("server", "port", "8080");
        ini.set("empty", "value", "");
        ini.set("urls", "home", "http://host/?a=b");

        assert_eq!(
            ini.to_string(),
            "[server]\nip=127.0.0.1\nport=8080\n\n[empty]\nvalue=\n\n[urls]\nhome=http://host/?a=b\n\n"
        );
    }

    #[test]
    fn empty_document() {
        assert_eq!(Ini::new().to_string(), "");
    }

    #[test]
    fn section_without_entries() {
        let ini: Ini = "[a]\n[b]\nk=v\n".parse().expect("failed to parse hardcoded INI file");

        assert_eq!(ini.to_string(), "[a]\n\n[b]\nk=v\n\n");
    }

    #[test]
    fn write_to_matches_display() {
        let ini: Ini = "[s]\n  key  =  value  \n"
            .parse()
            .expect("failed to parse hardcoded INI file");
        let mut buffer = Vec::new();

        ini.write_to(&mut buffer).expect("failed to write to buffer");

        assert_eq!(String::from_utf8(buffer).ok(), Some(ini.to_string()));
    }

    #[test]
    fn written_text_parses_back() {
        let mut ini = Ini::new();
        ini.set("paths", "expr", "a = b = c");
        ini.set("", "orphan", "yes");

        let reparsed: Ini = ini.to_string().parse().expect("failed to parse written INI file");

        assert_eq!(reparsed, ini);
    }

    #[test]
    fn rejected_entries_are_not_written() {
        let mut ini = Ini::new();
        ini.set("s", "k", "a\nb");
        ini.set("s", "[x", "y]");
        ini.set("s", "[x", "y");
        ini.set("s", "x", "[y]");

        let text = ini.to_string();
        assert_eq!(text, "[s]\n[x=y\nx=[y]\n\n");

        let reparsed: Ini = text.parse().expect("failed to parse written INI file");
        assert_eq!(reparsed, ini);
        assert_eq!(reparsed.section_names().collect::<Vec<_>>(), vec!["s"]);
    }
}
