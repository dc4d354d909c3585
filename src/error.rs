use std::io;
use std::path::PathBuf;

/// Reasons a document could not be built from its input.
///
/// Line numbers are 1-based and refer to the decoded text.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to read data")]
    ReadFailure {
        #[from]
        source: io::Error,
    },
    #[error("line {line}: expected a section header, a comment, or `key = value` inside a section")]
    InvalidFormat { line: usize },
    #[error("line {line}: key cannot be empty")]
    InvalidKeyFormat { line: usize },
    #[error("line {line}: key {key:?} is already defined in section [{section}]")]
    DuplicateKey {
        line: usize,
        section: String,
        key: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("section [{section}] does not exist")]
    SectionNotFound { section: String },
    #[error("key {key:?} does not exist in section [{section}]")]
    KeyNotFound { section: String, key: String },
}

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("refusing to save to {path:?}: file name must end with `.ini`")]
    InvalidExtension { path: PathBuf },
    #[error("failed to write data")]
    WriteFailure {
        #[from]
        source: io::Error,
    },
}
