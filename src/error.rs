//! All error types for the localization-converter crate.
//!
//! These are returned from all fallible operations (parsing, formatting, file access, etc.).
//! [`Error::kind`] groups the variants into the broad failure classes the converter reacts to.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("invalid resource: {0}")]
    InvalidResource(String),

    #[error("duplicate key `{0}`")]
    DuplicateKey(String),

    #[error("duplicate plural category `{category}` in `{key}`")]
    DuplicatePluralCategory { key: String, category: String },

    #[error("text encoding error: {0}")]
    Encoding(String),

    #[error("format error: {0}")]
    Format(String),

    #[error("no plural entries to write")]
    NoPlurals,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("I/O error at {}: {source}", path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot map folder name `{0}` to an lproj folder")]
    UnmappableFolderName(String),
}

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKind {
    /// Malformed or unsupported input XML.
    Parse,
    /// Content violates an output schema invariant.
    Format,
    /// Nothing to write to a `.stringsdict` file. Callers skip the file.
    NoPlurals,
    /// Read, write, list or create failure.
    Io,
    /// A `values*` folder name outside the supported grammar.
    UnmappableFolderName,
}

impl Error {
    /// Creates a file system error bound to the path it happened on.
    pub fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// Creates a new format error.
    pub fn format_error(message: impl Into<String>) -> Self {
        Error::Format(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::XmlParse(_)
            | Error::InvalidResource(_)
            | Error::DuplicateKey(_)
            | Error::DuplicatePluralCategory { .. }
            | Error::Encoding(_) => ErrorKind::Parse,
            Error::Format(_) => ErrorKind::Format,
            Error::NoPlurals => ErrorKind::NoPlurals,
            Error::Io(_) | Error::FileSystem { .. } => ErrorKind::Io,
            Error::UnmappableFolderName(_) => ErrorKind::UnmappableFolderName,
        }
    }
}
