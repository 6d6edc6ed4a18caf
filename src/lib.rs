#![forbid(unsafe_code)]
//! Android to Apple localization converter.
//!
//! Reads Android `strings.xml` resources (`<string>` and `<plurals>`) and writes the Apple
//! equivalents: `Localizable.strings`, plus `Localizable.stringsdict` when plural groups exist.
//! All conversion happens through the format-agnostic `LocalizationMap` model.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use localization_converter::{ConvertOptions, Converter, LocalFileSystem};
//! use std::path::Path;
//!
//! let converter = Converter::new(LocalFileSystem, ConvertOptions::default());
//!
//! // One file
//! converter.convert_file(Path::new("app/src/main/res/values/strings.xml"), Path::new("Base.lproj"));
//!
//! // Every values* folder of a res directory
//! let ok = converter.convert_tree(Path::new("app/src/main/res"), Path::new("ios/Resources"));
//! assert!(ok);
//! ```
//!
//! # Formats
//!
//! - **Android `strings.xml`**: input, parsed by [`AndroidStringsParser`]
//! - **Apple `.strings`**: written by [`LocalizableFormatter`]
//! - **Apple `.stringsdict`**: written by [`StringsDictFormatter`]
//!
//! Folder names follow the platform conventions: `values` → `Base.lproj`,
//! `values-fr` → `fr.lproj` (see [`folders::apple_folder_name`]).

pub mod converter;
pub mod error;
pub mod folders;
pub mod formats;
pub mod placeholder;
pub mod storage;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    converter::{
        ConvertOptions, Converter, FileOutcome, FolderReport, LOCALIZABLE_STRINGS_FILE,
        STRINGS_DICT_FILE, TreeReport,
    },
    error::{Error, ErrorKind},
    folders::{AndroidLanguageFolders, apple_folder_name},
    formats::{AndroidStringsParser, LocalizableFormatter, StringsDictFormatter},
    placeholder::to_apple_placeholders,
    storage::{DryRunFileSystem, FileSystem, LocalFileSystem, MemoryFileSystem},
    traits::{Formatter, Parser},
    types::{Entry, Language, LocalizationMap, PluralCategory, PluralGroup, SimpleString},
};
