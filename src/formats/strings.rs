//! Support for Apple `.strings` localization format.
//!
//! Writes one `"key" = "value";` line per [`LocalizationMap`] entry, in map order.

use std::io::Write;

use crate::{
    error::Error,
    placeholder::plural_specifier,
    traits::Formatter,
    types::{Entry, LocalizationMap, PluralGroup},
};

/// Writer for `Localizable.strings`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalizableFormatter {
    /// When set, plural groups are written as a bare substitution specifier and resolved
    /// through the `.stringsdict` entry with the same key. Otherwise their `other` form is
    /// written as a flat string.
    pub include_plurals: bool,
}

impl LocalizableFormatter {
    pub fn new(include_plurals: bool) -> Self {
        Self { include_plurals }
    }

    fn pair<'a>(&self, entry: &'a Entry) -> Pair<'a> {
        match entry {
            Entry::Simple(simple) => Pair {
                key: &simple.key,
                value: simple.value.clone(),
            },
            Entry::Plural(group) if self.include_plurals => Pair {
                key: &group.key,
                value: stringsdict_reference(group),
            },
            Entry::Plural(group) => Pair {
                key: &group.key,
                value: group.fallback_value().unwrap_or_default().to_string(),
            },
        }
    }
}

impl Formatter for LocalizableFormatter {
    fn write_to<W: Write>(&self, map: &LocalizationMap, mut writer: W) -> Result<(), Error> {
        let mut content = String::new();

        for entry in map {
            content.push_str(&self.pair(entry).to_string());
            content.push('\n');
        }

        writer.write_all(content.as_bytes()).map_err(Error::Io)
    }
}

/// The `.strings` value standing in for a plural group: only the specifier that carries
/// the count, e.g. `%d` or `%1$ld`.
pub(crate) fn stringsdict_reference(group: &PluralGroup) -> String {
    group
        .fallback_value()
        .and_then(plural_specifier)
        .map(|token| token.to_apple())
        .unwrap_or_else(|| "%d".to_string())
}

/// A single key-value line of a `.strings` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair<'a> {
    pub key: &'a str,
    /// Raw value; escaped on display.
    pub value: String,
}

impl std::fmt::Display for Pair<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "\"{}\" = \"{}\";",
            escape_strings_value(self.key),
            escape_strings_value(&self.value)
        )
    }
}

/// Escapes text for a double-quoted `.strings` literal, keeping it on a single line.
pub fn escape_strings_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}
