//! Core, format-agnostic types for the converter.
//! The Android parser decodes into these; the Apple formatters serialize these.

use std::{
    collections::{BTreeMap, HashSet},
    fmt::Display,
    str::FromStr,
};

use serde::Serialize;

use crate::error::Error;

/// All entries parsed from a single `strings.xml` file, in document order.
///
/// Keys are unique across simple strings and plural groups. The map is built once
/// by a parser and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocalizationMap {
    entries: Vec<Entry>,
    #[serde(skip)]
    keys: HashSet<String>,
}

impl LocalizationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from entries, rejecting the first key that appears twice.
    pub fn from_entries(entries: impl IntoIterator<Item = Entry>) -> Result<Self, Error> {
        let mut map = Self::new();
        for entry in entries {
            map.insert(entry)?;
        }
        Ok(map)
    }

    pub(crate) fn insert(&mut self, entry: Entry) -> Result<(), Error> {
        if !self.keys.insert(entry.key().to_string()) {
            return Err(Error::DuplicateKey(entry.key().to_string()));
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        if !self.contains_key(key) {
            return None;
        }
        self.entries.iter().find(|entry| entry.key() == key)
    }

    /// Plural groups only, in document order.
    pub fn plurals(&self) -> impl Iterator<Item = &PluralGroup> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Plural(group) => Some(group),
            Entry::Simple(_) => None,
        })
    }

    pub fn has_plurals(&self) -> bool {
        self.plurals().next().is_some()
    }
}

impl<'a> IntoIterator for &'a LocalizationMap {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A single keyed resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entry {
    /// A `<string>` resource.
    Simple(SimpleString),

    /// A `<plurals>` resource.
    Plural(PluralGroup),
}

impl Entry {
    pub fn simple(key: impl Into<String>, value: impl Into<String>) -> Self {
        Entry::Simple(SimpleString {
            key: key.into(),
            value: value.into(),
        })
    }

    pub fn key(&self) -> &str {
        match self {
            Entry::Simple(simple) => &simple.key,
            Entry::Plural(group) => &group.key,
        }
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entry::Simple(simple) => write!(f, "{} = {}", simple.key, simple.value),
            Entry::Plural(group) => write!(
                f,
                "{} = plural({})",
                group.key,
                group
                    .forms
                    .keys()
                    .map(PluralCategory::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimpleString {
    pub key: String,
    /// Unescaped text with Apple-style placeholders.
    pub value: String,
}

/// All plural forms for a single message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluralGroup {
    pub key: String,

    /// Map from category → translation. Categories missing in the source stay missing.
    pub forms: BTreeMap<PluralCategory, String>,
}

impl PluralGroup {
    pub fn new(
        key: impl Into<String>,
        forms: impl IntoIterator<Item = (PluralCategory, String)>,
    ) -> Self {
        Self {
            key: key.into(),
            forms: forms.into_iter().collect(),
        }
    }

    pub fn get(&self, category: PluralCategory) -> Option<&str> {
        self.forms.get(&category).map(String::as_str)
    }

    pub fn other(&self) -> Option<&str> {
        self.get(PluralCategory::Other)
    }

    /// The `other` form, or the first present form when `other` is missing.
    pub fn fallback_value(&self) -> Option<&str> {
        self.other()
            .or_else(|| self.forms.values().next().map(String::as_str))
    }
}

/// Standard CLDR plural forms, ordered as CLDR lists them.
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Clone, Copy, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    pub const ALL: [PluralCategory; 6] = [
        PluralCategory::Zero,
        PluralCategory::One,
        PluralCategory::Two,
        PluralCategory::Few,
        PluralCategory::Many,
        PluralCategory::Other,
    ];

    /// Name used by both Android `quantity` attributes and stringsdict keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            PluralCategory::Zero => "zero",
            PluralCategory::One => "one",
            PluralCategory::Two => "two",
            PluralCategory::Few => "few",
            PluralCategory::Many => "many",
            PluralCategory::Other => "other",
        }
    }
}

impl Display for PluralCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PluralCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ZERO" => Ok(PluralCategory::Zero),
            "ONE" => Ok(PluralCategory::One),
            "TWO" => Ok(PluralCategory::Two),
            "FEW" => Ok(PluralCategory::Few),
            "MANY" => Ok(PluralCategory::Many),
            "OTHER" => Ok(PluralCategory::Other),
            _ => Err(format!("Unknown plural category: {}", s)),
        }
    }
}

/// Language of one Android `values[-qualifier]` folder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    /// The unqualified `values` folder.
    Base,

    /// A qualified folder, holding the text after `values-`.
    Named(String),
}

impl Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::Base => f.write_str("Base"),
            Language::Named(code) => f.write_str(code),
        }
    }
}
