//! Mapping between Android `values[-qualifier]` folders and Apple `*.lproj` folders.

use std::path::{Path, PathBuf};

use unic_langid::LanguageIdentifier;

use crate::{error::Error, storage::FileSystem, types::Language};

/// Name of the unqualified Android resource folder.
pub const VALUES_FOLDER: &str = "values";
/// Name of the Android string resource file inside a values folder.
pub const ANDROID_STRINGS_FILE: &str = "strings.xml";
/// Name of the Apple folder matching [`VALUES_FOLDER`].
pub const BASE_LPROJ_FOLDER: &str = "Base.lproj";

impl Language {
    /// Reads the language out of an Android folder name.
    ///
    /// Returns `None` for anything but `values` and `values-<qualifier>`.
    pub fn from_folder_name(folder_name: &str) -> Option<Self> {
        if folder_name == VALUES_FOLDER {
            return Some(Language::Base);
        }
        let qualifier = folder_name
            .strip_prefix(VALUES_FOLDER)?
            .strip_prefix('-')
            .filter(|qualifier| !qualifier.is_empty())?;
        Some(Language::Named(qualifier.to_string()))
    }

    /// `Base.lproj`, or the qualifier as an Apple folder with Android region and BCP-47
    /// qualifiers merged into a language tag (`en-rUS` → `en-US.lproj`).
    pub fn lproj_folder_name(&self) -> String {
        match self {
            Language::Base => BASE_LPROJ_FOLDER.to_string(),
            Language::Named(qualifier) => format!("{}.lproj", merge_qualifier(qualifier)),
        }
    }
}

/// Maps an Android folder name to its Apple counterpart.
///
/// - `values` → `Base.lproj`
/// - `values-fr` → `fr.lproj`
/// - `values-en-rUS` → `en-US.lproj`
/// - `values-b+sr+Latn` → `sr-Latn.lproj`
/// - `values-v21` → `v21.lproj` (qualifiers are not validated)
/// - `layout`, `valuesfoo`, `values-` → `None`
pub fn apple_folder_name(android_folder_name: &str) -> Option<String> {
    Language::from_folder_name(android_folder_name).map(|language| language.lproj_folder_name())
}

// Region (`en-rUS`) and BCP-47 (`b+sr+Latn`) qualifiers are merged into a language tag
// when the result parses as one; any other qualifier is kept as written.
fn merge_qualifier(qualifier: &str) -> String {
    let candidate = if let Some(tag) = qualifier.strip_prefix("b+") {
        Some(tag.replace('+', "-"))
    } else {
        let parts: Vec<&str> = qualifier.split('-').collect();
        match parts.as_slice() {
            [language, region] => region
                .strip_prefix('r')
                .filter(|region| is_android_region(region))
                .map(|region| format!("{}-{}", language, region)),
            _ => None,
        }
    };

    candidate
        .and_then(|tag| tag.parse::<LanguageIdentifier>().ok())
        .map(|langid| langid.to_string())
        .unwrap_or_else(|| qualifier.to_string())
}

// `rUS` or `r419`; `round` and other screen qualifiers are not regions.
fn is_android_region(region: &str) -> bool {
    let bytes = region.as_bytes();
    match bytes.len() {
        2 => bytes.iter().all(u8::is_ascii_alphabetic),
        3 => bytes.iter().all(u8::is_ascii_digit),
        _ => false,
    }
}

/// One Android language folder found under a resource root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageFolder {
    /// Folder name as listed, e.g. `values-fr`.
    pub name: String,
    pub language: Language,
}

impl LanguageFolder {
    /// `<root>/<name>/strings.xml`
    pub fn strings_file(&self, root: &Path) -> PathBuf {
        root.join(&self.name).join(ANDROID_STRINGS_FILE)
    }

    pub fn lproj_folder_name(&self) -> String {
        self.language.lproj_folder_name()
    }
}

/// The language folders of an Android `res` directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AndroidLanguageFolders {
    root: PathBuf,
    folders: Vec<LanguageFolder>,
    unmapped: Vec<String>,
}

impl AndroidLanguageFolders {
    /// Lists `root` and keeps the entries whose name starts with `values`, sorted by name.
    /// Names that start with `values` but do not map to a language end up in
    /// [`unmapped`](Self::unmapped).
    pub fn scan<F: FileSystem + ?Sized>(fs: &F, root: impl Into<PathBuf>) -> Result<Self, Error> {
        let root = root.into();
        let mut names = fs.list_directory(&root)?;
        names.retain(|name| name.starts_with(VALUES_FOLDER));
        names.sort();

        let mut folders = Vec::new();
        let mut unmapped = Vec::new();
        for name in names {
            match Language::from_folder_name(&name) {
                Some(language) => folders.push(LanguageFolder { name, language }),
                None => unmapped.push(name),
            }
        }

        Ok(Self {
            root,
            folders,
            unmapped,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn folders(&self) -> &[LanguageFolder] {
        &self.folders
    }

    pub fn unmapped(&self) -> &[String] {
        &self.unmapped
    }

    pub fn languages(&self) -> impl Iterator<Item = &Language> {
        self.folders.iter().map(|folder| &folder.language)
    }

    /// Path of the `strings.xml` for `language`, if a folder provides it.
    pub fn strings_file(&self, language: &Language) -> Option<PathBuf> {
        self.folders
            .iter()
            .find(|folder| &folder.language == language)
            .map(|folder| folder.strings_file(&self.root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryFileSystem;

    #[test]
    fn test_base_folder() {
        assert_eq!(apple_folder_name("values").as_deref(), Some("Base.lproj"));
    }

    #[test]
    fn test_qualified_folder() {
        assert_eq!(apple_folder_name("values-fr").as_deref(), Some("fr.lproj"));
        assert_eq!(apple_folder_name("values-v21").as_deref(), Some("v21.lproj"));
        assert_eq!(
            apple_folder_name("values-night").as_deref(),
            Some("night.lproj")
        );
    }

    #[test]
    fn test_region_qualifier_merged() {
        assert_eq!(
            apple_folder_name("values-en-rUS").as_deref(),
            Some("en-US.lproj")
        );
        assert_eq!(
            apple_folder_name("values-pt-rBR").as_deref(),
            Some("pt-BR.lproj")
        );
        assert_eq!(
            apple_folder_name("values-es-r419").as_deref(),
            Some("es-419.lproj")
        );
    }

    #[test]
    fn test_bcp47_qualifier_merged() {
        assert_eq!(
            apple_folder_name("values-b+sr+Latn").as_deref(),
            Some("sr-Latn.lproj")
        );
    }

    #[test]
    fn test_unparseable_multi_qualifier_kept_literally() {
        assert_eq!(
            apple_folder_name("values-fr-land").as_deref(),
            Some("fr-land.lproj")
        );
        assert_eq!(
            apple_folder_name("values-en-rUS-v21").as_deref(),
            Some("en-rUS-v21.lproj")
        );
        assert_eq!(
            apple_folder_name("values-fr-round").as_deref(),
            Some("fr-round.lproj")
        );
        assert_eq!(
            apple_folder_name("values-en-rUSA").as_deref(),
            Some("en-rUSA.lproj")
        );
        assert_eq!(
            apple_folder_name("values-en-r12").as_deref(),
            Some("en-r12.lproj")
        );
    }

    #[test]
    fn test_unsupported_names() {
        assert_eq!(apple_folder_name("layout"), None);
        assert_eq!(apple_folder_name("valuesfoo"), None);
        assert_eq!(apple_folder_name("values-"), None);
        assert_eq!(apple_folder_name("drawable-values"), None);
    }

    #[test]
    fn test_language_from_folder_name() {
        assert_eq!(Language::from_folder_name("values"), Some(Language::Base));
        assert_eq!(
            Language::from_folder_name("values-fr"),
            Some(Language::Named("fr".to_string()))
        );
        assert_eq!(Language::from_folder_name("raw"), None);
    }

    #[test]
    fn test_named_language_keeps_raw_qualifier() {
        let language = Language::from_folder_name("values-en-rUS").unwrap();
        assert_eq!(language, Language::Named("en-rUS".to_string()));
        assert_eq!(language.to_string(), "en-rUS");
        assert_eq!(language.lproj_folder_name(), "en-US.lproj");
        assert_eq!(
            Language::Named("b+sr+Latn".to_string()).lproj_folder_name(),
            "sr-Latn.lproj"
        );
    }

    #[test]
    fn test_scan_lists_language_folders() {
        let fs = MemoryFileSystem::new()
            .with_directory("any/values")
            .with_directory("any/values-fr")
            .with_directory("any/layout")
            .with_directory("any/valuesx");

        let folders = AndroidLanguageFolders::scan(&fs, "any").unwrap();
        let languages: Vec<_> = folders.languages().cloned().collect();
        assert_eq!(
            languages,
            vec![Language::Base, Language::Named("fr".to_string())]
        );
        assert_eq!(
            folders.strings_file(&Language::Base),
            Some(PathBuf::from("any/values/strings.xml"))
        );
        assert_eq!(
            folders.strings_file(&Language::Named("fr".to_string())),
            Some(PathBuf::from("any/values-fr/strings.xml"))
        );
        assert_eq!(folders.strings_file(&Language::Named("de".to_string())), None);
        assert_eq!(folders.unmapped(), &["valuesx".to_string()]);
    }

    #[test]
    fn test_scan_missing_root() {
        let fs = MemoryFileSystem::new();
        assert!(AndroidLanguageFolders::scan(&fs, "missing").is_err());
    }
}
