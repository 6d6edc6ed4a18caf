//! Conversion of Android string resources into Apple localization files.
//!
//! [`Converter::convert_file`] handles one `strings.xml`, [`Converter::convert_tree`] a whole
//! `res` directory of `values*` folders. All file access goes through a [`FileSystem`],
//! and diagnostics are emitted as `tracing` events.

use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, UTF_8};

use crate::{
    error::Error,
    folders::AndroidLanguageFolders,
    formats::{AndroidStringsParser, LocalizableFormatter, StringsDictFormatter},
    storage::FileSystem,
    traits::{Formatter, Parser},
};

/// File written to every output folder.
pub const LOCALIZABLE_STRINGS_FILE: &str = "Localizable.strings";
/// File written next to [`LOCALIZABLE_STRINGS_FILE`] when plural groups exist.
pub const STRINGS_DICT_FILE: &str = "Localizable.stringsdict";

/// Options shared by every conversion of a [`Converter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Write plural groups to `Localizable.strings` as stringsdict references instead of
    /// their flat `other` form.
    pub include_plurals: bool,
}

/// What a successful file conversion produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    /// Number of entries written to `Localizable.strings`.
    pub entries: usize,
    /// Number of plural groups written to `Localizable.stringsdict`.
    pub plurals: usize,
    pub strings_path: PathBuf,
    /// `None` when the input had no plural group.
    pub stringsdict_path: Option<PathBuf>,
}

/// Result of converting one `values*` folder.
#[derive(Debug)]
pub struct FolderReport {
    /// Android folder name, e.g. `values-fr`.
    pub folder: String,
    /// Output folder, when the name could be mapped.
    pub output_dir: Option<PathBuf>,
    pub result: Result<FileOutcome, Error>,
}

/// Per-folder results of a tree conversion.
#[derive(Debug, Default)]
pub struct TreeReport {
    pub folders: Vec<FolderReport>,
}

impl TreeReport {
    /// True when every attempted folder converted.
    pub fn is_success(&self) -> bool {
        self.folders.iter().all(|folder| folder.result.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &FolderReport> {
        self.folders.iter().filter(|folder| folder.result.is_err())
    }
}

/// Drives parsing, formatting and writing.
#[derive(Debug)]
pub struct Converter<F> {
    fs: F,
    options: ConvertOptions,
}

impl<F: FileSystem> Converter<F> {
    pub fn new(fs: F, options: ConvertOptions) -> Self {
        Self { fs, options }
    }

    pub fn file_system(&self) -> &F {
        &self.fs
    }

    pub fn options(&self) -> ConvertOptions {
        self.options
    }

    /// Converts `input` into `output_dir/Localizable.strings` and, when it has plural groups,
    /// `output_dir/Localizable.stringsdict`. Failures are logged and reported as `false`.
    pub fn convert_file(&self, input: &Path, output_dir: &Path) -> bool {
        let result = self.try_convert_file(input, output_dir);
        log_file_result(input, &result);
        result.is_ok()
    }

    /// Same as [`convert_file`](Self::convert_file), returning the typed result.
    ///
    /// Both outputs are formatted before anything is written, so a content error leaves the
    /// output folder untouched.
    pub fn try_convert_file(&self, input: &Path, output_dir: &Path) -> Result<FileOutcome, Error> {
        let bytes = self.fs.read_bytes(input)?;
        let text = decode_text(&bytes)?;
        let map = AndroidStringsParser.parse(&text)?;

        let localizable = LocalizableFormatter::new(self.options.include_plurals).format(&map)?;
        let stringsdict = match StringsDictFormatter.format(&map) {
            Ok(content) => Some(content),
            Err(Error::NoPlurals) => {
                tracing::info!(input = %input.display(), "No plural found, skipping stringsdict file");
                None
            }
            Err(e) => return Err(e),
        };

        let strings_path = output_dir.join(LOCALIZABLE_STRINGS_FILE);
        self.fs.write_bytes(&strings_path, &localizable)?;

        let stringsdict_path = match stringsdict {
            Some(content) => {
                let path = output_dir.join(STRINGS_DICT_FILE);
                self.fs.write_bytes(&path, &content)?;
                Some(path)
            }
            None => None,
        };

        Ok(FileOutcome {
            entries: map.len(),
            plurals: map.plurals().count(),
            strings_path,
            stringsdict_path,
        })
    }

    /// Converts every `values*` folder of `input_root` into a matching `*.lproj` folder of
    /// `output_root`. Every folder is attempted; the result is `false` if any of them failed.
    pub fn convert_tree(&self, input_root: &Path, output_root: &Path) -> bool {
        match self.convert_tree_report(input_root, output_root) {
            Ok(report) => report.is_success(),
            Err(e) => {
                tracing::error!(input = %input_root.display(), error = %e, "Failed to list resource folders");
                false
            }
        }
    }

    /// Same as [`convert_tree`](Self::convert_tree), returning one report per folder.
    /// Fails only when `input_root` cannot be listed.
    pub fn convert_tree_report(
        &self,
        input_root: &Path,
        output_root: &Path,
    ) -> Result<TreeReport, Error> {
        let language_folders = AndroidLanguageFolders::scan(&self.fs, input_root)?;
        let mut report = TreeReport::default();

        for name in language_folders.unmapped() {
            tracing::warn!(
                folder = %name,
                "Could not convert values folder name to its iOS counterpart"
            );
            report.folders.push(FolderReport {
                folder: name.clone(),
                output_dir: None,
                result: Err(Error::UnmappableFolderName(name.clone())),
            });
        }

        for folder in language_folders.folders() {
            let span = tracing::info_span!("folder", name = %folder.name);
            let _enter = span.enter();

            let input = folder.strings_file(input_root);
            let output_dir = output_root.join(folder.lproj_folder_name());
            let result = self
                .fs
                .create_directory(&output_dir)
                .and_then(|()| self.try_convert_file(&input, &output_dir));
            log_file_result(&input, &result);

            report.folders.push(FolderReport {
                folder: folder.name.clone(),
                output_dir: Some(output_dir),
                result,
            });
        }

        Ok(report)
    }
}

fn log_file_result(input: &Path, result: &Result<FileOutcome, Error>) {
    match result {
        Ok(outcome) => tracing::info!(
            input = %input.display(),
            output = %outcome.strings_path.display(),
            entries = outcome.entries,
            plurals = outcome.plurals,
            "Converted"
        ),
        Err(e) => tracing::error!(
            input = %input.display(),
            kind = ?e.kind(),
            error = %e,
            "Conversion failed"
        ),
    }
}

/// Decodes input bytes, honouring a UTF-8 or UTF-16 byte order mark and defaulting to UTF-8.
pub fn decode_text(bytes: &[u8]) -> Result<String, Error> {
    let (encoding, bom_length) = Encoding::for_bom(bytes).unwrap_or((UTF_8, 0));
    let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_length..]);
    if had_errors {
        return Err(Error::Encoding(format!(
            "input is not valid {}",
            encoding.name()
        )));
    }
    Ok(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::storage::MemoryFileSystem;

    const STRINGS_WITH_PLURALS: &str = r#"<resources>
        <string name="ok">Done</string>
        <plurals name="items">
            <item quantity="one">%d item</item>
            <item quantity="other">%d items</item>
        </plurals>
    </resources>"#;

    fn converter(fs: &MemoryFileSystem, include_plurals: bool) -> Converter<&MemoryFileSystem> {
        Converter::new(fs, ConvertOptions { include_plurals })
    }

    #[test]
    fn test_convert_file_writes_both_outputs() {
        let fs = MemoryFileSystem::new()
            .with_file("res/values/strings.xml", STRINGS_WITH_PLURALS)
            .with_directory("out");

        let outcome = converter(&fs, false)
            .try_convert_file(Path::new("res/values/strings.xml"), Path::new("out"))
            .unwrap();

        assert_eq!(outcome.entries, 2);
        assert_eq!(outcome.plurals, 1);
        assert_eq!(
            outcome.stringsdict_path,
            Some(PathBuf::from("out/Localizable.stringsdict"))
        );
        assert_eq!(
            fs.text("out/Localizable.strings").as_deref(),
            Some("\"ok\" = \"Done\";\n\"items\" = \"%d items\";\n")
        );
        assert!(
            fs.text("out/Localizable.stringsdict")
                .unwrap()
                .contains("<key>items</key>")
        );
    }

    #[test]
    fn test_convert_file_without_plurals_skips_stringsdict() {
        let fs = MemoryFileSystem::new()
            .with_file(
                "in/strings.xml",
                r#"<resources><string name="ok">Done</string></resources>"#,
            )
            .with_directory("out");

        assert!(converter(&fs, true).convert_file(Path::new("in/strings.xml"), Path::new("out")));
        assert!(fs.contains_file("out/Localizable.strings"));
        assert!(!fs.contains_file("out/Localizable.stringsdict"));
    }

    #[test]
    fn test_convert_file_missing_input() {
        let fs = MemoryFileSystem::new().with_directory("out");
        let err = converter(&fs, false)
            .try_convert_file(Path::new("in/strings.xml"), Path::new("out"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(!converter(&fs, false).convert_file(Path::new("in/strings.xml"), Path::new("out")));
    }

    #[test]
    fn test_convert_file_parse_error_writes_nothing() {
        let fs = MemoryFileSystem::new()
            .with_file("in/strings.xml", "<resources><string name=\"a\">")
            .with_directory("out");
        assert!(!converter(&fs, false).convert_file(Path::new("in/strings.xml"), Path::new("out")));
        assert!(!fs.contains_file("out/Localizable.strings"));
    }

    #[test]
    fn test_convert_file_format_error_writes_nothing() {
        let fs = MemoryFileSystem::new()
            .with_file(
                "in/strings.xml",
                r#"<resources><plurals name="days"><item quantity="one">day</item></plurals></resources>"#,
            )
            .with_directory("out");
        let err = converter(&fs, false)
            .try_convert_file(Path::new("in/strings.xml"), Path::new("out"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(fs.file_paths().iter().all(|p| !p.starts_with("out")));
    }

    #[test]
    fn test_convert_file_write_failure() {
        let fs = MemoryFileSystem::new()
            .with_file("in/strings.xml", STRINGS_WITH_PLURALS)
            .with_directory("out")
            .with_read_only("out/Localizable.stringsdict");
        let err = converter(&fs, false)
            .try_convert_file(Path::new("in/strings.xml"), Path::new("out"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_convert_tree_continues_after_failure() {
        let fs = MemoryFileSystem::new()
            .with_file("res/values/strings.xml", STRINGS_WITH_PLURALS)
            .with_file("res/values-de/strings.xml", "not xml at all")
            .with_file(
                "res/values-fr/strings.xml",
                r#"<resources><string name="ok">Terminé</string></resources>"#,
            )
            .with_directory("res/layout");

        let report = converter(&fs, false)
            .convert_tree_report(Path::new("res"), Path::new("ios"))
            .unwrap();

        assert!(!report.is_success());
        let folders: Vec<_> = report.folders.iter().map(|f| f.folder.as_str()).collect();
        assert_eq!(folders, vec!["values", "values-de", "values-fr"]);
        let failures: Vec<_> = report.failures().map(|f| f.folder.as_str()).collect();
        assert_eq!(failures, vec!["values-de"]);

        assert!(fs.contains_file("ios/Base.lproj/Localizable.strings"));
        assert!(fs.contains_file("ios/Base.lproj/Localizable.stringsdict"));
        assert!(fs.contains_file("ios/fr.lproj/Localizable.strings"));
        assert!(!fs.contains_file("ios/fr.lproj/Localizable.stringsdict"));
        assert!(!fs.contains_file("ios/de.lproj/Localizable.strings"));
    }

    #[test]
    fn test_convert_tree_unmappable_folder_fails_tree() {
        let fs = MemoryFileSystem::new()
            .with_file("res/values/strings.xml", "<resources/>")
            .with_file("res/valuesx/strings.xml", "<resources/>");

        let report = converter(&fs, false)
            .convert_tree_report(Path::new("res"), Path::new("ios"))
            .unwrap();
        assert!(!report.is_success());
        let failure = report.failures().next().unwrap();
        assert_eq!(failure.folder, "valuesx");
        assert!(matches!(
            failure.result,
            Err(Error::UnmappableFolderName(ref name)) if name == "valuesx"
        ));
        assert!(fs.contains_file("ios/Base.lproj/Localizable.strings"));
    }

    #[test]
    fn test_convert_tree_missing_input_root() {
        let fs = MemoryFileSystem::new();
        assert!(!converter(&fs, false).convert_tree(Path::new("res"), Path::new("ios")));
    }

    #[test]
    fn test_convert_tree_empty_root_succeeds() {
        let fs = MemoryFileSystem::new().with_directory("res/drawable");
        assert!(converter(&fs, false).convert_tree(Path::new("res"), Path::new("ios")));
    }

    #[test]
    fn test_decode_text_with_boms() {
        let mut utf8 = vec![0xEF, 0xBB, 0xBF];
        utf8.extend_from_slice("<resources/>".as_bytes());
        assert_eq!(decode_text(&utf8).unwrap(), "<resources/>");

        let mut utf16 = vec![0xFF, 0xFE];
        for unit in "<a/>".encode_utf16() {
            utf16.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode_text(&utf16).unwrap(), "<a/>");
    }

    #[test]
    fn test_decode_text_rejects_invalid_utf8() {
        let err = decode_text(&[0x3C, 0xFF, 0xFE, 0x3E]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
