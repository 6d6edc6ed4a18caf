use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const STRINGS_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <string name="ok">Done</string>
    <string name="greeting">Hello %s</string>
    <plurals name="apples">
        <item quantity="one">One apple</item>
        <item quantity="other">%d apples</item>
    </plurals>
</resources>
"#;

fn converter_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("localization-converter"))
}

fn write_values(root: &Path, folder: &str, content: &str) -> std::path::PathBuf {
    let dir = root.join(folder);
    fs::create_dir_all(&dir).unwrap();
    let file = dir.join("strings.xml");
    fs::write(&file, content).unwrap();
    file
}

#[test]
fn test_cli_file_conversion() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_values(temp_dir.path(), "values", STRINGS_XML);
    let output = temp_dir.path().join("Base.lproj");

    let result = converter_cmd()
        .args([
            "file",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(
        result.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&result.stderr)
    );
    let strings = fs::read_to_string(output.join("Localizable.strings")).unwrap();
    assert_eq!(
        strings,
        "\"ok\" = \"Done\";\n\"greeting\" = \"Hello %@\";\n\"apples\" = \"%d apples\";\n"
    );
    let stringsdict = fs::read_to_string(output.join("Localizable.stringsdict")).unwrap();
    assert!(stringsdict.contains("<key>apples</key>"));
    assert!(stringsdict.contains("<string>One apple</string>"));
}

#[test]
fn test_cli_include_plurals() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_values(temp_dir.path(), "values", STRINGS_XML);
    let output = temp_dir.path().join("out");

    let result = converter_cmd()
        .args([
            "file",
            "--include-plurals",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(result.status.success());
    let strings = fs::read_to_string(output.join("Localizable.strings")).unwrap();
    assert!(strings.contains("\"apples\" = \"%d\";"));
}

#[test]
fn test_cli_tree_conversion() {
    let temp_dir = TempDir::new().unwrap();
    let res = temp_dir.path().join("res");
    write_values(&res, "values", STRINGS_XML);
    write_values(
        &res,
        "values-fr",
        r#"<resources><string name="ok">Terminé</string></resources>"#,
    );
    let ios = temp_dir.path().join("ios");

    let result = converter_cmd()
        .args([
            "tree",
            "-i",
            res.to_str().unwrap(),
            "-o",
            ios.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(
        result.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&result.stderr)
    );
    assert!(ios.join("Base.lproj/Localizable.strings").exists());
    assert!(ios.join("Base.lproj/Localizable.stringsdict").exists());
    assert_eq!(
        fs::read_to_string(ios.join("fr.lproj/Localizable.strings")).unwrap(),
        "\"ok\" = \"Terminé\";\n"
    );
}

#[test]
fn test_cli_tree_failure_exit_code() {
    let temp_dir = TempDir::new().unwrap();
    let res = temp_dir.path().join("res");
    write_values(&res, "values", STRINGS_XML);
    write_values(&res, "values-de", "<resources><string name=\"a\">");
    let ios = temp_dir.path().join("ios");

    let result = converter_cmd()
        .args([
            "tree",
            "-i",
            res.to_str().unwrap(),
            "-o",
            ios.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(!result.status.success());
    assert!(ios.join("Base.lproj/Localizable.strings").exists());
    assert!(!ios.join("de.lproj/Localizable.strings").exists());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Conversion failed"));
}

#[test]
fn test_cli_dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let res = temp_dir.path().join("res");
    write_values(&res, "values", STRINGS_XML);
    let ios = temp_dir.path().join("ios");

    let result = converter_cmd()
        .args([
            "--dry-run",
            "tree",
            "-i",
            res.to_str().unwrap(),
            "-o",
            ios.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(result.status.success());
    assert!(!ios.exists());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("would write file"));
}

#[test]
fn test_cli_missing_input_fails() {
    let temp_dir = TempDir::new().unwrap();
    let result = converter_cmd()
        .args([
            "file",
            "-i",
            temp_dir.path().join("missing.xml").to_str().unwrap(),
            "-o",
            temp_dir.path().join("out").to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(!result.status.success());
}

#[test]
fn test_cli_view() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_values(temp_dir.path(), "values", STRINGS_XML);

    let output = converter_cmd()
        .args(["view", "-i", input.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Entries: 3"));
    assert!(stdout.contains("Plurals: 1"));
    assert!(stdout.contains("Type: Plural"));
    assert!(stdout.contains("one: One apple"));
    assert!(stdout.contains("Value: Hello %@"));
}

#[test]
fn test_cli_view_json() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_values(temp_dir.path(), "values", STRINGS_XML);

    let output = converter_cmd()
        .args(["view", "--json", "-i", input.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"kind\": \"plural\""));
    assert!(stdout.contains("\"key\": \"apples\""));
    assert!(stdout.contains("\"value\": \"Done\""));
}
