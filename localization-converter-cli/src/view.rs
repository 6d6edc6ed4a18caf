use std::path::Path;

use localization_converter::{
    Entry, Error, FileSystem, LocalizationMap, Parser, converter::decode_text,
    formats::AndroidStringsParser,
};

/// Reads and parses one `strings.xml`.
pub fn read_map<F: FileSystem>(fs: &F, input: &Path) -> Result<LocalizationMap, Error> {
    let bytes = fs.read_bytes(input)?;
    AndroidStringsParser.parse(&decode_text(&bytes)?)
}

/// Print the entries of a parsed resource file.
pub fn print_view(map: &LocalizationMap, full: bool) {
    println!("Entries: {}", map.len());
    println!("Plurals: {}", map.plurals().count());

    for (i, entry) in map.iter().enumerate() {
        println!("\n  Entry {}: {}", i + 1, entry.key());
        match entry {
            Entry::Simple(simple) => {
                println!("    Type: Simple");
                println!("    Value: {}", display_value(&simple.value, full));
            }
            Entry::Plural(group) => {
                println!("    Type: Plural");
                for (category, value) in &group.forms {
                    println!("    {}: {}", category, display_value(value, full));
                }
            }
        }
    }
}

/// Print the entries as pretty JSON.
pub fn print_json(map: &LocalizationMap) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(map)?);
    Ok(())
}

fn display_value(value: &str, full: bool) -> String {
    const MAX_CHARS: usize = 50;
    if full || value.chars().count() <= MAX_CHARS {
        value.to_string()
    } else {
        let truncated: String = value.chars().take(MAX_CHARS).collect();
        format!("{}...", truncated)
    }
}
