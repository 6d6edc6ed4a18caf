pub mod android_strings;
pub mod strings;
pub mod stringsdict;

// Reexporting the formats for easier access
pub use android_strings::AndroidStringsParser;
pub use strings::LocalizableFormatter;
pub use stringsdict::StringsDictFormatter;
