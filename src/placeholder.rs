//! Placeholder parsing and Android → Apple format specifier translation.
//!
//! Android resources use Java `Formatter` syntax (`%s`, `%1$d`), Apple strings use
//! `NSString` syntax (`%@`, `%1$@`). Only string and integer conversions differ
//! between the two; every other specifier is copied as written.

use std::ops::Range;

/// A printf-style placeholder found in a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderToken {
    /// Explicit positional index (`%2$d` → `Some(2)`).
    pub index: Option<usize>,
    /// Flags, width and precision, as written (`%-5.2f` → `-5.2`).
    pub modifiers: String,
    /// Length modifier (`l`, `ll`, `h`, …).
    pub length: String,
    /// Conversion character (`s`, `d`, `@`, …).
    pub conversion: char,
    /// Byte range of the whole token in the scanned string.
    pub span: Range<usize>,
}

impl PlaceholderToken {
    pub fn is_integer(&self) -> bool {
        matches!(self.conversion, 'd' | 'i' | 'u' | 'o' | 'x' | 'X')
    }

    pub fn is_object(&self) -> bool {
        matches!(self.conversion, '@' | 's')
    }

    /// The `NSStringFormatValueTypeKey` spelling of this token (`ld`, `d`, `f`).
    pub fn value_type(&self) -> String {
        format!("{}{}", self.length, self.conversion)
    }

    /// Re-renders the token in Apple syntax.
    pub fn to_apple(&self) -> String {
        let mut out = String::from("%");
        if let Some(index) = self.index {
            out.push_str(&index.to_string());
            out.push('$');
        }
        out.push_str(&self.modifiers);
        match self.conversion {
            's' => out.push('@'),
            'd' | 'i' => {
                out.push_str(&self.length);
                out.push('d');
            }
            other => {
                out.push_str(&self.length);
                out.push(other);
            }
        }
        out
    }
}

enum Scanned {
    EscapedPercent,
    Token(PlaceholderToken),
    NotAPlaceholder,
}

// `start` must point at a '%'.
fn scan_at(input: &str, start: usize) -> Scanned {
    let bytes = input.as_bytes();
    let mut j = start + 1;

    if j < bytes.len() && bytes[j] == b'%' {
        return Scanned::EscapedPercent;
    }

    // Optional positional index: digits followed by '$'
    let mut index = None;
    let start_digits = j;
    while j < bytes.len() && bytes[j].is_ascii_digit() {
        j += 1;
    }
    if j > start_digits && j < bytes.len() && bytes[j] == b'$' {
        index = input[start_digits..j].parse::<usize>().ok();
        j += 1;
    } else {
        // digits were a width, not a position
        j = start_digits;
    }

    let start_modifiers = j;
    // No space flag: "100% sure" is prose
    while j < bytes.len() && matches!(bytes[j], b'-' | b'+' | b'#' | b'0') {
        j += 1;
    }
    while j < bytes.len() && bytes[j].is_ascii_digit() {
        j += 1;
    }
    if j + 1 < bytes.len() && bytes[j] == b'.' && bytes[j + 1].is_ascii_digit() {
        j += 1;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
    }
    let modifiers = input[start_modifiers..j].to_string();

    let start_length = j;
    while j < bytes.len() && matches!(bytes[j], b'l' | b'h' | b'q' | b'z' | b't' | b'j') {
        j += 1;
    }
    let length = input[start_length..j].to_string();

    if j < bytes.len() && (bytes[j].is_ascii_alphabetic() || bytes[j] == b'@') {
        return Scanned::Token(PlaceholderToken {
            index,
            modifiers,
            length,
            conversion: bytes[j] as char,
            span: start..j + 1,
        });
    }

    Scanned::NotAPlaceholder
}

/// Extracts placeholder tokens from a string in occurrence order.
/// Escaped percents (`%%`) are not placeholders.
pub fn extract_placeholders(input: &str) -> Vec<PlaceholderToken> {
    let mut out = Vec::new();
    let mut i = 0;

    while let Some(offset) = input[i..].find('%') {
        let start = i + offset;
        match scan_at(input, start) {
            Scanned::EscapedPercent => i = start + 2,
            Scanned::Token(token) => {
                i = token.span.end;
                out.push(token);
            }
            Scanned::NotAPlaceholder => i = start + 1,
        }
    }

    out
}

/// Convert Android-style placeholders to Apple-style.
/// - %s   -> %@
/// - %1$s -> %1$@
/// - %i   -> %d
///
/// `%%` and every other specifier are left as written, so the transform is idempotent.
pub fn to_apple_placeholders(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while let Some(offset) = input[i..].find('%') {
        let start = i + offset;
        out.push_str(&input[i..start]);
        match scan_at(input, start) {
            Scanned::EscapedPercent => {
                out.push_str("%%");
                i = start + 2;
            }
            Scanned::Token(token) => {
                if matches!(token.conversion, 's' | 'd' | 'i') {
                    out.push_str(&token.to_apple());
                } else {
                    out.push_str(&input[token.span.clone()]);
                }
                i = token.span.end;
            }
            Scanned::NotAPlaceholder => {
                out.push('%');
                i = start + 1;
            }
        }
    }
    out.push_str(&input[i..]);

    out
}

/// The placeholder carrying the plural count: the first integer specifier, else the first
/// non-object specifier.
pub fn plural_specifier(input: &str) -> Option<PlaceholderToken> {
    let tokens = extract_placeholders(input);
    tokens
        .iter()
        .find(|token| token.is_integer())
        .or_else(|| tokens.iter().find(|token| !token.is_object()))
        .cloned()
}
