//! Support for Android `strings.xml` localization format.
//!
//! `<string>` and `<plurals>` resources are read into a [`LocalizationMap`]; every other
//! resource type (`string-array`, `integer-array`, `color`, …) is skipped.
//! Values are decoded the way Android's resource compiler does it (XML entities, backslash
//! escapes, double-quote protection, whitespace collapsing) and their placeholders are
//! rewritten to Apple syntax.

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};
use std::{
    collections::{BTreeMap, btree_map},
    io::BufRead,
};

use crate::{
    error::Error,
    placeholder::to_apple_placeholders,
    traits::Parser,
    types::{Entry, LocalizationMap, PluralCategory, PluralGroup},
};

/// Parser for Android `res/values*/strings.xml` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct AndroidStringsParser;

impl Parser for AndroidStringsParser {
    fn parse_reader<R: BufRead>(&self, reader: R) -> Result<LocalizationMap, Error> {
        let mut xml_reader = Reader::from_reader(reader);

        let mut buf = Vec::new();
        let mut map = LocalizationMap::new();

        // Locate the <resources> root
        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Start(ref e) if e.name().as_ref() == b"resources" => break,
                Event::Empty(ref e) if e.name().as_ref() == b"resources" => {
                    return finish_document(&mut xml_reader, map);
                }
                Event::Start(ref e) | Event::Empty(ref e) => {
                    return Err(Error::InvalidResource(format!(
                        "expected <resources> root element, found <{}>",
                        element_name(e)
                    )));
                }
                Event::Eof => {
                    return Err(Error::InvalidResource(
                        "missing <resources> root element".to_string(),
                    ));
                }
                _ => {}
            }
            buf.clear();
        }

        loop {
            buf.clear();
            match xml_reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => match e.name().as_ref() {
                    b"string" => {
                        let key = required_attribute(e, b"name")?;
                        let raw = read_text_content(&mut xml_reader, "string")?;
                        map.insert(Entry::simple(key, decode_value(&raw)))?;
                    }
                    b"plurals" => {
                        let key = required_attribute(e, b"name")?;
                        let group = parse_plurals(key, &mut xml_reader)?;
                        map.insert(Entry::Plural(group))?;
                    }
                    _ => {
                        let mut skipped = Vec::new();
                        xml_reader.read_to_end_into(e.name(), &mut skipped)?;
                    }
                },
                Event::Empty(ref e) => match e.name().as_ref() {
                    b"string" => {
                        let key = required_attribute(e, b"name")?;
                        map.insert(Entry::simple(key, String::new()))?;
                    }
                    b"plurals" => {
                        let key = required_attribute(e, b"name")?;
                        map.insert(Entry::Plural(PluralGroup::new(key, [])))?;
                    }
                    _ => {}
                },
                // Only </resources> can close at this depth
                Event::End(_) => break,
                Event::Eof => {
                    return Err(Error::InvalidResource(
                        "unexpected end of document inside <resources>".to_string(),
                    ));
                }
                _ => {}
            }
        }

        finish_document(&mut xml_reader, map)
    }
}

// Reads past the root element so trailing garbage is reported instead of ignored.
fn finish_document<R: BufRead>(
    xml_reader: &mut Reader<R>,
    map: LocalizationMap,
) -> Result<LocalizationMap, Error> {
    let mut buf = Vec::new();
    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Eof => return Ok(map),
            Event::Start(ref e) | Event::Empty(ref e) => {
                return Err(Error::InvalidResource(format!(
                    "unexpected <{}> after the <resources> root element",
                    element_name(e)
                )));
            }
            _ => {}
        }
        buf.clear();
    }
}

fn parse_plurals<R: BufRead>(
    key: String,
    xml_reader: &mut Reader<R>,
) -> Result<PluralGroup, Error> {
    let mut forms = BTreeMap::new();
    let mut buf = Vec::new();

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(ref e) if e.name().as_ref() == b"item" => {
                let category = quantity(e)?;
                let raw = read_text_content(xml_reader, "item")?;
                insert_form(&key, &mut forms, category, decode_value(&raw))?;
            }
            Event::Empty(ref e) if e.name().as_ref() == b"item" => {
                let category = quantity(e)?;
                insert_form(&key, &mut forms, category, String::new())?;
            }
            Event::Start(ref e) => {
                let mut skipped = Vec::new();
                xml_reader.read_to_end_into(e.name(), &mut skipped)?;
            }
            Event::End(_) => break,
            Event::Eof => {
                return Err(Error::InvalidResource(format!(
                    "unexpected end of document inside plurals `{}`",
                    key
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(PluralGroup { key, forms })
}

fn insert_form(
    key: &str,
    forms: &mut BTreeMap<PluralCategory, String>,
    category: PluralCategory,
    value: String,
) -> Result<(), Error> {
    match forms.entry(category) {
        btree_map::Entry::Vacant(slot) => {
            slot.insert(value);
            Ok(())
        }
        btree_map::Entry::Occupied(_) => Err(Error::DuplicatePluralCategory {
            key: key.to_string(),
            category: category.to_string(),
        }),
    }
}

fn quantity(e: &BytesStart) -> Result<PluralCategory, Error> {
    required_attribute(e, b"quantity")?
        .parse()
        .map_err(Error::InvalidResource)
}

fn required_attribute(e: &BytesStart, key: &[u8]) -> Result<String, Error> {
    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|e| Error::InvalidResource(e.to_string()))?;
        if attr.key.as_ref() == key {
            return Ok(attr.unescape_value()?.to_string());
        }
    }
    Err(Error::InvalidResource(format!(
        "{} tag missing '{}'",
        element_name(e),
        String::from_utf8_lossy(key)
    )))
}

fn element_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

/// Collects the entity-decoded text of the current element, flattening nested markup
/// such as `<xliff:g>` or `<b>`. Stops after the element's end tag.
fn read_text_content<R: BufRead>(
    xml_reader: &mut Reader<R>,
    element: &str,
) -> Result<String, Error> {
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut depth = 0usize;

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Text(e) => text.push_str(&e.unescape()?),
            Event::CData(e) => {
                let content = String::from_utf8(e.into_inner().into_owned())
                    .map_err(|e| Error::Encoding(e.to_string()))?;
                text.push_str(&content);
            }
            Event::Start(_) => depth += 1,
            Event::End(_) if depth == 0 => break,
            Event::End(_) => depth -= 1,
            Event::Eof => {
                return Err(Error::InvalidResource(format!(
                    "unexpected end of document inside <{}>",
                    element
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}

/// Decodes an Android resource value and converts its placeholders to Apple syntax.
pub(crate) fn decode_value(raw: &str) -> String {
    to_apple_placeholders(&unescape_android(raw))
}

/// Applies Android's string resource rules to entity-decoded text:
/// - backslash escapes (`\n`, `\t`, `\"`, `\'`, `\\`, `\@`, `\?`, `\uXXXX`),
/// - unescaped `"` toggle a protected region and are dropped,
/// - outside protected regions ASCII whitespace runs collapse to one space and the ends are
///   trimmed.
pub fn unescape_android(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    let mut quoted = false;
    let mut pending_space = false;

    while let Some(c) = chars.next() {
        let literal = match c {
            '\\' => match chars.next() {
                Some('n') => '\n',
                Some('t') => '\t',
                Some('u') => match decode_unicode_escape(&mut chars) {
                    Some(decoded) => decoded,
                    None => 'u',
                },
                Some(other) => other,
                None => break,
            },
            '"' => {
                quoted = !quoted;
                continue;
            }
            // Only ASCII whitespace collapses; U+00A0 and friends are content
            c if c.is_ascii_whitespace() && !quoted => {
                if !out.is_empty() {
                    pending_space = true;
                }
                continue;
            }
            c => c,
        };

        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(literal);
    }

    out
}

// Decodes the four hex digits after `\u`, joining a `\uD83D\uDE00` surrogate pair into one
// char. Leaves `chars` untouched when the escape is invalid.
fn decode_unicode_escape(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<char> {
    let mut lookahead = chars.clone();
    let code = read_hex4(&mut lookahead)?;

    let decoded = match code {
        0xD800..=0xDBFF => {
            if lookahead.next()? != '\\' || lookahead.next()? != 'u' {
                return None;
            }
            let low = read_hex4(&mut lookahead)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return None;
            }
            char::from_u32(0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00))?
        }
        _ => char::from_u32(code)?,
    };
    *chars = lookahead;
    Some(decoded)
}

fn read_hex4(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<u32> {
    let mut code = 0u32;
    for _ in 0..4 {
        code = code * 16 + chars.next()?.to_digit(16)?;
    }
    Some(code)
}
