//! Support for Apple `.stringsdict` plural rule files.
//!
//! Every plural group becomes one dictionary keyed by the group's key:
//! `NSStringLocalizedFormatKey` points at a single variable (`format`) whose
//! `NSStringPluralRuleType` dictionary holds one string per present plural category.

use std::io::Write;

use indoc::indoc;
use quick_xml::{
    Writer,
    escape::partial_escape,
    events::{BytesEnd, BytesStart, BytesText, Event},
};

use crate::{
    error::Error,
    placeholder::{plural_specifier, to_apple_placeholders},
    traits::Formatter,
    types::{LocalizationMap, PluralGroup},
};

/// Name of the variable every plural group is resolved through.
pub const FORMAT_VARIABLE: &str = "format";

const PLIST_HEADER: &str = indoc! {r#"
    <?xml version="1.0" encoding="UTF-8"?>
    <!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
    <plist version="1.0">
"#};

const PLIST_FOOTER: &str = "\n</plist>\n";

/// Writer for `Localizable.stringsdict`.
///
/// Fails with [`Error::NoPlurals`] when the map has no plural group, so callers can skip
/// the file, and with [`Error::Format`] when a group has no `other` form.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringsDictFormatter;

impl Formatter for StringsDictFormatter {
    fn write_to<W: Write>(&self, map: &LocalizationMap, mut writer: W) -> Result<(), Error> {
        if !map.has_plurals() {
            return Err(Error::NoPlurals);
        }
        // Validate every group before writing anything
        if let Some(group) = map.plurals().find(|group| group.other().is_none()) {
            return Err(Error::format_error(format!(
                "plural `{}` has no `other` form",
                group.key
            )));
        }

        writer.write_all(PLIST_HEADER.as_bytes())?;
        {
            let mut xml_writer = Writer::new_with_indent(&mut writer, b'\t', 1);
            xml_writer.write_event(Event::Start(BytesStart::new("dict")))?;
            for group in map.plurals() {
                write_plural_group(&mut xml_writer, group)?;
            }
            xml_writer.write_event(Event::End(BytesEnd::new("dict")))?;
        }
        writer.write_all(PLIST_FOOTER.as_bytes())?;
        Ok(())
    }
}

fn write_plural_group<W: Write>(
    xml_writer: &mut Writer<W>,
    group: &PluralGroup,
) -> Result<(), Error> {
    let other = to_apple_placeholders(group.other().unwrap_or_default());
    let specifier = plural_specifier(&other);

    let format_key = match specifier.as_ref().and_then(|token| token.index) {
        Some(index) => format!("%{}$#@{}@", index, FORMAT_VARIABLE),
        None => format!("%#@{}@", FORMAT_VARIABLE),
    };
    let value_type = specifier
        .map(|token| token.value_type())
        .unwrap_or_else(|| "d".to_string());

    write_text_element(xml_writer, "key", &group.key)?;
    xml_writer.write_event(Event::Start(BytesStart::new("dict")))?;
    write_text_element(xml_writer, "key", "NSStringLocalizedFormatKey")?;
    write_text_element(xml_writer, "string", &format_key)?;
    write_text_element(xml_writer, "key", FORMAT_VARIABLE)?;

    xml_writer.write_event(Event::Start(BytesStart::new("dict")))?;
    write_text_element(xml_writer, "key", "NSStringFormatSpecTypeKey")?;
    write_text_element(xml_writer, "string", "NSStringPluralRuleType")?;
    write_text_element(xml_writer, "key", "NSStringFormatValueTypeKey")?;
    write_text_element(xml_writer, "string", &value_type)?;
    for (category, value) in &group.forms {
        write_text_element(xml_writer, "key", category.as_str())?;
        write_text_element(xml_writer, "string", &to_apple_placeholders(value))?;
    }
    xml_writer.write_event(Event::End(BytesEnd::new("dict")))?;

    xml_writer.write_event(Event::End(BytesEnd::new("dict")))?;
    Ok(())
}

fn write_text_element<W: Write>(
    xml_writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), Error> {
    xml_writer.write_event(Event::Start(BytesStart::new(name)))?;
    xml_writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
    xml_writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
