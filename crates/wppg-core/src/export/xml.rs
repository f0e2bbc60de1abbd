//! XML encoding
//!
//! Layout: a `<response>` root, one element per mapping key, sequences repeat
//! the element of their key, and keys that are not valid element names (or
//! sequence items without a key) become `<item key="...">`.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

pub const ROOT_ELEMENT: &str = "response";

pub fn to_xml(value: &Value, root: &str) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(encode_error)?;
    write_element(&mut writer, root, value)?;

    let mut text = String::from_utf8(writer.into_inner()).map_err(encode_error)?;
    text.push('\n');
    Ok(text)
}

fn write_element(writer: &mut Writer<Vec<u8>>, key: &str, value: &Value) -> Result<()> {
    let (tag, key_attr) = if is_element_name(key) {
        (key, None)
    } else {
        ("item", Some(key))
    };
    write_tagged(writer, tag, key_attr, value)
}

fn write_tagged(
    writer: &mut Writer<Vec<u8>>,
    tag: &str,
    key_attr: Option<&str>,
    value: &Value,
) -> Result<()> {
    let mut start = BytesStart::new(tag);
    if let Some(key) = key_attr {
        check_chars(key)?;
        start.push_attribute(("key", key));
    }

    let text = match value {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => {
            check_chars(s)?;
            Some(s.clone())
        }
        Value::Object(map) if map.is_empty() => None,
        Value::Array(items) if items.is_empty() => None,
        Value::Object(map) => {
            write(writer, Event::Start(start))?;
            write_children(writer, map)?;
            return write(writer, Event::End(BytesEnd::new(tag)));
        }
        Value::Array(items) => {
            write(writer, Event::Start(start))?;
            for (index, item) in items.iter().enumerate() {
                write_tagged(writer, "item", Some(&index.to_string()), item)?;
            }
            return write(writer, Event::End(BytesEnd::new(tag)));
        }
    };

    match text {
        None => write(writer, Event::Empty(start)),
        Some(text) => {
            write(writer, Event::Start(start))?;
            write(writer, Event::Text(BytesText::new(&text)))?;
            write(writer, Event::End(BytesEnd::new(tag)))
        }
    }
}

fn write_children(writer: &mut Writer<Vec<u8>>, map: &Map<String, Value>) -> Result<()> {
    for (key, value) in map {
        match value {
            Value::Array(items) if !items.is_empty() && is_element_name(key) => {
                for item in items {
                    write_tagged(writer, key, None, item)?;
                }
            }
            _ => write_element(writer, key, value)?,
        }
    }
    Ok(())
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer.write_event(event).map_err(encode_error)
}

/// XML 1.0 name restricted to ASCII, not starting with `xml`
fn is_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    let first_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    first_ok
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        && !name.to_ascii_lowercase().starts_with("xml")
}

/// XML 1.0 cannot carry C0 controls (other than tab, LF, CR) or U+FFFE/U+FFFF,
/// not even as character references
fn check_chars(text: &str) -> Result<()> {
    let allowed = |c: char| {
        matches!(c,
            '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..)
    };
    match text.chars().find(|c| !allowed(*c)) {
        Some(c) => Err(encode_error(format!(
            "character U+{:04X} cannot be represented in XML",
            u32::from(c)
        ))),
        None => Ok(()),
    }
}

fn encode_error(e: impl std::fmt::Display) -> Error {
    Error::Encode {
        format: "xml",
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_element_names() {
        assert!(is_element_name("project_info"));
        assert!(is_element_name("MYSQL_DATABASE"));
        assert!(!is_element_name("0"));
        assert!(!is_element_name("has space"));
        assert!(!is_element_name("xmlns"));
        assert!(!is_element_name(""));
    }

    #[test]
    fn test_document_shape() {
        let doc = json!({
            "generator": "wppg",
            "docker_compose": {
                "phpmyadmin": true,
                "ports": ["80:80", "443:443"],
                "8080": "odd key",
                "note": "a < b & c",
                "empty": null,
            },
        });

        let text = to_xml(&doc, ROOT_ELEMENT).unwrap();
        assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));

        let parsed = roxmltree::Document::parse(&text).unwrap();
        let root = parsed.root_element();
        assert_eq!(root.tag_name().name(), "response");

        fn child<'a, 'input>(
            parent: roxmltree::Node<'a, 'input>,
            name: &str,
        ) -> roxmltree::Node<'a, 'input> {
            parent.children().find(|n| n.has_tag_name(name)).unwrap()
        }

        assert_eq!(child(root, "generator").text(), Some("wppg"));

        let stack = child(root, "docker_compose");
        assert_eq!(child(stack, "phpmyadmin").text(), Some("true"));
        let ports: Vec<_> = stack
            .children()
            .filter(|n| n.has_tag_name("ports"))
            .map(|n| n.text().unwrap())
            .collect();
        assert_eq!(ports, vec!["80:80", "443:443"]);
        let odd = child(stack, "item");
        assert_eq!(odd.attribute("key"), Some("8080"));
        assert_eq!(odd.text(), Some("odd key"));
        assert_eq!(child(stack, "note").text(), Some("a < b & c"));
        assert!(child(stack, "empty").text().is_none());
    }

    #[test]
    fn test_rejects_characters_xml_cannot_hold() {
        let err = to_xml(&json!({"name": "a\u{1}b"}), ROOT_ELEMENT).unwrap_err();
        assert!(matches!(err, Error::Encode { format: "xml", .. }));

        let err = to_xml(&json!({"bad key \u{2}": "x"}), ROOT_ELEMENT).unwrap_err();
        assert!(err.to_string().contains("U+0002"));

        // DEL and C1 controls are legal XML 1.0 characters
        let text = to_xml(&json!({"name": "a\u{7f}\u{85}b"}), ROOT_ELEMENT).unwrap();
        let parsed = roxmltree::Document::parse(&text).unwrap();
        let name = parsed.root_element().first_element_child().unwrap();
        assert_eq!(name.text(), Some("a\u{7f}\u{85}b"));
    }

    #[test]
    fn test_top_level_sequence() {
        let text = to_xml(&json!(["a", "b"]), ROOT_ELEMENT).unwrap();
        let parsed = roxmltree::Document::parse(&text).unwrap();
        let items: Vec<_> = parsed
            .root_element()
            .children()
            .filter(|n| n.is_element())
            .map(|n| (n.attribute("key").unwrap(), n.text().unwrap()))
            .collect();

        assert_eq!(items, vec![("0", "a"), ("1", "b")]);
    }
}
