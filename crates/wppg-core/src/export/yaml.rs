//! YAML encoding with a fixed inline depth
//!
//! Collections up to `inline` levels deep are written in block style; anything
//! deeper is written on one line in flow style (JSON syntax, which is valid
//! YAML). Scalars are formatted by serde_yaml so quoting follows its rules.

use serde_json::Value;

use crate::error::{Error, Result};

pub fn to_yaml(value: &Value, inline: usize, indent: usize) -> Result<String> {
    let mut out = String::new();
    if is_block(value, inline) {
        write_block(&mut out, value, inline, indent, 0)?;
    } else {
        out.push_str(&inline_value(value)?);
        out.push('\n');
    }
    Ok(out)
}

fn is_block(value: &Value, inline: usize) -> bool {
    inline > 0
        && match value {
            Value::Object(map) => !map.is_empty(),
            Value::Array(items) => !items.is_empty(),
            _ => false,
        }
}

fn write_block(
    out: &mut String,
    value: &Value,
    inline: usize,
    indent: usize,
    depth: usize,
) -> Result<()> {
    let pad = " ".repeat(indent * depth);
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                out.push_str(&pad);
                out.push_str(&scalar(&Value::String(key.clone()))?);
                out.push(':');
                write_child(out, child, inline, indent, depth)?;
            }
        }
        Value::Array(items) => {
            for child in items {
                out.push_str(&pad);
                out.push('-');
                write_child(out, child, inline, indent, depth)?;
            }
        }
        other => {
            out.push_str(&pad);
            out.push_str(&inline_value(other)?);
            out.push('\n');
        }
    }
    Ok(())
}

fn write_child(
    out: &mut String,
    child: &Value,
    inline: usize,
    indent: usize,
    depth: usize,
) -> Result<()> {
    if is_block(child, inline - 1) {
        out.push('\n');
        write_block(out, child, inline - 1, indent, depth + 1)
    } else {
        out.push(' ');
        out.push_str(&inline_value(child)?);
        out.push('\n');
        Ok(())
    }
}

fn inline_value(value: &Value) -> Result<String> {
    match value {
        Value::Object(_) | Value::Array(_) => json_quoted(value),
        _ => scalar(value),
    }
}

fn scalar(value: &Value) -> Result<String> {
    if let Value::String(s) = value {
        // serde_yaml would switch to a block literal, which cannot sit on a key line
        if s.contains('\n') || s.contains('\r') || !s.chars().all(is_printable) {
            return json_quoted(value);
        }
    }
    let text = serde_yaml::to_string(value).map_err(encode_error)?;
    Ok(text.trim_end_matches('\n').to_string())
}

/// JSON text with every character YAML cannot carry raw written as `\uXXXX`.
/// serde_json already escapes C0 controls; DEL and C1 controls pass through it.
fn json_quoted(value: &Value) -> Result<String> {
    let text = serde_json::to_string(value).map_err(encode_error)?;
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if is_printable(c) {
            out.push(c);
        } else {
            // only reachable for characters inside string literals, all in the BMP
            out.push_str(&format!("\\u{:04X}", u32::from(c)));
        }
    }
    Ok(out)
}

/// YAML printable characters, minus the ones YAML 1.1 readers treat as line
/// breaks (NEL, LS, PS) and the byte order mark
fn is_printable(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{7E}' | '\u{A0}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..)
        && !matches!(c, '\u{2028}' | '\u{2029}' | '\u{FEFF}')
}

fn encode_error(e: impl std::fmt::Display) -> Error {
    Error::Encode {
        format: "yaml",
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_inline_depth_two() {
        let doc = json!({
            "generator": "wppg",
            "docker_compose": {
                "webserver": "apache",
                "webserver_port": 80,
                "services": {"php": {"image": "x"}},
                "ports": ["80:80"],
            },
        });

        let text = to_yaml(&doc, 2, 2).unwrap();

        assert_eq!(
            text,
            "generator: wppg\n\
             docker_compose:\n  \
               webserver: apache\n  \
               webserver_port: 80\n  \
               services: {\"php\":{\"image\":\"x\"}}\n  \
               ports: [\"80:80\"]\n"
        );
    }

    #[test]
    fn test_indent_width() {
        let doc = json!({"a": {"b": 1}});
        assert_eq!(to_yaml(&doc, 2, 4).unwrap(), "a:\n    b: 1\n");
    }

    #[test]
    fn test_reparses_to_same_value() {
        let doc = json!({
            "version": "0.3.0",
            "project_info": {"project_name": "Yes: a \"quoted\" name", "project_slug": "yes"},
            "docker_compose": {"php_version": "7.2", "phpmyadmin": true, "db_port": 3306},
            "notes": {"multi": "line one\nline two"},
            "list": [{"a": 1}, "x"],
            "empty": {},
        });

        let text = to_yaml(&doc, 2, 2).unwrap();
        let back: Value = serde_yaml::from_str(&text).unwrap();

        assert_eq!(back, doc);
    }

    #[test]
    fn test_control_characters_are_escaped() {
        let doc = json!({
            "nested": {"flow": {"del": "a\u{7f}b", "c1": "x\u{85}\u{9b}y"}},
            "top": "bell\u{7}del\u{7f}",
            "list": [["\u{1}"]],
        });

        let text = to_yaml(&doc, 2, 2).unwrap();

        assert!(!text.contains('\u{7f}'));
        assert!(!text.contains('\u{9b}'));
        assert!(text.contains("\\u007F"));
        let back: Value = serde_yaml::from_str(&text).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_scalar_document() {
        assert_eq!(to_yaml(&json!("plain"), 2, 2).unwrap(), "plain\n");
        assert_eq!(to_yaml(&json!({}), 2, 2).unwrap(), "{}\n");
    }
}
