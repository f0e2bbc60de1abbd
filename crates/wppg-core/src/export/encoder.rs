//! Registry of supported export formats

use serde_json::Value;

use super::{xml, yaml};
use crate::error::{Error, Result};

/// Serialization format of an exported configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Yaml,
    Json,
    Xml,
}

impl Format {
    /// Extension of the written file (the `yml` alias also writes `.yaml`)
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Yaml => "yaml",
            Format::Json => "json",
            Format::Xml => "xml",
        }
    }
}

/// Options handed to an encoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncoderOptions {
    Yaml { inline: usize, indent: usize },
    Json { pretty: bool },
    Xml { root: &'static str },
}

/// A resolved `format -> encoder + options` binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderDescriptor {
    pub format: Format,
    pub options: EncoderOptions,
}

const YAML_OPTIONS: EncoderOptions = EncoderOptions::Yaml {
    inline: 2,
    indent: 2,
};

/// Supported format names
const REGISTRY: &[(&str, Format, EncoderOptions)] = &[
    ("yaml", Format::Yaml, YAML_OPTIONS),
    ("yml", Format::Yaml, YAML_OPTIONS),
    ("json", Format::Json, EncoderOptions::Json { pretty: true }),
    (
        "xml",
        Format::Xml,
        EncoderOptions::Xml {
            root: xml::ROOT_ELEMENT,
        },
    ),
];

/// Names accepted by [`lookup`]
pub fn supported_formats() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|(name, _, _)| *name)
}

/// Resolve an already normalized (trimmed, lowercase) format name
pub fn lookup(name: &str) -> Result<EncoderDescriptor> {
    REGISTRY
        .iter()
        .find(|(registered, _, _)| *registered == name)
        .map(|(_, format, options)| EncoderDescriptor {
            format: *format,
            options: options.clone(),
        })
        .ok_or_else(|| Error::UnsupportedFormat(name.to_string()))
}

impl EncoderDescriptor {
    pub fn extension(&self) -> &'static str {
        self.format.extension()
    }

    /// Serialize `document`. A null document encodes to nothing.
    pub fn encode(&self, document: &Value) -> Result<String> {
        if document.is_null() {
            return Ok(String::new());
        }

        match &self.options {
            EncoderOptions::Yaml { inline, indent } => yaml::to_yaml(document, *inline, *indent),
            EncoderOptions::Json { pretty } => {
                let encoded = if *pretty {
                    serde_json::to_string_pretty(document)
                } else {
                    serde_json::to_string(document)
                };
                encoded
                    .map(|mut text| {
                        text.push('\n');
                        text
                    })
                    .map_err(|e| Error::Encode {
                        format: "json",
                        reason: e.to_string(),
                    })
            }
            EncoderOptions::Xml { root } => xml::to_xml(document, root),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_yml_is_an_alias() {
        assert_eq!(lookup("yml").unwrap(), lookup("yaml").unwrap());
        assert_eq!(lookup("yml").unwrap().extension(), "yaml");
    }

    #[test]
    fn test_unknown_format() {
        assert!(matches!(lookup("toml"), Err(Error::UnsupportedFormat(name)) if name == "toml"));
        assert!(lookup("").is_err());
        // lookup expects normalized input
        assert!(lookup("JSON").is_err());
    }

    #[test]
    fn test_null_document_encodes_to_nothing() {
        for name in supported_formats() {
            assert_eq!(lookup(name).unwrap().encode(&Value::Null).unwrap(), "");
        }
    }

    #[test]
    fn test_json_encoding() {
        let text = lookup("json")
            .unwrap()
            .encode(&json!({"generator": "wppg"}))
            .unwrap();
        assert_eq!(text, "{\n  \"generator\": \"wppg\"\n}\n");
    }
}
