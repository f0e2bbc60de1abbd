//! Error taxonomy for the module pipeline and the exporter

use std::path::PathBuf;
use thiserror::Error;

use crate::pipeline::Phase;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A validated question kept failing after the allowed number of attempts.
    #[error("Invalid answer for \"{field}\" after {attempts} attempt(s): {reason}")]
    InvalidInput {
        field: String,
        attempts: u32,
        reason: String,
    },

    #[error("The creation of the project has been cancelled.")]
    Cancelled,

    #[error("Unsupported format: \"{0}\" (supported: yaml, yml, json, xml)")]
    UnsupportedFormat(String),

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Module \"{0}\" has not published its options yet")]
    MissingFragment(String),

    #[error("Option \"{key}\" is missing from module \"{slug}\"")]
    MissingOption { slug: String, key: String },

    #[error("Two modules share the slug \"{0}\"")]
    DuplicateSlug(String),

    #[error("Pipeline is in phase {actual:?}, expected {expected:?}")]
    InvalidPhase { expected: Phase, actual: Phase },

    #[error("Failed to render template \"{template}\": {source}")]
    Render {
        template: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("Failed to encode configuration as {format}: {reason}")]
    Encode { format: &'static str, reason: String },

    #[error("Terminal prompt failed: {0}")]
    Prompt(#[source] std::io::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn missing_option(slug: &str, key: &str) -> Self {
        Self::MissingOption {
            slug: slug.to_string(),
            key: key.to_string(),
        }
    }

    /// Whether the error came from the user declining to proceed.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
