//! Configuration exporter
//!
//! Serializes the export document once per requested format and writes each
//! result next to the others (`<base>.yaml`, `<base>.json`, ...). Formats are
//! independent: a failed write is recorded and the remaining formats are
//! still attempted.

pub mod encoder;
pub mod xml;
pub mod yaml;

use serde_json::Value;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub use encoder::{EncoderDescriptor, EncoderOptions, Format};

use crate::error::Result;
use crate::fs::dump_file;

/// Exporter bound to a fixed set of encoders
#[derive(Debug, Clone)]
pub struct ConfigExporter {
    encoders: Vec<EncoderDescriptor>,
}

impl ConfigExporter {
    /// Resolve a comma-separated list of format names (`"yaml,json"`).
    ///
    /// Names are trimmed and lowercased, duplicates (including aliases of the
    /// same encoder) are dropped. Any unknown name fails the whole call.
    pub fn new(formats: &str) -> Result<Self> {
        let mut encoders: Vec<EncoderDescriptor> = Vec::new();

        for name in formats.split(',') {
            let descriptor = encoder::lookup(&name.trim().to_lowercase())?;
            if !encoders.iter().any(|e| e.format == descriptor.format) {
                encoders.push(descriptor);
            }
        }

        tracing::debug!(
            formats = ?encoders.iter().map(|e| e.format).collect::<Vec<_>>(),
            "resolved export encoders"
        );
        Ok(Self { encoders })
    }

    pub fn encoders(&self) -> &[EncoderDescriptor] {
        &self.encoders
    }

    /// Write `document` once per encoder at `<base_path>.<extension>`
    pub fn export(&self, document: &Value, base_path: &Path) -> ExportReport {
        let mut report = ExportReport::default();

        for encoder in &self.encoders {
            let path = with_extension(base_path, encoder.extension());

            let content = match encoder.encode(document) {
                Ok(content) => content,
                Err(e) => {
                    report.failed.push(ExportFailure {
                        format: encoder.format,
                        path,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            if content.is_empty() {
                tracing::debug!(format = ?encoder.format, "empty output, skipping");
                report.skipped.push(encoder.format);
                continue;
            }

            match dump_file(&path, content) {
                Ok(()) => {
                    tracing::info!(path = %path.display(), "exported configuration");
                    report.written.push(path);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "export write failed");
                    report.failed.push(ExportFailure {
                        format: encoder.format,
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        report
    }
}

/// `base` + `.` + `extension`, keeping any dots already in `base`
fn with_extension(base: &Path, extension: &str) -> PathBuf {
    let mut path = OsString::from(base.as_os_str());
    path.push(".");
    path.push(extension);
    PathBuf::from(path)
}

/// Outcome of [`ConfigExporter::export`]
#[derive(Debug, Default)]
pub struct ExportReport {
    pub written: Vec<PathBuf>,
    /// Formats whose encoder produced no output
    pub skipped: Vec<Format>,
    pub failed: Vec<ExportFailure>,
}

impl ExportReport {
    /// True when every attempted write succeeded
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug)]
pub struct ExportFailure {
    pub format: Format,
    pub path: PathBuf,
    pub reason: String,
}
