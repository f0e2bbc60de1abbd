//! Run configuration resolved from the command line

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::export::ConfigExporter;

/// Base path used by `--cex` without a value
pub const DEFAULT_EXPORT_PATH: &str = "wppg";

/// Formats used when `--cexf` is not given
pub const DEFAULT_EXPORT_FORMATS: &str = "yaml";

/// Environment variable pointing at a template override directory
pub const TEMPLATE_DIR_ENV: &str = "WPPG_TEMPLATE_DIR";

/// Arguments of the `new` command
#[derive(Debug, Clone)]
pub struct NewArgs {
    /// Export the collected options to this base path instead of generating
    pub export: Option<PathBuf>,

    /// Comma-separated export formats
    pub export_formats: String,

    /// Directory the project folder is created in
    pub directory: Option<PathBuf>,

    /// Directory with `<template>.j2` files replacing the embedded templates
    pub template_dir: Option<PathBuf>,

    /// Auto-confirm the summary (non-interactive mode)
    pub yes: bool,
}

impl Default for NewArgs {
    fn default() -> Self {
        Self {
            export: None,
            export_formats: DEFAULT_EXPORT_FORMATS.to_string(),
            directory: None,
            template_dir: None,
            yes: false,
        }
    }
}

/// Terminal branch of a run, decided before any question is asked
#[derive(Debug)]
pub enum RunMode {
    Execute {
        root: PathBuf,
    },
    Export {
        exporter: ConfigExporter,
        base_path: PathBuf,
    },
}

impl NewArgs {
    /// Template override directory: the flag wins over the environment
    pub fn template_dir(&self) -> Option<PathBuf> {
        self.template_dir.clone().or_else(|| {
            std::env::var_os(TEMPLATE_DIR_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        })
    }

    /// Directory the project folder is created in, absolute
    pub fn project_root(&self) -> PathBuf {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        match &self.directory {
            Some(dir) => absolute(&current_dir, dir),
            None => current_dir,
        }
    }

    /// Resolve the terminal branch. Export formats are validated here so an
    /// unsupported one fails before the user answers anything.
    pub fn mode(&self) -> Result<RunMode> {
        match &self.export {
            Some(base_path) => Ok(RunMode::Export {
                exporter: ConfigExporter::new(&self.export_formats)?,
                base_path: base_path.clone(),
            }),
            None => Ok(RunMode::Execute {
                root: self.project_root(),
            }),
        }
    }
}

fn absolute(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
