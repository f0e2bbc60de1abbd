//! wppg core - module pipeline behind the WordPress project generator
//!
//! A run asks each module its questions, shows the collected options for
//! confirmation, then either generates the project (Docker Compose stack,
//! vhost, WP-CLI entrypoint, git and editor files) or exports the options as
//! configuration files.
//!
//! # Architecture
//!
//! - **Modules** ([`Module`]): one concern each, exchanging data only through
//!   the [`OptionsStore`], in the order given by [`modules::default_modules`]
//! - **Pipeline** ([`Pipeline`]): the `collect -> summarize -> confirm ->
//!   execute | export` state machine
//! - **Exporter** ([`ConfigExporter`]): yaml / json / xml writers
//! - **Front end**: the [`Prompter`] seam, with a cliclack implementation
//!   behind the `tui` feature
//!
//! # Feature Flags
//!
//! - `tui` (default): cliclack-based prompts and the interactive [`run`] entry point
//! - `test-support`: exposes [`prompt::ScriptedPrompter`] for integration tests
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use wppg_core::{modules, ExecContext, Pipeline, Renderer, Terminal};
//!
//! let renderer = Renderer::new()?;
//! let mut pipeline = Pipeline::new(modules::default_modules())?;
//! pipeline.run(&mut my_prompter, Terminal::Execute(ExecContext::new(&renderer, ".")))?;
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod fs;
pub mod module;
pub mod modules;
pub mod options;
pub mod pipeline;
pub mod prompt;
pub mod render;
pub mod validate;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{NewArgs, RunMode};
pub use error::{Error, Result};
pub use export::{ConfigExporter, ExportReport, Format};
pub use module::{summary_blocks, ExecContext, Module, SummaryBlock, SummaryEntry, SummaryLine};
pub use options::{Fragment, OptionsStore};
pub use pipeline::{ExportMetadata, ExportPlan, Outcome, Phase, Pipeline, Terminal};
pub use prompt::{Prompter, Question};
pub use render::Renderer;

#[cfg(feature = "tui")]
pub use tui::run;

/// Value of the `generator` field of exported configurations
pub const GENERATOR: &str = "wppg";
