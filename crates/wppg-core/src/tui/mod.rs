//! CLI prompts using cliclack (Charm-style inline prompts)
//!
//! This module is optional and only available when the `tui` feature is enabled.

mod prompter;
mod wizard;

pub use prompter::CliclackPrompter;
pub use wizard::run;
