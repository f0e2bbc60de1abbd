//! Charm-style terminal prompter using cliclack

use colored::Colorize;
use std::io;

use crate::error::{Error, Result};
use crate::module::{summary_blocks, SummaryLine};
use crate::prompt::{Prompter, Question};

/// [`Prompter`] backed by cliclack's inline prompts
#[derive(Debug, Default)]
pub struct CliclackPrompter;

impl CliclackPrompter {
    pub fn new() -> Self {
        Self
    }
}

/// Ctrl-C inside a prompt reads as the user walking away
fn prompt_error(e: io::Error) -> Error {
    if e.kind() == io::ErrorKind::Interrupted {
        Error::Cancelled
    } else {
        Error::Prompt(e)
    }
}

impl Prompter for CliclackPrompter {
    fn answer(&mut self, question: &Question) -> Result<String> {
        if question.secret {
            return cliclack::password(&question.prompt)
                .mask('▪')
                .interact()
                .map_err(prompt_error);
        }

        if !question.choices.is_empty() {
            let mut select = cliclack::select(&question.prompt);
            for choice in &question.choices {
                select = select.item(choice.clone(), choice, "");
            }
            if let Some(default) = &question.default {
                select = select.initial_value(default.clone());
            }
            return select.interact().map_err(prompt_error);
        }

        let mut input = cliclack::input(&question.prompt).required(false);
        if let Some(default) = &question.default {
            input = input.placeholder(default).default_input(default);
        }
        input.interact().map_err(prompt_error)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        cliclack::confirm(prompt)
            .initial_value(default)
            .interact()
            .map_err(prompt_error)
    }

    fn warn(&mut self, message: &str) -> Result<()> {
        cliclack::log::warning(message).map_err(prompt_error)
    }

    fn section(&mut self, title: &str) -> Result<()> {
        cliclack::log::step(title.bold().to_string()).map_err(prompt_error)
    }

    fn show_summary(&mut self, title: &str, lines: &[SummaryLine]) -> Result<()> {
        let body: Vec<String> = summary_blocks(lines)
            .iter()
            .map(|block| {
                let mut text = block.module.bold().to_string();
                for entry in &block.entries {
                    text.push_str(&format!("\n{}: {}", entry.label.cyan(), entry.value));
                }
                text
            })
            .collect();

        cliclack::note(title, body.join("\n\n")).map_err(prompt_error)
    }
}
