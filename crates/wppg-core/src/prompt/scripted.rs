//! Prompter that replays canned answers (tests and scripted runs)

use std::collections::VecDeque;

use super::{Prompter, Question};
use crate::error::{Error, Result};
use crate::module::SummaryLine;

/// Replays answers in order. Confirmations consume an answer too:
/// `y`/`yes`/`n`/`no` (any case), empty for the default.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<String>,
    warnings: Vec<String>,
    sections: Vec<String>,
    summaries: Vec<Vec<SummaryLine>>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Prompts in the order they were asked
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    pub fn summaries(&self) -> &[Vec<SummaryLine>] {
        &self.summaries
    }

    /// Answers not consumed yet
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, prompt: &str) -> Result<String> {
        self.asked.push(prompt.to_string());
        self.answers.pop_front().ok_or_else(|| {
            Error::Prompt(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("no scripted answer left for \"{}\"", prompt),
            ))
        })
    }
}

impl Prompter for ScriptedPrompter {
    fn answer(&mut self, question: &Question) -> Result<String> {
        self.next(&question.prompt)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        let answer = self.next(prompt)?;
        match answer.trim().to_ascii_lowercase().as_str() {
            "" => Ok(default),
            "y" | "yes" => Ok(true),
            "n" | "no" => Ok(false),
            other => Err(Error::Prompt(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("\"{}\" is not a yes/no answer", other),
            ))),
        }
    }

    fn warn(&mut self, message: &str) -> Result<()> {
        self.warnings.push(message.to_string());
        Ok(())
    }

    fn section(&mut self, title: &str) -> Result<()> {
        self.sections.push(title.to_string());
        Ok(())
    }

    fn show_summary(&mut self, _title: &str, lines: &[SummaryLine]) -> Result<()> {
        self.summaries.push(lines.to_vec());
        Ok(())
    }
}
