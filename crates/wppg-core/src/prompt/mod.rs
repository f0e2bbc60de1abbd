//! Prompt capability consumed by the modules
//!
//! A [`Prompter`] performs single attempts; [`ask`] adds defaults, choice
//! checking and the bounded re-prompt loop on top so every front end behaves
//! the same way.

#[cfg(any(test, feature = "test-support"))]
mod scripted;

#[cfg(any(test, feature = "test-support"))]
pub use scripted::ScriptedPrompter;

use crate::error::{Error, Result};
use crate::module::SummaryLine;
use crate::validate::Validator;

/// Attempts allowed for a validated question unless it says otherwise
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// A single question asked to the user
#[derive(Debug, Clone)]
pub struct Question {
    pub prompt: String,
    pub default: Option<String>,
    /// When non-empty the answer must be one of these values
    pub choices: Vec<String>,
    pub validator: Option<Validator>,
    pub max_attempts: u32,
    /// Input is not echoed (passwords)
    pub secret: bool,
}

impl Question {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            default: None,
            choices: Vec::new(),
            validator: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            secret: false,
        }
    }

    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    pub fn validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }
}

/// Front end used to talk to the user
pub trait Prompter {
    /// One raw attempt at answering `question`. An empty answer selects the default.
    fn answer(&mut self, question: &Question) -> Result<String>;

    /// Yes/no question with a stated default
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;

    /// Report a rejected answer before asking again
    fn warn(&mut self, message: &str) -> Result<()>;

    /// Announce the module about to ask its questions
    fn section(&mut self, title: &str) -> Result<()>;

    /// Present the confirmation listing
    fn show_summary(&mut self, title: &str, lines: &[SummaryLine]) -> Result<()>;
}

/// Ask `question` until it validates or runs out of attempts
pub fn ask(prompter: &mut dyn Prompter, question: &Question) -> Result<String> {
    let mut last_reason = String::new();

    for attempt in 1..=question.max_attempts {
        let raw = prompter.answer(question)?;
        let answer = match (&question.default, raw.trim().is_empty()) {
            (Some(default), true) => default.clone(),
            _ => raw.trim().to_string(),
        };

        match check(question, &answer) {
            Ok(()) => return Ok(answer),
            Err(reason) => {
                tracing::debug!(prompt = %question.prompt, attempt, %reason, "answer rejected");
                if attempt < question.max_attempts {
                    prompter.warn(&reason)?;
                }
                last_reason = reason;
            }
        }
    }

    Err(Error::InvalidInput {
        field: question.prompt.clone(),
        attempts: question.max_attempts,
        reason: last_reason,
    })
}

fn check(question: &Question, answer: &str) -> std::result::Result<(), String> {
    if !question.choices.is_empty() && !question.choices.iter().any(|c| c == answer) {
        return Err(format!(
            "\"{}\" is not one of: {}",
            answer,
            question.choices.join(", ")
        ));
    }
    match question.validator {
        Some(validator) => validator(answer).map_err(|e| e.to_string()),
        None => Ok(()),
    }
}
