//! Project identity: name and directory slug

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::error::Result;
use crate::module::{ExecContext, Module, SummaryEntry};
use crate::options::{display_value, Fragment, OptionsStore};
use crate::prompt::{ask, Prompter, Question};
use crate::validate::ValidationError;

pub const SLUG: &str = "project_info";

pub const DEFAULT_PROJECT_NAME: &str = "WPPG WordPress Project";

/// Directories created inside the project folder
const PROJECT_DIRS: &[&str] = &["html", "development", "development/docker/php/scripts"];

static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9-]+").expect("slug pattern is valid"));

#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectInfo;

/// Directory-safe form of a project name: `My Project!` becomes `my-project`
pub fn slugify(name: &str) -> String {
    NON_SLUG_CHARS
        .replace_all(name.trim(), "-")
        .to_lowercase()
        .trim_matches('-')
        .to_string()
}

fn validate_project_name(answer: &str) -> std::result::Result<(), ValidationError> {
    if slugify(answer).is_empty() {
        return Err(ValidationError(
            "The name of the project must be a valid name.".to_string(),
        ));
    }
    Ok(())
}

impl Module for ProjectInfo {
    fn name(&self) -> &'static str {
        "Project Info"
    }

    fn slug(&self) -> &'static str {
        SLUG
    }

    fn run(&self, prompter: &mut dyn Prompter, _store: &OptionsStore) -> Result<Fragment> {
        let question = Question::new("Please enter the name of the project")
            .default_value(DEFAULT_PROJECT_NAME)
            .validator(validate_project_name)
            .max_attempts(2);
        let project_name = ask(prompter, &question)?;
        let project_slug = slugify(&project_name);

        let mut fragment = Fragment::new();
        fragment.insert("project_name".into(), Value::String(project_name));
        fragment.insert("project_slug".into(), Value::String(project_slug));
        Ok(fragment)
    }

    fn summarize(&self, fragment: &Fragment) -> Vec<SummaryEntry> {
        vec![
            SummaryEntry::new("Project name", display_value(fragment, "project_name")),
            SummaryEntry::new("Project slug", display_value(fragment, "project_slug")),
        ]
    }

    fn execute(&self, options: &OptionsStore, ctx: &ExecContext<'_>) -> Result<()> {
        let slug = options.require_str(SLUG, "project_slug")?;

        ctx.create_dir(slug)?;
        for dir in PROJECT_DIRS {
            ctx.create_dir(format!("{}/{}", slug, dir))?;
        }
        Ok(())
    }
}
