//! `.editorconfig` for the generated project

use serde_json::json;

use crate::error::Result;
use crate::module::{ExecContext, Module, SummaryEntry};
use crate::options::{Fragment, OptionsStore};
use crate::prompt::Prompter;

use super::project_info;

pub const SLUG: &str = "editor_config";

#[derive(Debug, Clone, Copy, Default)]
pub struct EditorConfig;

impl Module for EditorConfig {
    fn name(&self) -> &'static str {
        "Editor Config"
    }

    fn slug(&self) -> &'static str {
        SLUG
    }

    fn run(&self, _prompter: &mut dyn Prompter, _store: &OptionsStore) -> Result<Fragment> {
        Ok(Fragment::new())
    }

    fn summarize(&self, _fragment: &Fragment) -> Vec<SummaryEntry> {
        vec![SummaryEntry::new("Editor Config", "./.editorconfig")]
    }

    fn execute(&self, options: &OptionsStore, ctx: &ExecContext<'_>) -> Result<()> {
        let slug = options.require_str(project_info::SLUG, "project_slug")?;
        ctx.render_to(
            "editorconfig/editorconfig",
            json!({}),
            format!("{}/.editorconfig", slug),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::testing::store;
    use crate::render::Renderer;

    #[test]
    fn test_execute_writes_editorconfig() {
        let tmp = tempfile::tempdir().unwrap();
        let renderer = Renderer::new().unwrap();
        let ctx = ExecContext::new(&renderer, tmp.path());
        let options = store(&[(project_info::SLUG, json!({"project_slug": "blog"}))]);

        EditorConfig.execute(&options, &ctx).unwrap();

        let text = std::fs::read_to_string(tmp.path().join("blog/.editorconfig")).unwrap();
        assert!(text.starts_with("# https://editorconfig.org"));
    }
}
