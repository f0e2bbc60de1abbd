//! Git metadata files

use serde_json::json;

use crate::error::Result;
use crate::module::{ExecContext, Module, SummaryEntry};
use crate::options::{Fragment, OptionsStore};
use crate::prompt::Prompter;

use super::project_info;

pub const SLUG: &str = "git";

#[derive(Debug, Clone, Copy, Default)]
pub struct Git;

impl Module for Git {
    fn name(&self) -> &'static str {
        "Git"
    }

    fn slug(&self) -> &'static str {
        SLUG
    }

    fn run(&self, _prompter: &mut dyn Prompter, _store: &OptionsStore) -> Result<Fragment> {
        Ok(Fragment::new())
    }

    fn summarize(&self, _fragment: &Fragment) -> Vec<SummaryEntry> {
        vec![
            SummaryEntry::new("Git ignore", "./.gitignore"),
            SummaryEntry::new("Git attributes", "./.gitattributes"),
        ]
    }

    fn execute(&self, options: &OptionsStore, ctx: &ExecContext<'_>) -> Result<()> {
        let slug = options.require_str(project_info::SLUG, "project_slug")?;

        ctx.render_to("git/gitignore", json!({}), format!("{}/.gitignore", slug))?;
        ctx.render_to(
            "git/gitattributes",
            json!({}),
            format!("{}/.gitattributes", slug),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::modules::testing::store;
    use crate::render::Renderer;

    #[test]
    fn test_execute_writes_into_project_folder() {
        let tmp = tempfile::tempdir().unwrap();
        let renderer = Renderer::new().unwrap();
        let ctx = ExecContext::new(&renderer, tmp.path());
        let options = store(&[(project_info::SLUG, json!({"project_slug": "blog"}))]);

        Git.execute(&options, &ctx).unwrap();

        assert!(tmp.path().join("blog/.gitignore").is_file());
        assert!(tmp.path().join("blog/.gitattributes").is_file());
    }

    #[test]
    fn test_execute_without_project_slug() {
        let tmp = tempfile::tempdir().unwrap();
        let renderer = Renderer::new().unwrap();
        let ctx = ExecContext::new(&renderer, tmp.path());
        let options = store(&[(project_info::SLUG, json!({"project_name": "Blog"}))]);

        assert!(matches!(
            Git.execute(&options, &ctx),
            Err(Error::MissingOption { .. })
        ));
    }

    #[test]
    fn test_export_is_empty() {
        let options = store(&[(SLUG, json!({}))]);
        assert!(Git.export(&options).is_empty());
    }
}
