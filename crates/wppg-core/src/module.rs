//! Module contract
//!
//! A module owns one concern of the generated project (identity, stack, VCS
//! metadata, editor settings). Modules only exchange data through the
//! [`OptionsStore`], addressed by slug, never through each other's internals.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::fs::dump_file;
use crate::options::{Fragment, OptionsStore};
use crate::prompt::Prompter;
use crate::render::Renderer;

/// A pluggable unit of the generator pipeline
pub trait Module {
    /// Human-readable label used for progress and summary headers
    fn name(&self) -> &'static str;

    /// Unique key of the module's fragment in the options store
    fn slug(&self) -> &'static str;

    /// Ask the module's questions. `store` holds the fragments of the modules
    /// that ran before this one.
    fn run(&self, prompter: &mut dyn Prompter, store: &OptionsStore) -> Result<Fragment>;

    /// Project the collected fragment into display entries
    fn summarize(&self, fragment: &Fragment) -> Vec<SummaryEntry>;

    /// Generate the module's artifacts from the complete options store
    fn execute(&self, options: &OptionsStore, ctx: &ExecContext<'_>) -> Result<()>;

    /// Options written to the exported configuration. Empty excludes the module.
    fn export(&self, options: &OptionsStore) -> Fragment {
        options.fragment(self.slug()).cloned().unwrap_or_default()
    }
}

/// One `label: value` row of the confirmation listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
    pub label: String,
    pub value: String,
}

impl SummaryEntry {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Row of the flattened confirmation listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryLine {
    Entry {
        /// Name of the module the entry belongs to
        module: &'static str,
        entry: SummaryEntry,
    },
    /// Break between two modules' blocks, naming the block that follows
    Separator { next: &'static str },
}

/// Block of the confirmation listing headed by its module's name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryBlock<'a> {
    pub module: &'static str,
    pub entries: Vec<&'a SummaryEntry>,
}

/// Regroup a flattened listing into one block per module, in order
pub fn summary_blocks(lines: &[SummaryLine]) -> Vec<SummaryBlock<'_>> {
    let mut blocks: Vec<SummaryBlock<'_>> = Vec::new();

    for line in lines {
        match line {
            SummaryLine::Separator { next } => blocks.push(SummaryBlock {
                module: *next,
                entries: Vec::new(),
            }),
            SummaryLine::Entry { module, entry } => match blocks.last_mut() {
                Some(block) => block.entries.push(entry),
                None => blocks.push(SummaryBlock {
                    module: *module,
                    entries: vec![entry],
                }),
            },
        }
    }
    blocks
}

/// Collaborators available to `Module::execute`
pub struct ExecContext<'a> {
    renderer: &'a Renderer,
    root: PathBuf,
}

impl<'a> ExecContext<'a> {
    /// `root` is the directory the project folder is created in
    pub fn new(renderer: &'a Renderer, root: impl Into<PathBuf>) -> Self {
        Self {
            renderer,
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn render<S: Serialize>(&self, template: &str, variables: S) -> Result<String> {
        self.renderer.render(template, variables)
    }

    /// Create a directory (and its parents) relative to the root
    pub fn create_dir(&self, relative: impl AsRef<Path>) -> Result<()> {
        let path = self.root.join(relative);
        std::fs::create_dir_all(&path).map_err(|e| Error::io(&path, e))?;
        tracing::debug!(path = %path.display(), "created directory");
        Ok(())
    }

    /// Write a file relative to the root, creating parent directories
    pub fn write_file(&self, relative: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Result<()> {
        let path = self.root.join(relative);
        dump_file(&path, contents).map_err(|e| Error::io(&path, e))
    }

    /// Render `template` and write the result to `relative`
    pub fn render_to<S: Serialize>(
        &self,
        template: &str,
        variables: S,
        relative: impl AsRef<Path>,
    ) -> Result<()> {
        let content = self.render(template, variables)?;
        self.write_file(relative, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(module: &'static str, label: &str) -> SummaryLine {
        SummaryLine::Entry {
            module,
            entry: SummaryEntry::new(label, "x"),
        }
    }

    #[test]
    fn test_summary_blocks_are_headed_by_module() {
        let lines = vec![
            entry("Project Info", "Project name"),
            entry("Project Info", "Project slug"),
            SummaryLine::Separator { next: "Git" },
            entry("Git", "Git ignore"),
        ];

        let blocks = summary_blocks(&lines);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].module, "Project Info");
        assert_eq!(blocks[0].entries.len(), 2);
        assert_eq!(blocks[1].module, "Git");
        assert_eq!(blocks[1].entries[0].label, "Git ignore");
    }

    #[test]
    fn test_summary_blocks_keep_empty_modules() {
        let lines = vec![
            entry("Project Info", "Project name"),
            SummaryLine::Separator { next: "Editor Config" },
            SummaryLine::Separator { next: "Git" },
            entry("Git", "Git ignore"),
        ];

        let modules: Vec<_> = summary_blocks(&lines).iter().map(|b| b.module).collect();

        assert_eq!(modules, vec!["Project Info", "Editor Config", "Git"]);
    }
}
