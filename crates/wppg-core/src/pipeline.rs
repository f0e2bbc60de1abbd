//! Pipeline orchestrator
//!
//! Drives the modules through `collect -> summarize -> confirm`, then either
//! executes them or exports the collected options. Each phase method checks the
//! current [`Phase`], so a pipeline cannot execute twice or export before the
//! user confirmed.

use chrono::{DateTime, FixedOffset, Local, SecondsFormat};
use serde_json::{Map, Value};
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::export::{ConfigExporter, ExportReport};
use crate::module::{ExecContext, Module, SummaryLine};
use crate::options::OptionsStore;
use crate::prompt::Prompter;

pub const SUMMARY_TITLE: &str = "Please confirm before proceeding";
pub const CONFIRM_PROMPT: &str = "Would you like to proceed?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Init,
    Collecting,
    Summarizing,
    AwaitingConfirmation,
    Exporting,
    Executing,
    Done,
    Cancelled,
}

/// Header fields of the exported configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportMetadata {
    pub generator: String,
    pub version: String,
}

impl ExportMetadata {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            generator: crate::GENERATOR.to_string(),
            version: version.into(),
        }
    }
}

/// Everything the export branch needs
#[derive(Debug)]
pub struct ExportPlan {
    pub exporter: ConfigExporter,
    pub base_path: PathBuf,
    pub metadata: ExportMetadata,
}

/// What happens after the user confirmed
pub enum Terminal<'a> {
    Execute(ExecContext<'a>),
    Export(ExportPlan),
}

#[derive(Debug)]
pub enum Outcome {
    Executed,
    Exported(ExportReport),
}

pub struct Pipeline {
    modules: Vec<Box<dyn Module>>,
    store: OptionsStore,
    phase: Phase,
    auto_confirm: bool,
}

impl Pipeline {
    /// Modules run in the given order; slugs must be unique.
    pub fn new(modules: Vec<Box<dyn Module>>) -> Result<Self> {
        for (i, module) in modules.iter().enumerate() {
            if modules[..i].iter().any(|m| m.slug() == module.slug()) {
                return Err(Error::DuplicateSlug(module.slug().to_string()));
            }
        }

        Ok(Self {
            modules,
            store: OptionsStore::new(),
            phase: Phase::Init,
            auto_confirm: false,
        })
    }

    /// Skip the confirmation question
    pub fn auto_confirm(mut self, yes: bool) -> Self {
        self.auto_confirm = yes;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn store(&self) -> &OptionsStore {
        &self.store
    }

    fn expect_phase(&self, expected: Phase) -> Result<()> {
        if self.phase != expected {
            return Err(Error::InvalidPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    fn enter(&mut self, phase: Phase) {
        tracing::debug!(from = ?self.phase, to = ?phase, "pipeline phase");
        self.phase = phase;
    }

    /// Run every module's questions in order, publishing each fragment as soon
    /// as the module returns it.
    pub fn collect(&mut self, prompter: &mut dyn Prompter) -> Result<()> {
        self.expect_phase(Phase::Init)?;
        self.enter(Phase::Collecting);

        for module in &self.modules {
            prompter.section(module.name())?;
            let fragment = module.run(prompter, &self.store)?;
            tracing::debug!(slug = module.slug(), keys = fragment.len(), "collected");
            self.store.publish(module.slug(), fragment)?;
        }

        self.enter(Phase::Summarizing);
        Ok(())
    }

    /// Concatenated module summaries with a separator between blocks
    pub fn summary(&self) -> Result<Vec<SummaryLine>> {
        self.expect_phase(Phase::Summarizing)?;

        let mut lines = Vec::new();
        for (i, module) in self.modules.iter().enumerate() {
            if i > 0 {
                lines.push(SummaryLine::Separator {
                    next: module.name(),
                });
            }
            let fragment = self
                .store
                .fragment(module.slug())
                .ok_or_else(|| Error::MissingFragment(module.slug().to_string()))?;
            lines.extend(
                module
                    .summarize(fragment)
                    .into_iter()
                    .map(|entry| SummaryLine::Entry {
                        module: module.name(),
                        entry,
                    }),
            );
        }
        Ok(lines)
    }

    /// Show the summary and ask once whether to proceed
    pub fn confirm(&mut self, prompter: &mut dyn Prompter) -> Result<()> {
        let lines = self.summary()?;
        self.enter(Phase::AwaitingConfirmation);
        prompter.show_summary(SUMMARY_TITLE, &lines)?;

        let proceed = self.auto_confirm || prompter.confirm(CONFIRM_PROMPT, true)?;
        if !proceed {
            self.enter(Phase::Cancelled);
            return Err(Error::Cancelled);
        }
        Ok(())
    }

    /// Run every module's generator in order; the first failure stops the rest.
    pub fn execute(&mut self, ctx: &ExecContext<'_>) -> Result<()> {
        self.expect_phase(Phase::AwaitingConfirmation)?;
        self.enter(Phase::Executing);

        for module in &self.modules {
            tracing::info!(slug = module.slug(), "executing module");
            module.execute(&self.store, ctx)?;
        }

        self.enter(Phase::Done);
        Ok(())
    }

    /// Header fields followed by each module's exportable options, keyed by slug.
    /// Modules exporting nothing are left out.
    pub fn export_document(
        &self,
        metadata: &ExportMetadata,
        created: DateTime<FixedOffset>,
    ) -> Value {
        let mut document = Map::new();
        document.insert("generator".into(), Value::String(metadata.generator.clone()));
        document.insert("version".into(), Value::String(metadata.version.clone()));
        document.insert(
            "creation".into(),
            Value::String(created.to_rfc3339_opts(SecondsFormat::Secs, false)),
        );

        for module in &self.modules {
            let fragment = module.export(&self.store);
            if !fragment.is_empty() {
                document.insert(module.slug().to_string(), Value::Object(fragment));
            }
        }
        Value::Object(document)
    }

    /// Write the export document in every format of the plan
    pub fn export(&mut self, plan: &ExportPlan) -> Result<ExportReport> {
        self.expect_phase(Phase::AwaitingConfirmation)?;
        self.enter(Phase::Exporting);

        let document = self.export_document(&plan.metadata, Local::now().fixed_offset());
        let report = plan.exporter.export(&document, &plan.base_path);

        self.enter(Phase::Done);
        Ok(report)
    }

    /// Full run: collect, confirm, then the chosen terminal branch
    pub fn run(&mut self, prompter: &mut dyn Prompter, terminal: Terminal<'_>) -> Result<Outcome> {
        self.collect(prompter)?;
        self.confirm(prompter)?;

        match terminal {
            Terminal::Execute(ctx) => {
                self.execute(&ctx)?;
                Ok(Outcome::Executed)
            }
            Terminal::Export(plan) => self.export(&plan).map(Outcome::Exported),
        }
    }
}
