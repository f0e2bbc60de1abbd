//! Interactive `new` flow

use anyhow::Result;
use console::style;
use std::path::Path;

use super::CliclackPrompter;
use crate::config::{NewArgs, RunMode};
use crate::export::ExportReport;
use crate::module::ExecContext;
use crate::modules::{default_modules, project_info};
use crate::pipeline::{ExportMetadata, ExportPlan, Outcome, Pipeline, Terminal};
use crate::render::Renderer;

/// Run the generator with interactive prompts
pub fn run(args: NewArgs, cli_version: &str) -> Result<()> {
    let title = format!(" {} {} ", crate::GENERATOR, cli_version);
    cliclack::intro(style(title).on_cyan().black())?;

    // Step 1: decide the terminal branch so bad flags fail before any question
    let mode = args.mode()?;

    // Step 2: templates (embedded, optionally overridden)
    let template_dir = args.template_dir();
    if let Some(dir) = &template_dir {
        cliclack::log::info(format!("Using local templates from {}", dir.display()))?;
    }
    let renderer = Renderer::with_overrides(template_dir.as_deref())?;

    cliclack::log::remark("Press Enter to keep the suggested value.")?;

    let (terminal, project_root) = match mode {
        RunMode::Execute { root } => {
            cliclack::log::info(format!("Using directory: {}", root.display()))?;
            (Terminal::Execute(ExecContext::new(&renderer, &root)), Some(root))
        }
        RunMode::Export {
            exporter,
            base_path,
        } => {
            let plan = ExportPlan {
                exporter,
                base_path,
                metadata: ExportMetadata::new(cli_version),
            };
            (Terminal::Export(plan), None)
        }
    };

    // Step 3: collect, confirm, generate or export
    let mut pipeline = Pipeline::new(default_modules())?.auto_confirm(args.yes);
    let mut prompter = CliclackPrompter::new();

    let outcome = match pipeline.run(&mut prompter, terminal) {
        Ok(outcome) => outcome,
        Err(e) if e.is_cancelled() => {
            cliclack::outro_cancel(e.to_string())?;
            return Err(e.into());
        }
        Err(e) => {
            cliclack::log::error(e.to_string())?;
            return Err(e.into());
        }
    };

    match outcome {
        Outcome::Executed => {
            let slug = pipeline
                .store()
                .require_str(project_info::SLUG, "project_slug")?;
            let root = project_root.unwrap_or_default();
            print_next_steps(&root.join(slug))
        }
        Outcome::Exported(report) => print_export_report(&report),
    }
}

fn print_export_report(report: &ExportReport) -> Result<()> {
    for path in &report.written {
        cliclack::log::success(format!("Configuration written to {}", path.display()))?;
    }
    for failure in &report.failed {
        cliclack::log::error(format!(
            "Could not write {}: {}",
            failure.path.display(),
            failure.reason
        ))?;
    }

    if !report.is_success() {
        cliclack::outro_cancel("Configuration export incomplete")?;
        anyhow::bail!(
            "{} of {} export(s) failed",
            report.failed.len(),
            report.failed.len() + report.written.len()
        );
    }

    cliclack::outro("Configuration exported")?;
    Ok(())
}

fn print_next_steps(project_dir: &Path) -> Result<()> {
    let steps = [
        format!("cd {}", project_dir.display()),
        "docker compose up -d".to_string(),
    ];
    let body: Vec<String> = steps
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}.  {}", i + 1, step))
        .collect();

    cliclack::note("Next steps", body.join("\n"))?;
    cliclack::outro("Happy coding!")?;

    Ok(())
}
