//! wppg - interactive generator for Docker-based WordPress projects

mod logging;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use wppg_core::config::{DEFAULT_EXPORT_FORMATS, DEFAULT_EXPORT_PATH};
use wppg_core::NewArgs;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "wppg")]
#[command(about = "Interactive generator for Docker-based WordPress projects")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new WordPress project
    New(CliNewArgs),
}

#[derive(Parser, Debug)]
pub struct CliNewArgs {
    /// Export the answers as configuration files at this base path instead of
    /// generating the project (default base path: "wppg")
    #[arg(
        long = "cex",
        value_name = "PATH",
        num_args = 0..=1,
        default_missing_value = DEFAULT_EXPORT_PATH
    )]
    pub export: Option<PathBuf>,

    /// Export formats, comma-separated (yaml, yml, json, xml)
    #[arg(long = "cexf", value_name = "FORMATS", default_value = DEFAULT_EXPORT_FORMATS)]
    pub export_formats: String,

    /// Directory the project folder is created in
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Local directory with template overrides (<name>.j2)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Auto-confirm the summary (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliNewArgs> for NewArgs {
    fn from(args: CliNewArgs) -> Self {
        NewArgs {
            export: args.export,
            export_formats: args.export_formats,
            directory: args.directory,
            template_dir: args.template_dir,
            yes: args.yes,
        }
    }
}

fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    logging::init();

    let args = Args::parse();

    // No subcommand provided, default to `new` (interactive mode)
    let new_args = match args.command {
        Some(Command::New(new_args)) => new_args.into(),
        None => NewArgs::default(),
    };

    tracing::debug!(args = ?new_args, version = CLI_VERSION, "starting");
    let result = wppg_core::run(new_args, CLI_VERSION);

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // cancellation was already reported by the prompt outro
            let cancelled = e
                .downcast_ref::<wppg_core::Error>()
                .is_some_and(wppg_core::Error::is_cancelled);
            tracing::debug!(error = ?e, cancelled, "run failed");
            if !cancelled {
                eprintln!("{} {:#}", "error:".red().bold(), e);
            }
            ExitCode::FAILURE
        }
    }
}
