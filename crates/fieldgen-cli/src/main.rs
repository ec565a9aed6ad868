//! # fieldgen
//!
//! Inspect and migrate the generated fields of deployment configs.
//!
//! This is the main entry point for the fieldgen CLI tool. It handles command parsing,
//! sets up logging and error handling, and dispatches to the appropriate command handlers.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use fieldgen_core::error::{FieldGenError, FieldGenResult};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::CommandContext;
use output::errors::ErrorFormatter;

/// Inspect and migrate generated fields in deployment configs
#[derive(Parser)]
#[command(name = "fieldgen", version, about = "Generated fields tooling for deployment configs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true, env = "FIELDGEN_VERBOSE")]
    pub verbose: bool,

    /// Answer yes to confirmation prompts
    #[arg(short, long, global = true, env = "FIELDGEN_ASSUME_YES")]
    pub yes: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Move embedded generated_fields blocks to the top level
    Migrate {
        /// Config file to migrate in place
        path: Utf8PathBuf,
    },
    /// Show the deployment status of every project
    Status {
        /// Config file to inspect
        path: Utf8PathBuf,
    },
    /// Print generated fields
    Show {
        /// Config file to inspect
        path: Utf8PathBuf,
        /// Project whose fields to print
        #[arg(long, conflicts_with = "forseti")]
        project: Option<String>,
        /// Print the forseti service fields
        #[arg(long)]
        forseti: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    setup_panic_handler();

    info!("Starting fieldgen v{}", env!("CARGO_PKG_VERSION"));

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprint!("{}", ErrorFormatter::new().format_error(&e));
            ExitCode::FAILURE
        },
    }
}

fn run_cli(cli: Cli) -> FieldGenResult<()> {
    // Create Tokio runtime for async file operations
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| FieldGenError::io("Failed to create async runtime".to_string(), e))?;

    rt.block_on(async {
        let ctx = CommandContext::new(cli.yes);
        commands::dispatch_command(cli.command, &ctx).await
    })
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "fieldgen={},fieldgen_config={},fieldgen_core={}",
            level, level, level
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("fieldgen encountered an unexpected error: {}", panic_info);
        eprintln!("fieldgen crashed! This is a bug.");
        eprintln!("Error: {}", panic_info);
    }));
}
