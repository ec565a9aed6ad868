//! Command implementations and dispatch logic.
//!
//! This module contains all command handlers and the central dispatch system.
//! Each command is implemented as an async function that takes a CommandContext.

use fieldgen_config::migrate::Confirm;
use fieldgen_config::FixedAnswer;
use fieldgen_core::error::FieldGenResult;
use tracing::info;

pub mod migrate;
pub mod show;
pub mod status;


use crate::output::{prompt::StdinConfirm, OutputHandler};
use crate::Commands;

/// Shared context for all commands
pub struct CommandContext {
    pub output: OutputHandler,
    pub confirm: Box<dyn Confirm>,
}

impl CommandContext {
    /// Create a new command context
    ///
    /// With `assume_yes` every confirmation is answered without reading stdin.
    pub fn new(assume_yes: bool) -> Self {
        let confirm: Box<dyn Confirm> = if assume_yes {
            Box::new(FixedAnswer(true))
        } else {
            Box::new(StdinConfirm)
        };

        Self {
            output: OutputHandler::new(),
            confirm,
        }
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> FieldGenResult<()> {
    match command {
        Commands::Migrate { path } => {
            info!("Migrating generated fields in {}", path);
            migrate::execute(&path, ctx).await
        },
        Commands::Status { path } => {
            info!("Showing deployment status of {}", path);
            status::execute(&path, ctx).await
        },
        Commands::Show {
            path,
            project,
            forseti,
        } => {
            let target = show::ShowTarget::from_flags(project, forseti);
            info!("Showing {} of {}", target, path);
            show::execute(&path, target, ctx).await
        },
    }
}
