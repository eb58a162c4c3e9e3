//! Command executor for dispatching CLI commands

use super::handlers::{MigrateAction, MigrateCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::Settings;

/// Runs the command selected by `cli` with the merged `settings`.
///
/// Without a subcommand the server starts, as with `serve`.
pub async fn execute_command(cli: &Cli, settings: Settings) -> anyhow::Result<()> {
    match cli.resolved_command() {
        Commands::Serve { dry_run, .. } => {
            if settings.server.port < 1024 {
                tracing::warn!(
                    port = settings.server.port,
                    "Binding to a privileged port usually requires root"
                );
            }
            ServeCommandHandler::new(settings).execute(dry_run).await
        }
        Commands::Migrate { dry_run, rollback } => {
            MigrateCommandHandler::new(settings)
                .execute(MigrateAction::from_args(dry_run, rollback))
                .await
        }
    }
}
