use clap::Parser;

use school_api::cli::{Cli, execute_command, load_and_merge_config};
use school_api::logger::init_logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_and_merge_config(&cli)?;
    init_logger(&settings.logger)?;

    tracing::debug!(command = ?cli.resolved_command(), "Executing command");
    execute_command(&cli, settings).await
}
