//! Migrate command handler
//!
//! Applies, lists or reverts the embedded migrations against
//! `database.url`.

use anyhow::bail;

use crate::config::{Settings, StoreBackend};
use crate::db;

/// What `migrate` was asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Apply,
    DryRun,
    Rollback(u32),
}

impl MigrateAction {
    pub fn from_args(dry_run: bool, rollback: Option<u32>) -> Self {
        match (dry_run, rollback) {
            (true, _) => MigrateAction::DryRun,
            (false, Some(steps)) => MigrateAction::Rollback(steps),
            (false, None) => MigrateAction::Apply,
        }
    }
}

pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    pub async fn execute(&self, action: MigrateAction) -> anyhow::Result<()> {
        let database = &self.config.database;
        if database.backend != StoreBackend::Postgres {
            bail!(
                "The migrate command needs the postgres backend, but database.backend is '{}'",
                database.backend
            );
        }
        database.validate()?;
        let url = database.url.as_str();

        match action {
            MigrateAction::DryRun => {
                println!("Checking for pending migrations...");
                let pending = db::pending_migrations(url).await?;
                if pending.is_empty() {
                    println!("✓ No pending migrations - database is up to date");
                } else {
                    println!("Found {} pending migration(s):", pending.len());
                    print_list(&pending);
                    println!("Run without --dry-run to apply them");
                }
            }
            MigrateAction::Apply => {
                println!("Running database migrations...");
                let applied = db::run_pending_migrations(url).await?;
                if applied.is_empty() {
                    println!("✓ No migrations to apply - database is up to date");
                } else {
                    println!("✓ Applied {} migration(s):", applied.len());
                    print_list(&applied);
                }
            }
            MigrateAction::Rollback(steps) => {
                println!("Rolling back {} migration(s)...", steps);
                let reverted = db::revert_migrations(url, steps).await?;
                println!("✓ Reverted {} migration(s):", reverted.len());
                print_list(&reverted);
            }
        }

        Ok(())
    }
}

fn print_list(names: &[String]) {
    for name in names {
        println!("  - {name}");
    }
}
