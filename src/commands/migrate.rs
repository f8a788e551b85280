//! Migrate command - Manages the users table schema.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    // Manual control: do not auto-apply on connect
    let db = Database::connect_without_migrations(&config.database_url)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    let outcome = match args.action {
        MigrateAction::Up => db.run_migrations().await.map(|_| "Migrations applied"),
        MigrateAction::Down => db.rollback_migration().await.map(|_| "Rolled back last migration"),
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all tables and re-running migrations");
            db.fresh_migrations()
                .await
                .map(|_| "Database reset and migrations applied")
        }
        MigrateAction::Status => {
            let status = db
                .migration_status()
                .await
                .map_err(|e| AppError::internal(e.to_string()))?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
            return Ok(());
        }
    };

    let message = outcome.map_err(|e| AppError::internal(e.to_string()))?;
    tracing::info!("{}", message);

    Ok(())
}
