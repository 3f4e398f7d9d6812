//! SQLite Database Module
//!
//! Provides structured storage for campaigns, members, currencies, player
//! keeps, check-in history, shops and creatures.

mod campaigns;
mod check_ins;
mod creatures;
mod currencies;
mod keeps;
mod members;
mod migrations;
pub mod models;
mod shops;

pub use campaigns::CampaignOps;
pub use check_ins::CheckInOps;
pub use creatures::CreatureOps;
pub use currencies::CurrencyOps;
pub use keeps::KeepOps;
pub use members::MemberOps;
pub use migrations::run_migrations;
pub use models::*;
pub use shops::ShopOps;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;

const DATABASE_FILE: &str = "campaign_keep.db";

/// Database connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
    path: PathBuf,
}

impl Database {
    /// Open (or create) the database inside `data_dir` and run migrations.
    pub async fn new(data_dir: &Path) -> Result<Self, sqlx::Error> {
        let db_path = data_dir.join(DATABASE_FILE);

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(sqlx::Error::Io)?;
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}?mode=rwc", db_path.display()))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(30));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .min_connections(1)
            .connect_with(options)
            .await?;

        let db = Self { pool, path: db_path };

        migrations::run_migrations(&db.pool).await?;

        tracing::info!(path = %db.path.display(), "Database ready");
        Ok(db)
    }

    /// Get the underlying pool for direct queries
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get database file path
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

/// True when the error is a UNIQUE constraint violation.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
