//! Database Migrations
//!
//! Handles schema creation and versioned migrations.

use sqlx::sqlite::SqlitePool;
use sqlx::Row;
use tracing::{info, warn};

/// Current database schema version
const SCHEMA_VERSION: i32 = 4;

/// Run all pending migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS _migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )
        "#
    )
    .execute(pool)
    .await?;

    let current_version = get_current_version(pool).await?;

    info!(current_version, target_version = SCHEMA_VERSION, "Checking database migrations");

    if current_version < SCHEMA_VERSION {
        info!("Running database migrations from v{} to v{}", current_version, SCHEMA_VERSION);

        for version in (current_version + 1)..=SCHEMA_VERSION {
            run_migration(pool, version).await?;
        }

        info!("Database migrations completed successfully");
    }

    Ok(())
}

/// Get the current schema version
async fn get_current_version(pool: &SqlitePool) -> Result<i32, sqlx::Error> {
    let result = sqlx::query("SELECT MAX(version) as version FROM _migrations")
        .fetch_optional(pool)
        .await?;

    Ok(result
        .and_then(|row| row.try_get::<i32, _>("version").ok())
        .unwrap_or(0))
}

/// Run a specific migration version inside its own transaction
async fn run_migration(pool: &SqlitePool, version: i32) -> Result<(), sqlx::Error> {
    let (name, sql) = match version {
        1 => ("campaigns_and_members", MIGRATION_V1),
        2 => ("currencies", MIGRATION_V2),
        3 => ("player_keeps", MIGRATION_V3),
        4 => ("shops_and_creatures", MIGRATION_V4),
        _ => {
            warn!("Unknown migration version: {}", version);
            return Ok(());
        }
    };

    info!("Applying migration v{}: {}", version, name);

    let mut tx = pool.begin().await?;

    for statement in sql.split(';').filter(|s| !s.trim().is_empty()) {
        sqlx::query(statement.trim()).execute(&mut *tx).await?;
    }

    sqlx::query("INSERT INTO _migrations (version, name) VALUES (?, ?)")
        .bind(version)
        .bind(name)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

/// Migration v1: campaigns and their members
const MIGRATION_V1: &str = r#"
CREATE TABLE IF NOT EXISTS campaigns (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    system TEXT NOT NULL,
    description TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS campaign_members (
    campaign_id TEXT NOT NULL REFERENCES campaigns(id),
    user_id TEXT NOT NULL,
    display_name TEXT NOT NULL,
    role TEXT NOT NULL CHECK (role IN ('dm', 'player')),
    joined_at TEXT NOT NULL,
    PRIMARY KEY (campaign_id, user_id)
);

CREATE INDEX IF NOT EXISTS idx_campaign_members_user ON campaign_members(user_id)
"#;

/// Migration v2: campaign-scoped currencies
const MIGRATION_V2: &str = r#"
CREATE TABLE IF NOT EXISTS currencies (
    id TEXT PRIMARY KEY,
    campaign_id TEXT NOT NULL REFERENCES campaigns(id),
    name TEXT NOT NULL,
    abbreviation TEXT NOT NULL,
    description TEXT,
    created_at TEXT NOT NULL,
    UNIQUE (campaign_id, abbreviation)
)
"#;

/// Migration v3: player keeps, facilities, hirelings and check-in history
const MIGRATION_V3: &str = r#"
CREATE TABLE IF NOT EXISTS player_keeps (
    id TEXT PRIMARY KEY,
    campaign_id TEXT NOT NULL UNIQUE REFERENCES campaigns(id),
    icon_url TEXT,
    description TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS keep_facilities (
    id TEXT PRIMARY KEY,
    keep_id TEXT NOT NULL REFERENCES player_keeps(id),
    name TEXT NOT NULL,
    upkeep_amount REAL NOT NULL DEFAULT 0,
    upkeep_currency TEXT NOT NULL,
    profit_amount REAL NOT NULL DEFAULT 0,
    profit_currency TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS keep_hirelings (
    id TEXT PRIMARY KEY,
    keep_id TEXT NOT NULL REFERENCES player_keeps(id),
    name TEXT NOT NULL,
    salary_amount REAL NOT NULL DEFAULT 0,
    salary_currency TEXT NOT NULL,
    profit_amount REAL NOT NULL DEFAULT 0,
    profit_currency TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS keep_check_ins (
    id TEXT PRIMARY KEY,
    keep_id TEXT NOT NULL REFERENCES player_keeps(id),
    weeks_away INTEGER NOT NULL CHECK (weeks_away > 0),
    breakdown_json TEXT NOT NULL,
    net_profit_json TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_facilities_keep ON keep_facilities(keep_id);
CREATE INDEX IF NOT EXISTS idx_hirelings_keep ON keep_hirelings(keep_id);
CREATE INDEX IF NOT EXISTS idx_check_ins_keep_created ON keep_check_ins(keep_id, created_at DESC)
"#;

/// Migration v4: shops, shop stock and creatures
const MIGRATION_V4: &str = r#"
CREATE TABLE IF NOT EXISTS shops (
    id TEXT PRIMARY KEY,
    campaign_id TEXT NOT NULL REFERENCES campaigns(id),
    name TEXT NOT NULL,
    keeper TEXT,
    description TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS shop_items (
    id TEXT PRIMARY KEY,
    shop_id TEXT NOT NULL REFERENCES shops(id),
    name TEXT NOT NULL,
    price REAL NOT NULL,
    currency TEXT NOT NULL,
    quantity INTEGER
);

CREATE TABLE IF NOT EXISTS creatures (
    id TEXT PRIMARY KEY,
    campaign_id TEXT NOT NULL REFERENCES campaigns(id),
    name TEXT NOT NULL,
    kind TEXT,
    challenge_rating TEXT,
    armor_class INTEGER,
    hit_points INTEGER,
    description TEXT,
    visible_to_players INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_shops_campaign ON shops(campaign_id);
CREATE INDEX IF NOT EXISTS idx_shop_items_shop ON shop_items(shop_id);
CREATE INDEX IF NOT EXISTS idx_creatures_campaign ON creatures(campaign_id)
"#;
