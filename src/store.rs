//! SQLite pool and table bootstrap for campers, activities and signups.

use crate::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

fn is_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Open a pool. The database file is created if missing and foreign keys are enforced on every connection.
/// An in-memory database lives only as long as its connection, so it gets exactly one that never expires.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, AppError> {
    let opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = if is_memory(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opts)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(opts)
            .await?
    };
    tracing::info!(database_url = %database_url, "connected to store");
    Ok(pool)
}

const TABLES_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS campers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        age INTEGER NOT NULL,
        CONSTRAINT ck_campers_name CHECK (length(name) > 0),
        CONSTRAINT ck_campers_age CHECK (age BETWEEN 8 AND 18)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS activities (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        difficulty INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS signups (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        time INTEGER NOT NULL,
        camper_id INTEGER NOT NULL,
        activity_id INTEGER NOT NULL,
        CONSTRAINT ck_signups_time CHECK (time BETWEEN 0 AND 23),
        CONSTRAINT fk_signups_camper_id_campers FOREIGN KEY (camper_id)
            REFERENCES campers (id) ON DELETE CASCADE,
        CONSTRAINT fk_signups_activity_id_activities FOREIGN KEY (activity_id)
            REFERENCES activities (id) ON DELETE CASCADE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS ix_signups_camper_id ON signups (camper_id)",
    "CREATE INDEX IF NOT EXISTS ix_signups_activity_id ON signups (activity_id)",
];

/// Create the three tables and their indexes if they do not exist. Schema changes are out of scope.
pub async fn ensure_tables(pool: &SqlitePool) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    for ddl in TABLES_DDL {
        sqlx::query(ddl).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    Ok(())
}
