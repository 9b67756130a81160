//! Database module
//!
//! Database connection and schema utilities.

use sqlx::{Executor, PgPool};

/// Schema applied by `apply_schema`; also shipped under migrations/
pub const SCHEMA: &str = include_str!("../migrations/0001_collecte_schema.sql");

/// Tables the server reads and writes
pub const REQUIRED_TABLES: &[&str] = &[
    "collection_point",
    "container",
    "planning",
    "route",
    "waypoint",
];

/// Lock key serializing concurrent schema applications
const SCHEMA_LOCK_KEY: i64 = 0x636f_6c6c_6563_7465;

/// Verify database connectivity
pub async fn verify_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;

    Ok(())
}

/// Create missing tables and indexes (idempotent)
pub async fn apply_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut conn = pool.acquire().await?;

    sqlx::query("SELECT pg_advisory_lock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *conn)
        .await?;

    let applied = (&mut *conn).execute(SCHEMA).await;

    sqlx::query("SELECT pg_advisory_unlock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *conn)
        .await?;

    applied?;
    tracing::info!("Database schema applied");
    Ok(())
}

/// Check if required tables exist
pub async fn check_schema(pool: &PgPool) -> Result<bool, sqlx::Error> {
    for &table in REQUIRED_TABLES {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM information_schema.tables
                WHERE table_schema = current_schema() AND table_name = $1
            )
            "#,
        )
        .bind(table)
        .fetch_one(pool)
        .await?;

        if !exists {
            tracing::error!("Required table '{}' does not exist", table);
            return Ok(false);
        }
    }

    Ok(true)
}
