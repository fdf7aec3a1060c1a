use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS profiles (
        user_id     UUID PRIMARY KEY,
        name        TEXT,
        email       TEXT,
        experience  JSONB NOT NULL DEFAULT '[]',
        education   JSONB NOT NULL DEFAULT '[]',
        skills      TEXT[] NOT NULL DEFAULT '{}',
        imported_at TIMESTAMPTZ NOT NULL,
        updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS import_audit (
        id             UUID PRIMARY KEY,
        user_id        UUID NOT NULL,
        overall_status TEXT NOT NULL,
        diagnostics    JSONB NOT NULL DEFAULT '[]',
        page_count     INTEGER NOT NULL,
        config_version TEXT NOT NULL,
        message        TEXT,
        created_at     TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS import_audit_user_created_idx ON import_audit (user_id, created_at)",
];

/// Creates the profile and audit tables if they do not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("Database schema ready");
    Ok(())
}
