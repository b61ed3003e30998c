use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use tracing::info;

const SCHEMA: &str = include_str!("../migrations/0001_cv_templates.sql");

/// Creates a PostgreSQL connection pool and makes sure the schema exists.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .context("failed to connect to PostgreSQL")?;

    pool.execute(SCHEMA)
        .await
        .context("failed to apply the cv_templates schema")?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}
