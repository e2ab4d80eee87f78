//! Connection pool construction.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::WatchConfig;
use crate::error::Result;

/// Connect a pool using the configured database URL.
pub async fn connect_pool(config: &WatchConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;
    Ok(pool)
}

/// Cheap liveness probe for operational tooling.
pub async fn health_check(pool: &PgPool) -> Result<bool> {
    let one: i32 = sqlx::query_scalar("SELECT 1").fetch_one(pool).await?;
    Ok(one == 1)
}
