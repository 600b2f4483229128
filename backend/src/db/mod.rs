//! PostgreSQL pool, migrations and probes

use crate::config::DatabaseConfig;
use anyhow::Result;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing::{info, warn};

const MIN_IDLE_CONNECTIONS: u32 = 1;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);
const IDLE_TIMEOUT: Duration = Duration::from_secs(300);

/// Open the pool described by `[database]`
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let options = PgConnectOptions::from_str(&config.url)?.application_name("nutrition-tracker");

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(MIN_IDLE_CONNECTIONS.min(config.max_connections))
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .idle_timeout(IDLE_TIMEOUT)
        .connect_with(options)
        .await?;

    info!(max_connections = config.max_connections, "Database pool ready");
    Ok(pool)
}

/// Apply the embedded schema migrations
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Schema is up to date");
    Ok(())
}

/// Round-trip time of a trivial query
pub async fn ping(pool: &PgPool) -> Result<Duration> {
    let started = Instant::now();
    if let Err(e) = sqlx::query("SELECT 1").execute(pool).await {
        warn!(error = %e, "Database ping failed");
        return Err(e.into());
    }
    Ok(started.elapsed())
}

/// Version of the newest applied migration, if any
pub async fn schema_version(pool: &PgPool) -> Result<Option<i64>> {
    let version: Option<i64> = sqlx::query_scalar(
        "SELECT MAX(version) FROM _sqlx_migrations WHERE success",
    )
    .fetch_one(pool)
    .await?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_malformed_url_fails_fast() {
        let config = DatabaseConfig {
            url: "not-a-database-url".to_string(),
            max_connections: 2,
        };
        assert!(create_pool(&config).await.is_err());
    }
}
