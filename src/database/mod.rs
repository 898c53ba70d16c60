pub mod schema;

use anyhow::{Context, Result};
use sqlx::{pool::PoolOptions, MySql, Pool};
use std::time::Duration;
use tracing::{info, warn};

use crate::config::Config;

const MAX_RETRIES: u32 = 10;
const INITIAL_RETRY_DELAY_SECS: u64 = 2;
const MAX_RETRY_DELAY_SECS: u64 = 30;

/// Connects to MySQL with retries so the service survives a database that
/// comes up after it does.
pub async fn create_pool(config: &Config) -> Result<Pool<MySql>> {
    let database_url = config.mysql_url();
    info!("Connecting to {}", config.mysql_masked_url());

    let mut last_error = None;

    for attempt in 1..=MAX_RETRIES {
        let pool_options = PoolOptions::<MySql>::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800));

        match pool_options.connect(&database_url).await {
            Ok(pool) => match sqlx::query("SELECT 1").fetch_one(&pool).await {
                Ok(_) => {
                    info!("Database connection established on attempt {}", attempt);
                    return Ok(pool);
                }
                Err(e) => {
                    warn!("Connection test query failed on attempt {}: {}", attempt, e);
                    last_error = Some(anyhow::anyhow!("{}", e));
                }
            },
            Err(e) => {
                warn!("Connection attempt {} of {} failed: {}", attempt, MAX_RETRIES, e);
                last_error = Some(anyhow::anyhow!("{}", e));
            }
        }

        if attempt < MAX_RETRIES {
            // 2s, 4s, 8s, 16s, 30s (capped), ...
            let delay_secs = std::cmp::min(
                INITIAL_RETRY_DELAY_SECS * (1u64 << (attempt - 1)),
                MAX_RETRY_DELAY_SECS,
            );
            info!("Waiting {}s before next connection attempt", delay_secs);
            tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        }
    }

    Err(last_error.unwrap_or_else(|| anyhow::anyhow!("no connection attempts were made")))
        .context(format!("Failed to connect to MySQL after {} attempts", MAX_RETRIES))
}
