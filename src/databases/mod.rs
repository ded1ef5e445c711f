use anyhow::{bail, Context, Result};
use log::{info, warn};
use sqlx::{Executor, PgPool};

use crate::config::{DbEngine, Settings};

pub mod chats;

const SCHEMA_SQL: &str = include_str!("../../databases/chats/schema.sql");
const REQUIRED_TABLES: [&str; 2] = ["chat", "message"];

/// Connect to the configured database, retrying per the settings. Handlers
/// never retry; this loop only covers the startup race against the store.
pub async fn connect(settings: &Settings) -> Result<PgPool> {
    if settings.db_engine != DbEngine::Postgres {
        bail!(
            "this build supports only the postgres engine (DB_ENGINE={:?})",
            settings.db_engine
        );
    }

    let url = settings.database_url();
    let attempts = settings.db_retry_max_attempts.max(1);

    let mut attempt = 0;
    loop {
        attempt += 1;
        match PgPool::connect(&url).await {
            Ok(pool) => {
                info!(
                    "connected to {}:{}/{}",
                    settings.db_host, settings.db_port, settings.db_name
                );
                return Ok(pool);
            }
            Err(e) if attempt < attempts => {
                warn!(
                    "database connection attempt {}/{} failed: {}",
                    attempt, attempts, e
                );
                tokio::time::sleep(settings.db_retry_delay).await;
            }
            Err(e) => return Err(e).context("failed to connect to database"),
        }
    }
}

async fn tables_exist(pool: &PgPool, tables: &[&str]) -> Result<bool> {
    for &table in tables {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                SELECT 1 FROM information_schema.tables
                WHERE table_schema = 'public' AND table_name = $1
            )",
        )
        .bind(table)
        .fetch_one(pool)
        .await?;

        if !exists.0 {
            info!("table '{}' does not exist yet", table);
            return Ok(false);
        }
    }
    Ok(true)
}

async fn ensure_tables(pool: &PgPool) -> Result<()> {
    if tables_exist(pool, &REQUIRED_TABLES).await? {
        info!("all required tables exist");
        return Ok(());
    }

    pool.execute(SCHEMA_SQL)
        .await
        .context("failed to execute schema SQL")?;
    info!("schema SQL executed, tables created");
    Ok(())
}

/// Create the schema if missing. Failures are logged and swallowed so the
/// server still starts; requests will surface 500s until the store is usable.
pub async fn init_schema(pool: &PgPool) {
    if let Err(e) = ensure_tables(pool).await {
        warn!("schema initialization failed: {:#}", e);
    }
}
