pub mod memory;
pub mod postgres;
pub mod store;

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::config::Config;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::{RecordStore, StoreError};

/// PostgreSQL when `DATABASE_URL` is set (migrations applied), otherwise in-memory.
pub async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn RecordStore>> {
    match &config.database_url {
        Some(url) => {
            let pool = create_pool(url, config.db_max_connections).await?;
            run_migrations(&pool).await?;
            info!("Database connected and migrations applied");
            Ok(Arc::new(PgStore::new(pool)))
        }
        None => {
            warn!("DATABASE_URL not set, using in-memory store (data is lost on restart)");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Run the migrations embedded from ./migrations/
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
