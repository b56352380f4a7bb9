use sqlx::{postgres::PgPoolOptions, PgPool};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::{DatabaseConfig, StoreBackend};
use crate::database::memory::MemoryStore;
use crate::database::postgres::PgStore;
use crate::database::store::BlogStore;

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Connection-level failures, as opposed to a failing statement
    pub fn is_unavailable(&self) -> bool {
        match self {
            DatabaseError::Unavailable(_) => true,
            DatabaseError::Sqlx(err) => matches!(
                err,
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
            ),
            _ => false,
        }
    }
}

/// Builds the store selected by configuration
pub struct DatabaseManager;

impl DatabaseManager {
    pub async fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn BlogStore>, DatabaseError> {
        match config.backend {
            StoreBackend::Postgres => {
                let pool = Self::connect(config).await?;
                Ok(Arc::new(PgStore::new(pool)))
            }
            StoreBackend::Memory => {
                let store = MemoryStore::new();
                for (id, name) in &config.seed_categories {
                    store.insert_category(*id, name.clone()).await;
                }
                for (id, username) in &config.seed_users {
                    store.insert_user_named(*id, username.clone()).await;
                }
                info!(
                    categories = config.seed_categories.len(),
                    users = config.seed_users.len(),
                    "Using in-memory store"
                );
                Ok(Arc::new(store))
            }
        }
    }

    /// Creates the PostgreSQL pool from `DATABASE_URL`
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!(max_connections = config.max_connections, "Created database pool");
        Ok(pool)
    }
}
