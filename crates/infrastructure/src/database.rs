//! Database module - PostgreSQL connection pool and utilities
//!
//! Provides connection pool management, migrations, health checks and
//! transaction support.

use sqlx::{postgres::PgPoolOptions, PgPool, Postgres, Transaction};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};
use travel_health_common::DatabaseConfig;

use crate::Result;

/// Database connection pool wrapper with health monitoring.
#[derive(Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Connect a new pool with the given configuration.
    #[instrument(skip(config), fields(max_connections = config.max_connections))]
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        info!("Initializing database connection pool");

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    sqlx::query("SET timezone = 'UTC'")
                        .execute(&mut *conn)
                        .await?;
                    sqlx::query("SET statement_timeout = '30s'")
                        .execute(&mut *conn)
                        .await?;
                    Ok(())
                })
            })
            .connect(&config.url)
            .await?;

        info!("Database pool initialized successfully");
        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get reference to the underlying pool.
    #[inline]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply pending migrations from `migrations/`.
    #[instrument(skip(self))]
    pub async fn migrate(&self) -> Result<()> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations complete");
        Ok(())
    }

    /// Begin a new database transaction.
    #[instrument(skip(self))]
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>> {
        debug!("Beginning new transaction");
        Ok(self.pool.begin().await?)
    }

    /// Check database health by executing a simple query.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> HealthStatus {
        let start = Instant::now();

        let error = match sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
        {
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "Health check failed");
                Some(e.to_string())
            }
        };

        let status = HealthStatus {
            healthy: error.is_none(),
            latency: start.elapsed(),
            pool_size: self.pool.size(),
            idle_connections: self.pool.num_idle(),
            error,
        };
        debug!(latency_ms = status.latency.as_millis(), healthy = status.healthy, "Health check");
        status
    }

    /// Close all connections in the pool.
    pub async fn close(&self) {
        info!("Closing database pool");
        self.pool.close().await;
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool")
            .field("size", &self.pool.size())
            .field("idle", &self.pool.num_idle())
            .finish()
    }
}

/// Health status for database connections.
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub healthy: bool,
    pub latency: Duration,
    pub pool_size: u32,
    pub idle_connections: usize,
    /// Error message if unhealthy
    pub error: Option<String>,
}

/// Extension trait for transaction handling with automatic commit/rollback.
#[async_trait::async_trait]
pub trait TransactionExt {
    /// Commit if result is Ok, rollback if Err.
    async fn commit_or_rollback<T, E>(self, result: std::result::Result<T, E>) -> std::result::Result<T, E>
    where
        T: Send,
        E: From<sqlx::Error> + Send;
}

#[async_trait::async_trait]
impl TransactionExt for Transaction<'_, Postgres> {
    async fn commit_or_rollback<T, E>(self, result: std::result::Result<T, E>) -> std::result::Result<T, E>
    where
        T: Send,
        E: From<sqlx::Error> + Send,
    {
        match result {
            Ok(value) => {
                self.commit().await?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_err) = self.rollback().await {
                    warn!("Failed to rollback transaction: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

impl From<DatabasePool> for PgPool {
    fn from(pool: DatabasePool) -> Self {
        pool.pool
    }
}
