//! PostgreSQL client and transaction scope
//!
//! Pool construction, schema migration, and the concrete [`TxScope`]
//! implementation. Transactions are driven explicitly (`BEGIN` / `COMMIT` /
//! `ROLLBACK`) so a scope can be threaded by reference through nested
//! service calls; the pooled connection goes back to the pool when the
//! scope drops, and the pool recycles with `RecyclingMethod::Clean` so an
//! unresolved transaction can never leak into the next checkout.

use crate::adapters::database::traits::{TransactionProvider, TxScope};
use crate::config::schema::DatabaseConfig;
use crate::domain::{MedrecError, Result};
use async_trait::async_trait;
use deadpool_postgres::{Manager, ManagerConfig, Object, Pool, RecyclingMethod};
use std::any::Any;
use std::time::Duration;
use tokio_postgres::NoTls;

/// PostgreSQL client for Medrec
///
/// Owns the connection pool and hands out transaction scopes.
pub struct PostgresClient {
    pool: Pool,
    config: DatabaseConfig,
}

impl PostgresClient {
    /// Create a new PostgreSQL client
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string is invalid or the pool
    /// cannot be built.
    pub async fn new(config: DatabaseConfig) -> Result<Self> {
        let pg_config: tokio_postgres::Config = config.connection_string.parse().map_err(|e| {
            MedrecError::Configuration(format!("Invalid PostgreSQL connection string: {}", e))
        })?;

        // Clean recycling resets any transaction a dropped scope left open.
        let manager = Manager::from_config(
            pg_config,
            NoTls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Clean,
            },
        );

        let pool = Pool::builder(manager)
            .max_size(config.max_connections)
            .wait_timeout(Some(Duration::from_secs(config.connection_timeout_seconds)))
            .create_timeout(Some(Duration::from_secs(config.connection_timeout_seconds)))
            .recycle_timeout(Some(Duration::from_secs(config.connection_timeout_seconds)))
            .build()
            .map_err(|e| {
                MedrecError::Database(format!("Failed to create connection pool: {}", e))
            })?;

        Ok(Self { pool, config })
    }

    /// Test the connection to PostgreSQL
    ///
    /// Attempts to get a connection from the pool and execute a simple query.
    pub async fn test_connection(&self) -> Result<()> {
        let client = self.acquire().await?;

        client
            .query_one("SELECT 1", &[])
            .await
            .map_err(|e| MedrecError::Database(format!("Connection test failed: {}", e)))?;

        tracing::info!("PostgreSQL connection test successful");
        Ok(())
    }

    /// Ensure the database schema exists
    ///
    /// Runs the migration SQL to create tables and indexes if they don't
    /// exist. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    pub async fn ensure_schema(&self) -> Result<()> {
        let client = self.acquire().await?;

        let migration_sql = include_str!("../../../migrations/001_initial_schema.sql");

        client
            .batch_execute(migration_sql)
            .await
            .map_err(|e| MedrecError::Database(format!("Failed to execute migration: {}", e)))?;

        tracing::info!("PostgreSQL schema initialized successfully");
        Ok(())
    }

    /// Get the connection string (without password)
    pub fn connection_string_safe(&self) -> String {
        self.config
            .connection_string
            .split('@')
            .next_back()
            .map(|s| format!("postgresql://***@{}", s))
            .unwrap_or_else(|| "postgresql://***".to_string())
    }

    async fn acquire(&self) -> Result<Object> {
        self.pool.get().await.map_err(|e| {
            MedrecError::Database(format!("Failed to get connection from pool: {}", e))
        })
    }
}

#[async_trait]
impl TransactionProvider for PostgresClient {
    async fn begin(&self) -> Result<Box<dyn TxScope>> {
        let conn = self.acquire().await?;

        conn.batch_execute("BEGIN")
            .await
            .map_err(|e| MedrecError::Database(format!("Failed to begin transaction: {}", e)))?;

        // SET LOCAL scopes the timeout to this transaction only.
        let timeout_stmt = format!(
            "SET LOCAL statement_timeout = {}",
            self.config.statement_timeout_seconds * 1000
        );
        conn.batch_execute(&timeout_stmt)
            .await
            .map_err(|e| MedrecError::Database(format!("Failed to set statement timeout: {}", e)))?;

        Ok(Box::new(PgTx { conn }))
    }
}

/// One open PostgreSQL transaction on one pooled connection.
pub struct PgTx {
    conn: Object,
}

impl PgTx {
    /// The underlying connection, for repository SQL execution.
    pub(crate) fn client(&self) -> &tokio_postgres::Client {
        &self.conn
    }
}

#[async_trait]
impl TxScope for PgTx {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    async fn commit(&mut self) -> Result<()> {
        self.conn
            .batch_execute("COMMIT")
            .await
            .map_err(|e| MedrecError::Database(format!("Commit failed: {}", e)))
    }

    async fn rollback(&mut self) {
        if let Err(e) = self.conn.batch_execute("ROLLBACK").await {
            tracing::warn!(error = %e, "Rollback failed; connection will be recycled dirty");
        }
    }
}
