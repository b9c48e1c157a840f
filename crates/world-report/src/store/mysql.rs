//! MySQL store implementation.
//!
//! Uses SQLx for connection pooling and async query execution. Connection
//! establishment retries with bounded exponential backoff and surfaces
//! exhaustion as `ConnectionUnavailable`; individual query failures
//! surface as `Query` with the SQLx cause.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::{Row, ValueRef};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{ReportError, Result};
use crate::mapper::{ColumnKind, ColumnSpec};
use crate::query::QueryDescriptor;
use crate::value::SqlValue;

use super::ReportStore;

/// Connection pool acquire timeout.
const POOL_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// MySQL-backed report store.
pub struct MysqlStore {
    pool: MySqlPool,
}

impl MysqlStore {
    /// Connect to the configured database with bounded exponential backoff.
    ///
    /// The delay doubles after each failed attempt, capped at
    /// `connect.max_delay_ms`. Exhausting `connect.max_attempts` yields
    /// `ConnectionUnavailable` with the last underlying cause.
    pub async fn connect(config: &Config) -> Result<Self> {
        let db = &config.database;
        let options = MySqlConnectOptions::new()
            .host(&db.host)
            .port(db.port)
            .database(&db.database)
            .username(&db.user)
            .password(&db.password);

        let retry = &config.connect;
        let max_delay = Duration::from_millis(retry.max_delay_ms);
        let mut delay = Duration::from_millis(retry.base_delay_ms);
        let mut last_error = String::from("no attempt made");

        for attempt in 1..=retry.max_attempts {
            info!(
                "Connecting to database (attempt {}/{})",
                attempt, retry.max_attempts
            );
            match Self::try_connect(&options).await {
                Ok(pool) => {
                    info!(
                        "Connected to MySQL: {}:{}/{}",
                        db.host, db.port, db.database
                    );
                    return Ok(Self { pool });
                }
                Err(e) => {
                    warn!("Connection attempt {} failed: {}", attempt, e);
                    last_error = e.to_string();
                    if attempt < retry.max_attempts {
                        tokio::time::sleep(delay).await;
                        delay = (delay * 2).min(max_delay);
                    }
                }
            }
        }

        Err(ReportError::unavailable(retry.max_attempts, last_error))
    }

    async fn try_connect(
        options: &MySqlConnectOptions,
    ) -> std::result::Result<MySqlPool, sqlx::Error> {
        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(POOL_ACQUIRE_TIMEOUT)
            .connect_with(options.clone())
            .await?;

        // Probe before handing the pool out
        sqlx::query("SELECT 1").fetch_one(&pool).await?;

        Ok(pool)
    }

    /// Test the database connection.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(ReportError::Query)?;
        Ok(())
    }

    /// Close the connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Decode a MySQL row against the descriptor's declared column kinds.
    ///
    /// A non-NULL value that cannot decode as its declared kind is a
    /// `Mapping` error naming the column and the underlying cause, not a
    /// silent NULL.
    fn decode_row(row: &MySqlRow, columns: &[ColumnSpec]) -> Result<Vec<SqlValue>> {
        columns
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let is_null: bool = row.try_get_raw(i).map(|v| v.is_null()).unwrap_or(true);
                if is_null {
                    return Ok(SqlValue::Null);
                }

                let value = match spec.kind {
                    ColumnKind::Text => row.try_get::<String, _>(i).map(SqlValue::Text),
                    ColumnKind::Int => row.try_get::<i64, _>(i).map(SqlValue::Int),
                    ColumnKind::Float => row.try_get::<f64, _>(i).map(SqlValue::Float),
                };
                value.map_err(|e| {
                    ReportError::mapping(
                        spec.name,
                        format!("cannot decode as {}: {}", spec.kind.name(), e),
                    )
                })
            })
            .collect()
    }
}

#[async_trait]
impl ReportStore for MysqlStore {
    async fn fetch(&self, query: &QueryDescriptor) -> Result<Vec<Vec<SqlValue>>> {
        debug!("Executing report query: {}", query.sql);

        let mut q = sqlx::query(&query.sql);
        for param in &query.params {
            q = q.bind(param.as_str());
        }

        let rows: Vec<MySqlRow> = q
            .fetch_all(&self.pool)
            .await
            .map_err(ReportError::Query)?;

        debug!("Query returned {} rows", rows.len());

        rows.iter()
            .map(|row| Self::decode_row(row, query.columns))
            .collect()
    }
}
