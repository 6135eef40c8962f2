use crate::models::{DeliveryStatus, NotificationLog};
use crate::services::store::{NotificationLogStore, StoreError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

impl From<PostgresError> for StoreError {
    fn from(err: PostgresError) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Delivery status as stored in the `notification_status` enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_status", rename_all = "lowercase")]
pub enum LogStatus {
    Pending,
    Sent,
    Failed,
}

impl From<DeliveryStatus> for LogStatus {
    fn from(value: DeliveryStatus) -> Self {
        match value {
            DeliveryStatus::Pending => LogStatus::Pending,
            DeliveryStatus::Sent => LogStatus::Sent,
            DeliveryStatus::Failed => LogStatus::Failed,
        }
    }
}

/// PostgreSQL sink for notification logs
///
/// Used when the service is pointed at the database directly instead of
/// writing log rows through the REST API.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout_secs: u64,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL for notification logs");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            acquire_timeout_secs.unwrap_or(5),
        )
        .await
    }

    /// Insert one notification log row
    pub async fn insert_log(&self, log: &NotificationLog) -> Result<(), PostgresError> {
        let query = r#"
            INSERT INTO notification_logs
                (student_id, job_id, notification_type, sent_at, delivery_method, status)
            VALUES ($1, $2, $3, $4, $5, $6)
        "#;

        sqlx::query(query)
            .bind(&log.seeker_id)
            .bind(&log.job_id)
            .bind(&log.notification_type)
            .bind(log.matched_at)
            .bind(&log.delivery_method)
            .bind(LogStatus::from(log.delivery_status))
            .execute(&self.pool)
            .await?;

        tracing::debug!("Logged notification: {} -> {}", log.seeker_id, log.job_id);

        Ok(())
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

#[async_trait]
impl NotificationLogStore for PostgresClient {
    async fn record(&self, log: &NotificationLog) -> Result<(), StoreError> {
        Ok(self.insert_log(log).await?)
    }
}
