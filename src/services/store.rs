// Store traits for dependency injection
//
// The notifier only talks to these seams. Backends (Supabase REST, Postgres,
// Expo, in-memory) implement them.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{JobPosting, NotificationLog, PushMessage, Seeker};

/// Errors surfaced by any store implementation
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Read access to job postings
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Fetch a single job with its company name
    async fn get_job(&self, job_id: &str) -> Result<JobPosting, StoreError>;
}

/// Read access to seeker profiles
#[async_trait]
pub trait SeekerStore: Send + Sync {
    /// All students who want immediate notifications
    async fn list_notifiable_seekers(&self) -> Result<Vec<Seeker>, StoreError>;
}

/// Sink for notification log rows
#[async_trait]
pub trait NotificationLogStore: Send + Sync {
    async fn record(&self, log: &NotificationLog) -> Result<(), StoreError>;
}

/// Push notification transport
#[async_trait]
pub trait PushSender: Send + Sync {
    async fn send(&self, message: &PushMessage) -> Result<(), StoreError>;
}

/// Log sink that drops every row, for deployments without a log table
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardLogStore;

#[async_trait]
impl NotificationLogStore for DiscardLogStore {
    async fn record(&self, log: &NotificationLog) -> Result<(), StoreError> {
        tracing::trace!("Discarding notification log for {} -> {}", log.seeker_id, log.job_id);
        Ok(())
    }
}
