use crate::models::{JobPosting, NotificationLog, PushMessage, Seeker};
use crate::services::store::{JobStore, NotificationLogStore, PushSender, SeekerStore, StoreError};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

/// In-memory backend used by tests and local dry runs
///
/// Can simulate an unavailable backend and per-seeker write failures.
#[derive(Default)]
pub struct InMemoryStore {
    jobs: Mutex<Vec<JobPosting>>,
    seekers: Mutex<Vec<Seeker>>,
    logs: Mutex<Vec<NotificationLog>>,
    pushes: Mutex<Vec<PushMessage>>,
    seekers_unavailable: Mutex<bool>,
    failing_log_seekers: Mutex<HashSet<String>>,
    failing_push_tokens: Mutex<HashSet<String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_job(self, job: JobPosting) -> Self {
        self.jobs.lock().unwrap_or_else(|e| e.into_inner()).push(job);
        self
    }

    pub fn with_seekers(self, seekers: Vec<Seeker>) -> Self {
        self.seekers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend(seekers);
        self
    }

    /// Make seeker queries fail as if the backend were down
    pub fn with_seekers_unavailable(self) -> Self {
        *self.seekers_unavailable.lock().unwrap_or_else(|e| e.into_inner()) = true;
        self
    }

    /// Make log writes for one seeker fail
    pub fn with_failing_log(self, seeker_id: &str) -> Self {
        self.failing_log_seekers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(seeker_id.to_string());
        self
    }

    /// Make pushes to one token fail
    pub fn with_failing_push(self, push_token: &str) -> Self {
        self.failing_push_tokens
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(push_token.to_string());
        self
    }

    /// Log rows written so far
    pub fn logs(&self) -> Vec<NotificationLog> {
        self.logs.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Push messages sent so far
    pub fn pushes(&self) -> Vec<PushMessage> {
        self.pushes.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl JobStore for InMemoryStore {
    async fn get_job(&self, job_id: &str) -> Result<JobPosting, StoreError> {
        self.jobs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .find(|job| job.id == job_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("Job {} not found", job_id)))
    }
}

#[async_trait]
impl SeekerStore for InMemoryStore {
    async fn list_notifiable_seekers(&self) -> Result<Vec<Seeker>, StoreError> {
        if *self.seekers_unavailable.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(StoreError::Unavailable("seeker store offline".to_string()));
        }
        Ok(self.seekers.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }
}

#[async_trait]
impl NotificationLogStore for InMemoryStore {
    async fn record(&self, log: &NotificationLog) -> Result<(), StoreError> {
        if self
            .failing_log_seekers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&log.seeker_id)
        {
            return Err(StoreError::Unavailable(format!(
                "log write rejected for {}",
                log.seeker_id
            )));
        }
        self.logs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(log.clone());
        Ok(())
    }
}

#[async_trait]
impl PushSender for InMemoryStore {
    async fn send(&self, message: &PushMessage) -> Result<(), StoreError> {
        if self
            .failing_push_tokens
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&message.to)
        {
            return Err(StoreError::Unavailable(format!("push rejected for {}", message.to)));
        }
        self.pushes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.clone());
        Ok(())
    }
}
