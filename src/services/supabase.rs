use crate::models::{JobPosting, NotificationLog, Seeker};
use crate::services::store::{JobStore, NotificationLogStore, SeekerStore, StoreError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const JOB_SELECT: &str = "id,company_id,title,tags,companies(name,location)";
const PROFILE_SELECT: &str = "id,name,interests,daily_digest_enabled,push_token";

/// Errors that can occur when interacting with the Supabase REST API
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid service role key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl From<SupabaseError> for StoreError {
    fn from(err: SupabaseError) -> Self {
        match err {
            SupabaseError::NotFound(msg) => StoreError::NotFound(msg),
            SupabaseError::InvalidResponse(msg) => StoreError::InvalidResponse(msg),
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

/// Table names in the hosted database
#[derive(Debug, Clone)]
pub struct SupabaseTables {
    pub jobs: String,
    pub profiles: String,
    pub notification_logs: String,
}

impl Default for SupabaseTables {
    fn default() -> Self {
        Self {
            jobs: "jobs".to_string(),
            profiles: "profiles".to_string(),
            notification_logs: "notification_logs".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompanyRow {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JobRow {
    id: String,
    company_id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    companies: Option<CompanyRow>,
}

impl From<JobRow> for JobPosting {
    fn from(row: JobRow) -> Self {
        JobPosting {
            id: row.id,
            title: row.title.unwrap_or_default(),
            tags: row.tags.unwrap_or_default(),
            company_id: row.company_id,
            company_name: row.companies.and_then(|c| c.name),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProfileRow {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    interests: Option<Vec<String>>,
    #[serde(default)]
    daily_digest_enabled: Option<bool>,
    #[serde(default)]
    push_token: Option<String>,
}

impl From<ProfileRow> for Seeker {
    fn from(row: ProfileRow) -> Self {
        Seeker {
            id: row.id,
            name: row.name,
            interest_tags: row.interests.unwrap_or_default(),
            notify_immediately: !row.daily_digest_enabled.unwrap_or(false),
            push_token: row.push_token.filter(|t| !t.is_empty()),
        }
    }
}

/// Supabase REST (PostgREST) client
///
/// Handles all communication with the hosted backend including:
/// - Fetching a job with its company
/// - Listing students who want immediate notifications
/// - Writing notification log rows
pub struct SupabaseClient {
    base_url: String,
    service_role_key: String,
    client: Client,
    tables: SupabaseTables,
}

impl SupabaseClient {
    /// Create a new Supabase client
    pub fn new(
        base_url: String,
        service_role_key: String,
        tables: SupabaseTables,
    ) -> Result<Self, SupabaseError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url,
            service_role_key,
            client,
            tables,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), table)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.service_role_key)
            .header("Authorization", format!("Bearer {}", self.service_role_key))
    }

    async fn check_status(
        response: reqwest::Response,
        action: &str,
    ) -> Result<reqwest::Response, SupabaseError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SupabaseError::Unauthorized);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read body".to_string());
        tracing::error!("Supabase request to {} failed: {} - {}", action, status, body);
        Err(SupabaseError::ApiError(format!("Failed to {}: {}", action, status)))
    }

    /// Fetch a job by ID, joined with its company name
    pub async fn fetch_job(&self, job_id: &str) -> Result<JobPosting, SupabaseError> {
        let url = format!(
            "{}?id=eq.{}&select={}",
            self.table_url(&self.tables.jobs),
            urlencoding::encode(job_id),
            urlencoding::encode(JOB_SELECT)
        );

        tracing::debug!("Fetching job from: {}", url);

        let response = self.authorized(self.client.get(&url)).send().await?;
        let response = Self::check_status(response, "fetch job").await?;

        let rows: Vec<JobRow> = response
            .json()
            .await
            .map_err(|e| SupabaseError::InvalidResponse(format!("Failed to parse job: {}", e)))?;

        rows.into_iter()
            .next()
            .map(JobPosting::from)
            .ok_or_else(|| SupabaseError::NotFound(format!("Job {} not found", job_id)))
    }

    /// Fetch every student profile with immediate notifications enabled
    pub async fn fetch_notifiable_students(&self) -> Result<Vec<Seeker>, SupabaseError> {
        let url = format!(
            "{}?role=eq.student&daily_digest_enabled=eq.false&select={}",
            self.table_url(&self.tables.profiles),
            urlencoding::encode(PROFILE_SELECT)
        );

        let response = self.authorized(self.client.get(&url)).send().await?;
        let response = Self::check_status(response, "fetch students").await?;

        let rows: Vec<ProfileRow> = response.json().await.map_err(|e| {
            SupabaseError::InvalidResponse(format!("Failed to parse profiles: {}", e))
        })?;

        let seekers: Vec<Seeker> = rows.into_iter().map(Seeker::from).collect();

        tracing::debug!("Fetched {} notifiable students", seekers.len());

        Ok(seekers)
    }

    /// Insert one notification log row
    pub async fn insert_notification_log(&self, log: &NotificationLog) -> Result<(), SupabaseError> {
        let url = self.table_url(&self.tables.notification_logs);

        let response = self
            .authorized(self.client.post(&url))
            .header("Prefer", "return=minimal")
            .json(log)
            .send()
            .await?;
        Self::check_status(response, "insert notification log").await?;

        tracing::debug!("Logged notification: {} -> {}", log.seeker_id, log.job_id);

        Ok(())
    }
}

#[async_trait]
impl JobStore for SupabaseClient {
    async fn get_job(&self, job_id: &str) -> Result<JobPosting, StoreError> {
        Ok(self.fetch_job(job_id).await?)
    }
}

#[async_trait]
impl SeekerStore for SupabaseClient {
    async fn list_notifiable_seekers(&self) -> Result<Vec<Seeker>, StoreError> {
        Ok(self.fetch_notifiable_students().await?)
    }
}

#[async_trait]
impl NotificationLogStore for SupabaseClient {
    async fn record(&self, log: &NotificationLog) -> Result<(), StoreError> {
        Ok(self.insert_notification_log(log).await?)
    }
}
