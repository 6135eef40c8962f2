use serde::{Deserialize, Serialize};

/// Counters from the post-match delivery step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReport {
    pub logged: usize,
    #[serde(rename = "logFailures")]
    pub log_failures: usize,
    pub pushed: usize,
    #[serde(rename = "pushFailures")]
    pub push_failures: usize,
}

/// Response for the notify endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyJobResponse {
    /// Always true; failed runs are answered with an `ErrorResponse` instead
    pub success: bool,
    #[serde(rename = "matchedCount")]
    pub matched_count: usize,
    #[serde(rename = "matchedSeekerIds")]
    pub matched_seeker_ids: Vec<String>,
    #[serde(rename = "jobTitle")]
    pub job_title: String,
    #[serde(rename = "companyName")]
    pub company_name: Option<String>,
    pub delivery: Option<DeliveryReport>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
