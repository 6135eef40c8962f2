use serde::{Deserialize, Serialize};

/// Job posting as seen by the matcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "companyId")]
    pub company_id: String,
    #[serde(rename = "companyName", default)]
    pub company_name: Option<String>,
}

impl JobPosting {
    /// Company name for notification copy, falling back to a generic label
    pub fn company_label(&self) -> &str {
        self.company_name.as_deref().unwrap_or("Company")
    }
}

/// Student profile with interests and notification preference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seeker {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "interestTags", default)]
    pub interest_tags: Vec<String>,
    #[serde(rename = "notifyImmediately", default)]
    pub notify_immediately: bool,
    #[serde(rename = "pushToken", default)]
    pub push_token: Option<String>,
}

/// A seeker selected by the matcher, with the job tags that overlapped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeekerMatch {
    #[serde(rename = "seekerId")]
    pub seeker_id: String,
    #[serde(rename = "sharedTags")]
    pub shared_tags: Vec<String>,
    #[serde(rename = "pushToken", skip_serializing_if = "Option::is_none")]
    pub push_token: Option<String>,
}

/// Delivery state of a notification log row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Pending,
    Sent,
    Failed,
}

/// One row per matched seeker, written best-effort after matching
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationLog {
    #[serde(rename = "student_id")]
    pub seeker_id: String,
    pub job_id: String,
    pub notification_type: String,
    #[serde(rename = "sent_at")]
    pub matched_at: chrono::DateTime<chrono::Utc>,
    pub delivery_method: String,
    #[serde(rename = "status")]
    pub delivery_status: DeliveryStatus,
}

impl NotificationLog {
    /// Build a pending job-match entry
    pub fn job_match(seeker_id: &str, job_id: &str) -> Self {
        Self {
            seeker_id: seeker_id.to_string(),
            job_id: job_id.to_string(),
            notification_type: "job_match".to_string(),
            matched_at: chrono::Utc::now(),
            delivery_method: "push".to_string(),
            delivery_status: DeliveryStatus::Pending,
        }
    }
}

/// Push notification payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushMessage {
    pub to: String,
    pub title: String,
    pub body: String,
    pub data: serde_json::Value,
}

impl PushMessage {
    /// "New Job Match!" message for a seeker
    pub fn job_match(push_token: &str, job: &JobPosting) -> Self {
        Self {
            to: push_token.to_string(),
            title: "New Job Match!".to_string(),
            body: format!(
                "{} at {} matches your interests",
                job.title,
                job.company_label()
            ),
            data: serde_json::json!({ "jobId": job.id, "type": "job_match" }),
        }
    }
}
