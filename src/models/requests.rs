use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to notify seekers about a newly created job
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NotifyJobRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "job_id", rename = "jobId", default)]
    pub job_id: String,
    /// Match without writing logs or sending pushes
    #[serde(alias = "dry_run", rename = "dryRun", default)]
    pub dry_run: bool,
}
