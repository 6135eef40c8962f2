//! Bridge Notify - new-job interest matching for the Bridge job marketplace
//!
//! When an employer posts a job, this service selects the students whose
//! interests overlap the job's tags and fans out best-effort notification
//! logs and push messages to them.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{InterestMatcher, MatchResult, Notifier, NotifyError, NotifyOptions, NotifyOutcome};
pub use models::{JobPosting, Seeker, SeekerMatch, NotificationLog, NotifyJobRequest, NotifyJobResponse};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let job = JobPosting {
            id: "j".to_string(),
            title: String::new(),
            tags: vec![],
            company_id: "c".to_string(),
            company_name: None,
        };
        assert!(InterestMatcher::new().match_seekers(&job, &[]).is_empty());
    }
}
