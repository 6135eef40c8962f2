use crate::core::matcher::{InterestMatcher, MatchResult};
use crate::models::{DeliveryReport, JobPosting, NotificationLog, PushMessage};
use crate::services::{JobStore, NotificationLogStore, PushSender, SeekerStore, StoreError};
use std::sync::Arc;
use thiserror::Error;

/// Failures that abort a notification run
///
/// Neither variant should ever fail the job creation that triggered the run.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Job not found: {0}")]
    JobNotFound(String),

    #[error("Failed to fetch job: {0}")]
    JobQuery(StoreError),

    #[error("Failed to fetch seekers: {0}")]
    SeekerQuery(StoreError),
}

/// Per-run switches
#[derive(Debug, Clone, Copy, Default)]
pub struct NotifyOptions {
    /// Match only; write no logs and send no pushes
    pub dry_run: bool,
}

/// Summary of one notification run
///
/// Only produced for runs that completed; failures come back as `NotifyError`.
#[derive(Debug, Clone)]
pub struct NotifyOutcome {
    pub matched_count: usize,
    pub matched_seeker_ids: Vec<String>,
    pub job_title: String,
    pub company_name: Option<String>,
    pub delivery: Option<DeliveryReport>,
}

/// New-job notification fan-out
///
/// Reads the job and the seekers through injected stores, runs the matcher,
/// then logs and pushes each match in an isolated delivery step.
#[derive(Clone)]
pub struct Notifier {
    jobs: Arc<dyn JobStore>,
    seekers: Arc<dyn SeekerStore>,
    logs: Arc<dyn NotificationLogStore>,
    push: Option<Arc<dyn PushSender>>,
    matcher: InterestMatcher,
}

impl Notifier {
    pub fn new(
        jobs: Arc<dyn JobStore>,
        seekers: Arc<dyn SeekerStore>,
        logs: Arc<dyn NotificationLogStore>,
    ) -> Self {
        Self {
            jobs,
            seekers,
            logs,
            push: None,
            matcher: InterestMatcher::new(),
        }
    }

    /// Enable push delivery for seekers with a push token
    pub fn with_push(mut self, push: Arc<dyn PushSender>) -> Self {
        self.push = Some(push);
        self
    }

    /// Match a newly created job against all seekers and fan out notifications
    pub async fn notify_new_job(
        &self,
        job_id: &str,
        options: NotifyOptions,
    ) -> Result<NotifyOutcome, NotifyError> {
        let job = self.jobs.get_job(job_id).await.map_err(|e| match e {
            StoreError::NotFound(_) => NotifyError::JobNotFound(job_id.to_string()),
            other => NotifyError::JobQuery(other),
        })?;

        let seekers = self
            .seekers
            .list_notifiable_seekers()
            .await
            .map_err(NotifyError::SeekerQuery)?;

        let result = self.matcher.match_seekers(&job, &seekers);

        tracing::info!(
            "Found {} matched seekers for job: {} ({} eligible of {})",
            result.len(),
            job.title,
            result.eligible_candidates,
            result.total_candidates
        );

        let delivery = if options.dry_run {
            None
        } else {
            Some(self.deliver(&job, &result).await)
        };

        Ok(NotifyOutcome {
            matched_count: result.len(),
            matched_seeker_ids: result.seeker_ids(),
            job_title: job.title,
            company_name: job.company_name,
            delivery,
        })
    }

    /// Write a log row and send a push for each match
    ///
    /// Every failure is logged and counted; nothing propagates.
    pub async fn deliver(&self, job: &JobPosting, result: &MatchResult) -> DeliveryReport {
        let mut report = DeliveryReport::default();

        for matched in &result.matched {
            let log = NotificationLog::job_match(&matched.seeker_id, &job.id);
            match self.logs.record(&log).await {
                Ok(()) => report.logged += 1,
                Err(e) => {
                    tracing::warn!(
                        "Failed to log notification for seeker {}: {}",
                        matched.seeker_id,
                        e
                    );
                    report.log_failures += 1;
                }
            }

            let (Some(push), Some(token)) = (&self.push, &matched.push_token) else {
                continue;
            };

            let message = PushMessage::job_match(token, job);
            match push.send(&message).await {
                Ok(()) => report.pushed += 1,
                Err(e) => {
                    tracing::warn!(
                        "Failed to push notification to seeker {}: {}",
                        matched.seeker_id,
                        e
                    );
                    report.push_failures += 1;
                }
            }
        }

        report
    }
}

/// Run a notification pass in the background after a job was created
///
/// The caller never sees the outcome; errors are logged and dropped.
pub fn spawn_notify(notifier: Notifier, job_id: String) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        match notifier.notify_new_job(&job_id, NotifyOptions::default()).await {
            Ok(outcome) => tracing::info!(
                "Background notification for job {} matched {} seekers",
                job_id,
                outcome.matched_count
            ),
            Err(e) => tracing::warn!("Background notification for job {} failed: {}", job_id, e),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Seeker;
    use crate::services::InMemoryStore;

    fn job(tags: &[&str]) -> JobPosting {
        JobPosting {
            id: "job-1".to_string(),
            title: "Barista".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            company_id: "co-1".to_string(),
            company_name: Some("Bean Co".to_string()),
        }
    }

    fn seeker(id: &str, interests: &[&str], token: Option<&str>) -> Seeker {
        Seeker {
            id: id.to_string(),
            name: None,
            interest_tags: interests.iter().map(|t| t.to_string()).collect(),
            notify_immediately: true,
            push_token: token.map(str::to_string),
        }
    }

    fn notifier(store: Arc<InMemoryStore>) -> Notifier {
        Notifier::new(store.clone(), store.clone(), store.clone()).with_push(store)
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let store = Arc::new(
            InMemoryStore::new()
                .with_job(job(&["barista"]))
                .with_seekers(vec![seeker("1", &["barista"], Some("tok-1"))]),
        );

        let outcome = notifier(store.clone())
            .notify_new_job("job-1", NotifyOptions { dry_run: true })
            .await
            .unwrap();

        assert_eq!(outcome.matched_count, 1);
        assert!(outcome.delivery.is_none());
        assert!(store.logs().is_empty());
        assert!(store.pushes().is_empty());
    }

    #[tokio::test]
    async fn test_push_only_for_seekers_with_token() {
        let store = Arc::new(
            InMemoryStore::new()
                .with_job(job(&["barista"]))
                .with_seekers(vec![
                    seeker("1", &["barista"], Some("tok-1")),
                    seeker("2", &["barista"], None),
                ]),
        );

        let outcome = notifier(store.clone())
            .notify_new_job("job-1", NotifyOptions::default())
            .await
            .unwrap();

        let delivery = outcome.delivery.unwrap();
        assert_eq!(delivery.logged, 2);
        assert_eq!(delivery.pushed, 1);
        assert_eq!(store.pushes()[0].to, "tok-1");
        assert_eq!(store.pushes()[0].body, "Barista at Bean Co matches your interests");
    }

    #[tokio::test]
    async fn test_push_failure_is_counted() {
        let store = Arc::new(
            InMemoryStore::new()
                .with_job(job(&["barista"]))
                .with_seekers(vec![seeker("1", &["barista"], Some("bad"))])
                .with_failing_push("bad"),
        );

        let outcome = notifier(store.clone())
            .notify_new_job("job-1", NotifyOptions::default())
            .await
            .unwrap();

        assert_eq!(outcome.matched_count, 1);
        assert_eq!(outcome.delivery.unwrap().push_failures, 1);
    }

    #[tokio::test]
    async fn test_spawn_notify_swallows_errors() {
        let store = Arc::new(InMemoryStore::new());

        let handle = spawn_notify(notifier(store), "missing".to_string());

        assert!(handle.await.is_ok());
    }
}
