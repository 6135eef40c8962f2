use crate::core::filters::{is_eligible_seeker, job_has_tags, normalize_tags, shared_tags};
use crate::models::{JobPosting, Seeker, SeekerMatch};

/// Result of the matching process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    pub matched: Vec<SeekerMatch>,
    pub total_candidates: usize,
    pub eligible_candidates: usize,
}

impl MatchResult {
    /// Matched seeker identifiers in input order
    pub fn seeker_ids(&self) -> Vec<String> {
        self.matched.iter().map(|m| m.seeker_id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.matched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }
}

/// Selects the seekers whose interests overlap a job's tags
///
/// # Pipeline Stages
/// 1. Eligibility pre-filter (immediate notifications, non-empty interests)
/// 2. Case-insensitive substring overlap between job tags and interests
///
/// There is no scoring or ranking: matched seekers keep their input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterestMatcher;

impl InterestMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Find the seekers to notify about `job`
    ///
    /// A job without tags yields an empty result, as does a seeker list with
    /// no eligible entries. Neither is an error.
    pub fn match_seekers(&self, job: &JobPosting, seekers: &[Seeker]) -> MatchResult {
        let total_candidates = seekers.len();

        if !job_has_tags(job) {
            tracing::info!("Job {} has no tags, nobody to notify", job.id);
            return MatchResult {
                matched: Vec::new(),
                total_candidates,
                eligible_candidates: 0,
            };
        }

        let job_tags = normalize_tags(&job.tags);

        let eligible: Vec<&Seeker> = seekers
            .iter()
            // Stage 1: cheap eligibility filter
            .filter(|seeker| is_eligible_seeker(seeker))
            .collect();
        let eligible_candidates = eligible.len();

        let matched: Vec<SeekerMatch> = eligible
            .into_iter()
            // Stage 2: tag overlap
            .filter_map(|seeker| {
                let interests = normalize_tags(&seeker.interest_tags);
                let shared = shared_tags(&job_tags, &interests);
                if shared.is_empty() {
                    return None;
                }

                tracing::debug!(
                    "Seeker {} matched job {} on {:?}",
                    seeker.id,
                    job.id,
                    shared
                );

                Some(SeekerMatch {
                    seeker_id: seeker.id.clone(),
                    shared_tags: shared,
                    push_token: seeker.push_token.clone(),
                })
            })
            .collect();

        MatchResult {
            matched,
            total_candidates,
            eligible_candidates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_job(tags: &[&str]) -> JobPosting {
        JobPosting {
            id: "job-1".to_string(),
            title: "Cafe Assistant".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            company_id: "co-1".to_string(),
            company_name: Some("Corner Cafe".to_string()),
        }
    }

    fn create_seeker(id: &str, interests: &[&str], notify: bool) -> Seeker {
        Seeker {
            id: id.to_string(),
            name: Some(format!("Student {}", id)),
            interest_tags: interests.iter().map(|t| t.to_string()).collect(),
            notify_immediately: notify,
            push_token: None,
        }
    }

    #[test]
    fn test_reference_scenario() {
        let matcher = InterestMatcher::new();
        let job = create_job(&["barista", "customer service"]);
        let seekers = vec![
            create_seeker("1", &["barista"], true),
            create_seeker("2", &["retail"], true),
            create_seeker("3", &["customer service"], false),
        ];

        let result = matcher.match_seekers(&job, &seekers);

        assert_eq!(result.seeker_ids(), vec!["1"]);
        assert_eq!(result.total_candidates, 3);
        assert_eq!(result.eligible_candidates, 2);
    }

    #[test]
    fn test_empty_job_tags() {
        let matcher = InterestMatcher::new();
        let job = create_job(&[]);
        let seekers = vec![create_seeker("1", &["barista"], true)];

        let result = matcher.match_seekers(&job, &seekers);

        assert!(result.is_empty());
        assert_eq!(result.total_candidates, 1);
    }

    #[test]
    fn test_case_insensitive() {
        let matcher = InterestMatcher::new();
        let job = create_job(&["Retail"]);
        let seekers = vec![create_seeker("1", &["retail"], true)];

        assert_eq!(matcher.match_seekers(&job, &seekers).seeker_ids(), vec!["1"]);
    }

    #[test]
    fn test_trailing_space_interest_not_trimmed() {
        let matcher = InterestMatcher::new();
        let job = create_job(&["basic coding"]);
        let seekers = vec![create_seeker("1", &["coding "], true)];

        assert!(matcher.match_seekers(&job, &seekers).is_empty());
    }

    #[test]
    fn test_blank_interest_matches_any_job() {
        let matcher = InterestMatcher::new();
        let job = create_job(&["barista"]);
        let seekers = vec![create_seeker("1", &[""], true)];

        assert_eq!(matcher.match_seekers(&job, &seekers).seeker_ids(), vec!["1"]);
    }

    #[test]
    fn test_preserves_input_order() {
        let matcher = InterestMatcher::new();
        let job = create_job(&["coding"]);
        let seekers = vec![
            create_seeker("c", &["coding"], true),
            create_seeker("a", &["basic coding"], true),
            create_seeker("b", &["Coding"], true),
        ];

        let result = matcher.match_seekers(&job, &seekers);

        assert_eq!(result.seeker_ids(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_records_shared_tags() {
        let matcher = InterestMatcher::new();
        let job = create_job(&["Barista", "Customer Service"]);
        let seekers = vec![create_seeker("1", &["service"], true)];

        let result = matcher.match_seekers(&job, &seekers);

        assert_eq!(result.matched[0].shared_tags, vec!["customer service"]);
    }
}
