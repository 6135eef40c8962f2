use crate::models::{JobPosting, Seeker};

/// Lower-case tags for comparison
///
/// Whitespace is significant: `"coding "` is not the same tag as `"coding"`.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    tags.iter().map(|tag| tag.to_lowercase()).collect()
}

/// Check if a seeker can be considered for matching at all
///
/// This is the cheap pre-filter: seekers on the daily digest or with no
/// interests are skipped before any tag comparison.
#[inline]
pub fn is_eligible_seeker(seeker: &Seeker) -> bool {
    seeker.notify_immediately && !seeker.interest_tags.is_empty()
}

/// A job with no tags never matches anyone
#[inline]
pub fn job_has_tags(job: &JobPosting) -> bool {
    !job.tags.is_empty()
}

/// Substring containment in either direction
///
/// Both sides must already be normalized.
#[inline]
fn tag_matches(tag: &str, interest: &str) -> bool {
    tag.contains(interest) || interest.contains(tag)
}

/// Check if any normalized job tag overlaps any normalized interest
#[inline]
pub fn tags_overlap(job_tags: &[String], interests: &[String]) -> bool {
    job_tags
        .iter()
        .any(|tag| interests.iter().any(|interest| tag_matches(tag, interest)))
}

/// Job tags that overlap at least one interest, in job tag order
pub fn shared_tags(job_tags: &[String], interests: &[String]) -> Vec<String> {
    job_tags
        .iter()
        .filter(|tag| interests.iter().any(|interest| tag_matches(tag, interest)))
        .cloned()
        .collect()
}
