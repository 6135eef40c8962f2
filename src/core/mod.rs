// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod notifier;

pub use filters::{is_eligible_seeker, job_has_tags, normalize_tags, shared_tags, tags_overlap};
pub use matcher::{InterestMatcher, MatchResult};
pub use notifier::{spawn_notify, NotifyError, NotifyOptions, NotifyOutcome, Notifier};
