// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{JobPosting, Seeker, SeekerMatch, NotificationLog, DeliveryStatus, PushMessage};
pub use requests::NotifyJobRequest;
pub use responses::{NotifyJobResponse, DeliveryReport, HealthResponse, ErrorResponse};
