use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{NotifyError, NotifyOptions, Notifier};
use crate::models::{ErrorResponse, HealthResponse, NotifyJobRequest, NotifyJobResponse};
use crate::services::PostgresClient;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub notifier: Notifier,
    pub postgres: Option<Arc<PostgresClient>>,
}

/// Configure all notification routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/jobs/notify", web::post().to(notify_job));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    // Without a database the REST backend is the only dependency
    let pg_healthy = match &state.postgres {
        Some(pg) => pg.health_check().await.unwrap_or(false),
        None => true,
    };

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Notify matching seekers about a new job
///
/// POST /api/v1/jobs/notify
///
/// Request body:
/// ```json
/// {
///   "jobId": "string",
///   "dryRun": false
/// }
/// ```
async fn notify_job(
    state: web::Data<AppState>,
    req: web::Json<NotifyJobRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for notify request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "jobId is required".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    tracing::info!("Notifying seekers for job: {}", req.job_id);

    let options = NotifyOptions { dry_run: req.dry_run };

    match state.notifier.notify_new_job(&req.job_id, options).await {
        Ok(outcome) => HttpResponse::Ok().json(NotifyJobResponse {
            success: true,
            matched_count: outcome.matched_count,
            matched_seeker_ids: outcome.matched_seeker_ids,
            job_title: outcome.job_title,
            company_name: outcome.company_name,
            delivery: outcome.delivery,
        }),
        Err(NotifyError::JobNotFound(job_id)) => {
            tracing::error!("Error fetching job: {} not found", job_id);
            HttpResponse::NotFound().json(ErrorResponse {
                error: "Job not found".to_string(),
                message: format!("No job with id {}", job_id),
                status_code: 404,
            })
        }
        Err(e @ NotifyError::JobQuery(_)) => {
            tracing::error!("{}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Error fetching job".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
        Err(e @ NotifyError::SeekerQuery(_)) => {
            tracing::error!("{}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Error finding students".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{JobPosting, Seeker};
    use crate::services::{InMemoryStore, JobStore, StoreError};
    use actix_web::{test, App};
    use async_trait::async_trait;

    struct OfflineJobs;

    #[async_trait]
    impl JobStore for OfflineJobs {
        async fn get_job(&self, _job_id: &str) -> Result<JobPosting, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }

    fn app_state(store: Arc<InMemoryStore>) -> AppState {
        AppState {
            notifier: Notifier::new(store.clone(), store.clone(), store),
            postgres: None,
        }
    }

    fn store() -> Arc<InMemoryStore> {
        Arc::new(
            InMemoryStore::new()
                .with_job(JobPosting {
                    id: "job-1".to_string(),
                    title: "Barista".to_string(),
                    tags: vec!["Barista".to_string()],
                    company_id: "co-1".to_string(),
                    company_name: None,
                })
                .with_seekers(vec![Seeker {
                    id: "s1".to_string(),
                    name: None,
                    interest_tags: vec!["barista".to_string()],
                    notify_immediately: true,
                    push_token: None,
                }]),
        )
    }

    #[actix_web::test]
    async fn test_notify_job_ok() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(store())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/jobs/notify")
            .set_json(serde_json::json!({ "jobId": "job-1" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["success"], true);
        assert_eq!(body["matchedCount"], 1);
        assert_eq!(body["matchedSeekerIds"], serde_json::json!(["s1"]));
        assert_eq!(body["delivery"]["logged"], 1);
    }

    #[actix_web::test]
    async fn test_notify_job_missing_id() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(store())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/jobs/notify")
            .set_json(serde_json::json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn test_notify_job_not_found() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(store())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/jobs/notify")
            .set_json(serde_json::json!({ "jobId": "nope" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 404);
    }

    #[actix_web::test]
    async fn test_notify_job_seeker_query_failure() {
        let store = Arc::new(
            InMemoryStore::new()
                .with_job(JobPosting {
                    id: "job-1".to_string(),
                    title: "Barista".to_string(),
                    tags: vec!["Barista".to_string()],
                    company_id: "co-1".to_string(),
                    company_name: None,
                })
                .with_seekers_unavailable(),
        );
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(store)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/jobs/notify")
            .set_json(serde_json::json!({ "jobId": "job-1" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 500);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "Error finding students");
        assert_eq!(body.status_code, 500);
    }

    #[actix_web::test]
    async fn test_notify_job_query_failure() {
        let store = store();
        let state = AppState {
            notifier: Notifier::new(Arc::new(OfflineJobs), store.clone(), store),
            postgres: None,
        };
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/jobs/notify")
            .set_json(serde_json::json!({ "jobId": "job-1" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 500);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "Error fetching job");
    }

    #[actix_web::test]
    async fn test_health_without_database() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(store())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.status, "healthy");
    }
}
