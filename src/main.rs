use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use bridge_notify::config::{LogSink, LoggingSettings, Settings};
use bridge_notify::core::Notifier;
use bridge_notify::routes::{self, notify::AppState};
use bridge_notify::services::{
    DiscardLogStore, ExpoClient, NotificationLogStore, PostgresClient, SupabaseClient, SupabaseTables,
};
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

fn init_tracing(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

fn startup_error(msg: String) -> std::io::Error {
    error!("{}", msg);
    std::io::Error::new(std::io::ErrorKind::Other, msg)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            init_tracing(&LoggingSettings::default());
            return Err(startup_error(format!("Configuration error: {}", e)));
        }
    };

    init_tracing(&settings.logging);

    info!("Starting Bridge notification service...");

    let tables = SupabaseTables {
        jobs: settings.tables.jobs.clone(),
        profiles: settings.tables.profiles.clone(),
        notification_logs: settings.tables.notification_logs.clone(),
    };

    let supabase = Arc::new(
        SupabaseClient::new(
            settings.supabase.url.clone(),
            settings.supabase.service_role_key.clone(),
            tables,
        )
        .map_err(|e| startup_error(format!("Failed to create Supabase client: {}", e)))?,
    );

    info!("Supabase client initialized for {}", settings.supabase.url);

    let postgres = match &settings.database {
        Some(db) => {
            let client = PostgresClient::from_settings(
                &db.url,
                db.max_connections,
                db.min_connections,
                db.acquire_timeout_secs,
            )
            .await
            .map_err(|e| startup_error(format!("Failed to connect to PostgreSQL: {}", e)))?;
            info!("PostgreSQL client initialized");
            Some(Arc::new(client))
        }
        None => None,
    };

    let logs: Arc<dyn NotificationLogStore> = match settings.notifications.log_sink {
        LogSink::Supabase => supabase.clone(),
        LogSink::Postgres => match &postgres {
            Some(pg) => pg.clone(),
            None => {
                return Err(startup_error(
                    "log_sink = \"postgres\" requires a [database] section".to_string(),
                ))
            }
        },
        LogSink::Disabled => Arc::new(DiscardLogStore),
    };

    info!("Notification logs go to {:?}", settings.notifications.log_sink);

    let mut notifier = Notifier::new(supabase.clone(), supabase, logs);

    if settings.notifications.push_enabled {
        let expo = ExpoClient::new(settings.notifications.expo_access_token.clone())
            .map_err(|e| startup_error(format!("Failed to create Expo client: {}", e)))?;
        notifier = notifier.with_push(Arc::new(expo));
        info!("Expo push delivery enabled");
    }

    let app_state = AppState { notifier, postgres };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
