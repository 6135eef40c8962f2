use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub supabase: SupabaseSettings,
    #[serde(default)]
    pub tables: TableSettings,
    #[serde(default)]
    pub database: Option<DatabaseSettings>,
    #[serde(default)]
    pub notifications: NotificationSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseSettings {
    pub url: String,
    pub service_role_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableSettings {
    #[serde(default = "default_jobs_table")]
    pub jobs: String,
    #[serde(default = "default_profiles_table")]
    pub profiles: String,
    #[serde(default = "default_logs_table")]
    pub notification_logs: String,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            jobs: default_jobs_table(),
            profiles: default_profiles_table(),
            notification_logs: default_logs_table(),
        }
    }
}

fn default_jobs_table() -> String { "jobs".to_string() }
fn default_profiles_table() -> String { "profiles".to_string() }
fn default_logs_table() -> String { "notification_logs".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
}

/// Where notification log rows are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogSink {
    Supabase,
    Postgres,
    #[serde(rename = "none")]
    Disabled,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationSettings {
    #[serde(default = "default_log_sink")]
    pub log_sink: LogSink,
    #[serde(default)]
    pub push_enabled: bool,
    #[serde(default)]
    pub expo_access_token: Option<String>,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            log_sink: default_log_sink(),
            push_enabled: false,
            expo_access_token: None,
        }
    }
}

fn default_log_sink() -> LogSink { LogSink::Supabase }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with BRIDGE__)
    /// 5. SUPABASE_URL / SUPABASE_SERVICE_ROLE_KEY / DATABASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., BRIDGE__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("BRIDGE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_platform_env(settings, |name| std::env::var(name).ok())?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("BRIDGE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the variable names the hosted platform injects into functions
fn apply_platform_env<F>(settings: Config, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut builder = Config::builder().add_source(settings);

    if let Some(url) = lookup("SUPABASE_URL") {
        builder = builder.set_override("supabase.url", url)?;
    }
    if let Some(key) = lookup("SUPABASE_SERVICE_ROLE_KEY") {
        builder = builder.set_override("supabase.service_role_key", key)?;
    }
    if let Some(url) = lookup("DATABASE_URL") {
        builder = builder.set_override("database.url", url)?;
    }

    builder.build()
}
