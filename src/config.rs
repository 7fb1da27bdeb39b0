use clap::{Args, Parser, ValueEnum};

#[derive(Clone, Debug, Default, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub database: DatabaseConfig,

    #[command(flatten)]
    pub mail: MailConfig,

    #[command(flatten)]
    pub health: HealthConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Host to listen on
    #[arg(long, env = "PORTFOLIO_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORTFOLIO_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Port for the management server (health probes)
    #[arg(long, env = "PORTFOLIO_MGMT_PORT", default_value_t = 9090)]
    pub mgmt_port: u16,

    /// Seconds to wait for in-flight work after a shutdown signal
    #[arg(long, env = "PORTFOLIO_SHUTDOWN_TIMEOUT_SECS", default_value_t = 5)]
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 3000, mgmt_port: 9090, shutdown_timeout_secs: 5 }
    }
}

#[derive(Clone, Debug, Args)]
pub struct DatabaseConfig {
    /// Postgres connection URL. Submissions are only logged (demo mode) when unset.
    #[arg(long = "database-url", env = "PORTFOLIO_DATABASE_URL")]
    pub url: Option<String>,

    /// Maximum number of pooled connections
    #[arg(long = "db-max-connections", env = "PORTFOLIO_DB_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,

    /// Seconds to wait for a free connection before failing the insert
    #[arg(long = "db-acquire-timeout-secs", env = "PORTFOLIO_DB_ACQUIRE_TIMEOUT_SECS", default_value_t = 5)]
    pub acquire_timeout_secs: u64,

    /// Apply the bundled migrations on startup
    #[arg(long, env = "PORTFOLIO_RUN_MIGRATIONS", default_value_t = false)]
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { url: None, max_connections: 5, acquire_timeout_secs: 5, run_migrations: false }
    }
}

#[derive(Clone, Debug, Args)]
pub struct MailConfig {
    /// API key for the Resend email API. Notifications are disabled when unset.
    #[arg(long = "resend-api-key", env = "PORTFOLIO_RESEND_API_KEY")]
    pub api_key: Option<String>,

    /// Base URL of the Resend-compatible email API
    #[arg(long = "resend-api-base", env = "PORTFOLIO_RESEND_API_BASE", default_value = "https://api.resend.com")]
    pub api_base: String,

    /// Sender address for notification emails
    #[arg(long = "notify-from", env = "PORTFOLIO_NOTIFY_FROM", default_value = "Portfolio Contact <onboarding@resend.dev>")]
    pub from: String,

    /// Address that receives notification emails. Notifications are disabled when unset.
    #[arg(long = "notify-to", env = "PORTFOLIO_NOTIFY_TO")]
    pub to: Option<String>,
}

impl MailConfig {
    /// Returns the API key and recipient when both are configured.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.api_key.as_deref(), self.to.as_deref()) {
            (Some(key), Some(to)) if !key.is_empty() && !to.is_empty() => Some((key, to)),
            _ => None,
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: "https://api.resend.com".to_string(),
            from: "Portfolio Contact <onboarding@resend.dev>".to_string(),
            to: None,
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct HealthConfig {
    /// Timeout for the database readiness check in milliseconds
    #[arg(long = "health-db-timeout-ms", env = "PORTFOLIO_HEALTH_DB_TIMEOUT_MS", default_value_t = 2000)]
    pub db_timeout_ms: u64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self { db_timeout_ms: 2000 }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Default, Args)]
pub struct TelemetryConfig {
    /// Log output format
    #[arg(long, env = "PORTFOLIO_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// OTLP HTTP endpoint for traces and metrics (e.g. `http://localhost:4318`)
    #[arg(long, env = "PORTFOLIO_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,
}

impl Config {
    #[must_use]
    pub fn load() -> Self {
        Self::parse()
    }
}
