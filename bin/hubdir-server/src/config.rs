//! Server configuration, loaded from environment variables at startup.

use strum::{Display, EnumString};

/// Deployment environment. Only affects logging defaults and the root
/// endpoint's metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

/// Runtime configuration for hubdir-server.
///
/// Every field has a default so the server runs without any environment
/// variables set.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:8001"`).
    pub bind_address: String,

    /// sqlx SQLite URL (default: `"sqlite://hubdir.db"`).
    pub database_url: String,

    /// Upper bound on pooled store connections.
    pub max_connections: u32,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Directory for daily-rolling log files. Stdout only when unset.
    pub log_dir: Option<String>,

    /// Comma-separated allowed CORS origins; `*` allows any origin.
    pub cors_allowed_origins: String,

    /// Serve Swagger UI at `/api/docs`.
    pub enable_swagger: bool,

    pub environment: Environment,
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: env_or("HUBDIR_BIND", "0.0.0.0:8001"),
            database_url: env_or("HUBDIR_DATABASE_URL", "sqlite://hubdir.db"),
            max_connections: parse_env("HUBDIR_MAX_CONNECTIONS", 5),
            log_level: env_or("HUBDIR_LOG", "info"),
            log_json: flag_env("HUBDIR_LOG_JSON", false),
            log_dir: std::env::var("HUBDIR_LOG_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            cors_allowed_origins: env_or("HUBDIR_CORS_ORIGINS", "http://localhost:3000"),
            enable_swagger: flag_env("HUBDIR_ENABLE_SWAGGER", true),
            environment: parse_env("HUBDIR_ENVIRONMENT", Environment::Development),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8001".into(),
            database_url: "sqlite://hubdir.db".into(),
            max_connections: 5,
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
            cors_allowed_origins: "http://localhost:3000".into(),
            enable_swagger: true,
            environment: Environment::Development,
        }
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            // Runs before tracing is initialised.
            eprintln!("WARN: {key}='{raw}' is not valid; using the default");
            default
        }),
        Err(_) => default,
    }
}

fn flag_env(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}
