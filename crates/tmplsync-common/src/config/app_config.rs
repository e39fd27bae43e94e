//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub sync: SyncConfig,
    pub vendors: VendorConfig,
    pub snowflake: SnowflakeConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Template sync scheduling and failure handling
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    /// Seconds between the start of two runs
    #[serde(default = "default_sync_interval")]
    pub interval_secs: u64,
    /// Run a single sync and exit
    #[serde(default)]
    pub run_once: bool,
    /// Consecutive failed fetches before an incident is opened
    #[serde(default = "default_incident_threshold")]
    pub incident_failure_threshold: usize,
    /// Timeout for each vendor request
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,
}

impl SyncConfig {
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    #[must_use]
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_sync_interval(),
            run_once: false,
            incident_failure_threshold: default_incident_threshold(),
            http_timeout_secs: default_http_timeout(),
        }
    }
}

/// Vendor API endpoints and platform-wide credentials
#[derive(Debug, Clone, Deserialize)]
pub struct VendorConfig {
    #[serde(default = "default_whatsapp_api_url")]
    pub whatsapp_api_url: String,
    /// System user token for WhatsApp Cloud channels
    #[serde(default)]
    pub whatsapp_system_user_token: Option<String>,
    #[serde(default = "default_twilio_content_url")]
    pub twilio_content_url: String,
}

impl Default for VendorConfig {
    fn default() -> Self {
        Self {
            whatsapp_api_url: default_whatsapp_api_url(),
            whatsapp_system_user_token: None,
            twilio_content_url: default_twilio_content_url(),
        }
    }
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

// Default value functions
fn default_app_name() -> String {
    "tmplsync".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_sync_interval() -> u64 {
    900 // 15 minutes
}

fn default_incident_threshold() -> usize {
    5
}

fn default_http_timeout() -> u64 {
    30
}

fn default_whatsapp_api_url() -> String {
    "https://graph.facebook.com/v18.0".to_string()
}

fn default_twilio_content_url() -> String {
    "https://content.twilio.com/v1".to_string()
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a required variable is missing or a value can't be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            app: AppSettings {
                name: var("APP_NAME").unwrap_or_else(default_app_name),
                env: match var("APP_ENV") {
                    Some(value) => Environment::parse(&value)
                        .ok_or(ConfigError::InvalidValue("APP_ENV", value))?,
                    None => Environment::default(),
                },
            },
            database: DatabaseConfig {
                url: var("DATABASE_URL").ok_or(ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: parse_or(&var, "DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: parse_or(&var, "DATABASE_MIN_CONNECTIONS", default_min_connections)?,
            },
            sync: SyncConfig {
                interval_secs: parse_or(&var, "SYNC_INTERVAL_SECS", default_sync_interval)?,
                run_once: parse_or(&var, "SYNC_RUN_ONCE", || false)?,
                incident_failure_threshold: parse_or(
                    &var,
                    "INCIDENT_FAILURE_THRESHOLD",
                    default_incident_threshold,
                )?,
                http_timeout_secs: parse_or(&var, "HTTP_TIMEOUT_SECS", default_http_timeout)?,
            },
            vendors: VendorConfig {
                whatsapp_api_url: var("WHATSAPP_API_URL").unwrap_or_else(default_whatsapp_api_url),
                whatsapp_system_user_token: var("WHATSAPP_SYSTEM_USER_TOKEN"),
                twilio_content_url: var("TWILIO_CONTENT_URL")
                    .unwrap_or_else(default_twilio_content_url),
            },
            snowflake: SnowflakeConfig {
                worker_id: parse_or(&var, "WORKER_ID", || 0)?,
            },
        })
    }
}

/// Parse an optional variable, falling back to `default` when unset
fn parse_or<T, V, D>(var: &V, key: &'static str, default: D) -> Result<T, ConfigError>
where
    T: FromStr,
    V: Fn(&str) -> Option<String>,
    D: FnOnce() -> T,
{
    match var(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, value)),
        None => Ok(default()),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_environment_is_production() {
        assert!(!Environment::Development.is_production());
        assert!(!Environment::Staging.is_production());
        assert!(Environment::Production.is_production());
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/tmplsync")]).unwrap();

        assert_eq!(config.app.name, "tmplsync");
        assert!(config.app.env.is_development());
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.sync.interval(), Duration::from_secs(900));
        assert!(!config.sync.run_once);
        assert_eq!(config.sync.incident_failure_threshold, 5);
        assert_eq!(config.sync.http_timeout(), Duration::from_secs(30));
        assert_eq!(config.vendors.whatsapp_api_url, "https://graph.facebook.com/v18.0");
        assert_eq!(config.vendors.whatsapp_system_user_token, None);
        assert_eq!(config.vendors.twilio_content_url, "https://content.twilio.com/v1");
        assert_eq!(config.snowflake.worker_id, 0);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("DATABASE_URL", "postgres://db/tmplsync"),
            ("APP_ENV", "Production"),
            ("SYNC_INTERVAL_SECS", "60"),
            ("SYNC_RUN_ONCE", "true"),
            ("INCIDENT_FAILURE_THRESHOLD", "3"),
            ("WHATSAPP_SYSTEM_USER_TOKEN", "token123"),
            ("WORKER_ID", "7"),
        ])
        .unwrap();

        assert!(config.app.env.is_production());
        assert_eq!(config.sync.interval_secs, 60);
        assert!(config.sync.run_once);
        assert_eq!(config.sync.incident_failure_threshold, 3);
        assert_eq!(config.vendors.whatsapp_system_user_token.as_deref(), Some("token123"));
        assert_eq!(config.snowflake.worker_id, 7);
    }

    #[test]
    fn test_missing_database_url() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("DATABASE_URL")));
    }

    #[test]
    fn test_invalid_number() {
        let err = load(&[("DATABASE_URL", "postgres://db"), ("SYNC_INTERVAL_SECS", "soon")]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for SYNC_INTERVAL_SECS: soon");
    }
}
