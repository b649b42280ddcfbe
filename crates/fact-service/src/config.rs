use std::env;
use std::time::Duration;

/// Output format of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Cloud Logging JSON (`severity` / `message` keys)
    Json,
    /// Human-readable, for local runs
    Text,
}

/// Service configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Explicit project id; resolved from the metadata server when unset
    pub project_id: Option<String>,
    pub location: String,
    pub model: String,
    pub model_timeout: Duration,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8082,
            project_id: None,
            location: "us-central1".to_string(),
            model: "gemini-1.5-flash-001".to_string(),
            model_timeout: Duration::from_secs(60),
            log_format: LogFormat::Json,
        }
    }
}

impl Config {
    /// Parse configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let port = var("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let project_id = var("GOOGLE_CLOUD_PROJECT");

        let location = var("GOOGLE_CLOUD_LOCATION").unwrap_or(defaults.location);

        let model = var("FACT_MODEL").unwrap_or(defaults.model);

        let model_timeout = var("MODEL_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.model_timeout);

        let log_format = match var("LOG_FORMAT").as_deref() {
            Some("text") => LogFormat::Text,
            _ => LogFormat::Json,
        };

        Self {
            port,
            project_id,
            location,
            model,
            model_timeout,
            log_format,
        }
    }
}
