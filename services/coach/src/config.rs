use crate::cli::Cli;
use coach_core::{DEFAULT_BASE_URL, Difficulty, Role, SessionConfig};
use reqwest::Url;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_url: String,
    pub log_level: Level,
    pub session: SessionConfig,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let api_url =
            std::env::var("COACH_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let api_url = validate_api_url("COACH_API_URL", api_url)?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "WARN".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let role = match std::env::var("COACH_ROLE") {
            Ok(value) => value
                .parse::<Role>()
                .map_err(|e| ConfigError::InvalidValue("COACH_ROLE".to_string(), e.to_string()))?,
            Err(_) => Role::default(),
        };
        let difficulty = match std::env::var("COACH_DIFFICULTY") {
            Ok(value) => value.parse::<Difficulty>().map_err(|e| {
                ConfigError::InvalidValue("COACH_DIFFICULTY".to_string(), e.to_string())
            })?,
            Err(_) => Difficulty::default(),
        };

        Ok(Self {
            api_url,
            log_level,
            session: SessionConfig::new(role, difficulty),
        })
    }

    /// Applies command-line flags on top of the environment.
    pub fn with_overrides(mut self, cli: &Cli) -> Result<Self, ConfigError> {
        if let Some(api_url) = &cli.api_url {
            self.api_url = validate_api_url("--api-url", api_url.clone())?;
        }
        if let Some(role) = cli.role {
            self.session.role = role;
        }
        if let Some(difficulty) = cli.difficulty {
            self.session.difficulty = difficulty;
        }
        Ok(self)
    }
}

/// Accepts only absolute `http`/`https` URLs with a host. The trimmed input
/// is kept as given so the client sees exactly what was configured.
fn validate_api_url(source: &str, url: String) -> Result<String, ConfigError> {
    let trimmed = url.trim();
    let invalid = |reason: String| ConfigError::InvalidValue(source.to_string(), reason);

    let parsed =
        Url::parse(trimmed).map_err(|e| invalid(format!("'{}' is not a URL: {}", url, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("'{}' is not an http(s) URL", url)));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(invalid(format!("'{}' has no host", url)));
    }
    Ok(trimmed.to_string())
}
