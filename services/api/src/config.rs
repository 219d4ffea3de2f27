use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    /// When set, requests whose application id differs are rejected.
    pub skill_id: Option<String>,
    pub templates_path: PathBuf,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let skill_id = std::env::var("SKILL_ID")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let templates_path = std::env::var("TEMPLATES_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./templates"));

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            bind_address,
            skill_id,
            templates_path,
            log_level,
        })
    }

    /// Checks the application id carried by a request against `SKILL_ID`.
    ///
    /// Returns an error message when the id is missing or does not match.
    pub fn verify_application_id(&self, application_id: Option<&str>) -> Result<(), String> {
        let Some(expected) = self.skill_id.as_deref() else {
            return Ok(());
        };
        match application_id {
            Some(id) if id == expected => Ok(()),
            Some(id) => Err(format!("Application id '{}' is not accepted", id)),
            None => Err("Request does not carry an application id".to_string()),
        }
    }
}
