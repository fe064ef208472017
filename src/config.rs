use serde::{Deserialize, Serialize};

use std::{env, fs, path::Path, time::Duration};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_USERNAME: &str = "yourUsername";
pub const DEFAULT_PASSWORD: &str = "yourPassword";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub credentials: Credentials,
    /// Request timeout. Requests never time out when unset.
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse {var}: {reason}")]
    Env { var: &'static str, reason: String },
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            credentials: Credentials::default(),
            timeout: None,
        }
    }
}

pub fn from_yaml_str(contents: &str) -> Result<Config, ConfigError> {
    serde_yaml::from_str(contents).map_err(Into::into)
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path)?;
    from_yaml_str(&contents)
}

/// Builds a config from variables resolved through `lookup`, keeping the default for every
/// variable that is absent.
pub fn load_from_vars(
    lookup: impl Fn(&'static str) -> Option<String>,
) -> Result<Config, ConfigError> {
    let mut config = Config::default();

    if let Some(base_url) = lookup("NOTES_BASE_URL") {
        config.base_url = base_url;
    }
    if let Some(username) = lookup("NOTES_USERNAME") {
        config.credentials.username = username;
    }
    if let Some(password) = lookup("NOTES_PASSWORD") {
        config.credentials.password = password;
    }
    if let Some(timeout) = lookup("NOTES_TIMEOUT") {
        let timeout = humantime_serde::re::humantime::parse_duration(&timeout).map_err(|e| {
            ConfigError::Env {
                var: "NOTES_TIMEOUT",
                reason: e.to_string(),
            }
        })?;
        config.timeout = Some(timeout);
    }

    Ok(config)
}

fn load_from_env() -> Result<Config, ConfigError> {
    load_from_vars(|var| env::var(var).ok())
}

pub fn load_config() -> Result<Config, ConfigError> {
    // Retrieve env variable
    let config_path =
        env::var("NOTES_CLIENT_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());

    // Try env path
    if Path::new(&config_path).exists() {
        return load_from_path(&config_path);
    }

    // Fallback to config.yaml
    if Path::new("config.yaml").exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to 'config.yaml'",
            config_path
        );
        return load_from_path("config.yaml");
    }

    // Fallback to config.example.yaml
    if Path::new("config.example.yaml").exists() {
        tracing::warn!(
            "Config file '{}' and 'config.yaml' not found, falling back to 'config.example.yaml'\
             \n This file should not be used and should be replaced with actual data",
            config_path
        );
        return load_from_path("config.example.yaml");
    }

    // Fallback to environment variables
    tracing::info!("No config file found, loading configuration from environment variables");
    load_from_env()
}
