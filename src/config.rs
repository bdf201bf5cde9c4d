//! Client configuration.
//!
//! Configuration is stored in `config.yaml` under the user config
//! directory (override with `BRIGHT_CONFIG_DIR`) and includes:
//! - The API server URL
//! - The bearer credential and the caller's user id
//! - The notification poll interval
//!
//! Environment variables take precedence over the file:
//! `BRIGHT_SERVER_URL`, `BRIGHT_TOKEN`, `BRIGHT_USER_ID`.

use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{BrightError, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub notifications: NotificationsConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        NotificationsConfig {
            interval_secs: default_interval_secs(),
        }
    }
}

fn default_interval_secs() -> u64 {
    1
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(dir) = env::var("BRIGHT_CONFIG_DIR")
            && !dir.is_empty()
        {
            return Ok(PathBuf::from(dir).join("config.yaml"));
        }

        let dirs = directories::ProjectDirs::from("", "", "bright").ok_or_else(|| {
            BrightError::Config("could not determine a config directory".to_string())
        })?;
        Ok(dirs.config_dir().join("config.yaml"))
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Get the server URL from the environment or the config file
    pub fn server_url(&self) -> Option<String> {
        if let Ok(url) = env::var("BRIGHT_SERVER_URL")
            && !url.is_empty()
        {
            return Some(url);
        }

        self.server.url.clone()
    }

    /// Get the bearer token from the environment or the config file
    pub fn access_token(&self) -> Option<String> {
        if let Ok(token) = env::var("BRIGHT_TOKEN")
            && !token.is_empty()
        {
            return Some(token);
        }

        self.auth.token.clone()
    }

    /// Get the caller's user id from the environment or the config file
    pub fn user_id(&self) -> Option<String> {
        if let Ok(id) = env::var("BRIGHT_USER_ID")
            && !id.is_empty()
        {
            return Some(id);
        }

        self.auth.user_id.clone()
    }

    /// Set a config value by dotted key, as used by `bright config set`
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "server.url" => self.server.url = Some(value.to_string()),
            "auth.token" => self.auth.token = Some(value.to_string()),
            "auth.user_id" => self.auth.user_id = Some(value.to_string()),
            "notifications.interval_secs" => {
                self.notifications.interval_secs = value.parse().map_err(|_| {
                    BrightError::Config(format!("invalid interval '{}', expected seconds", value))
                })?;
            }
            _ => {
                return Err(BrightError::Config(format!("unknown config key '{}'", key)));
            }
        }
        Ok(())
    }

    /// Get a config value by dotted key, as used by `bright config get`
    pub fn get_value(&self, key: &str) -> Result<String> {
        let value = match key {
            "server.url" => self.server.url.clone(),
            "auth.token" => self.auth.token.clone(),
            "auth.user_id" => self.auth.user_id.clone(),
            "notifications.interval_secs" => Some(self.notifications.interval_secs.to_string()),
            _ => {
                return Err(BrightError::Config(format!("unknown config key '{}'", key)));
            }
        };

        value.ok_or_else(|| BrightError::Config(format!("'{}' is not set", key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.server.url.is_none());
        assert!(config.auth.token.is_none());
        assert!(config.auth.user_id.is_none());
        assert_eq!(config.notifications.interval_secs, 1);
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config.set_value("server.url", "https://events.example.com").unwrap();
        config.set_value("auth.token", "tok_test123").unwrap();
        config.set_value("auth.user_id", "u-42").unwrap();

        let yaml = serde_yaml_ng::to_string(&config).unwrap();
        let parsed: Config = serde_yaml_ng::from_str(&yaml).unwrap();

        assert_eq!(parsed.server.url.as_deref(), Some("https://events.example.com"));
        assert_eq!(parsed.auth.token.as_deref(), Some("tok_test123"));
        assert_eq!(parsed.auth.user_id.as_deref(), Some("u-42"));
    }

    #[test]
    fn test_set_value_unknown_key() {
        let mut config = Config::default();
        let err = config.set_value("invalid.key", "x").unwrap_err();
        assert!(err.to_string().contains("unknown config key"));
    }

    #[test]
    fn test_set_value_bad_interval() {
        let mut config = Config::default();
        assert!(config.set_value("notifications.interval_secs", "abc").is_err());
        config.set_value("notifications.interval_secs", "30").unwrap();
        assert_eq!(config.notifications.interval_secs, 30);
    }

    #[test]
    fn test_get_value_not_set() {
        let config = Config::default();
        let err = config.get_value("auth.token").unwrap_err();
        assert!(err.to_string().contains("not set"));
    }
}
