//! Configuration for the remote agent platform.
//!
//! Supports reading credentials from `~/.config/mcc/secret.json` with
//! environment variables as a fallback.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

use mcc_core::error::{MccError, Result};

const DEFAULT_BASE_URL: &str = "https://agents.mcc.studio";

/// Root configuration structure for secret.json
#[derive(Debug, Clone, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub agent_platform: Option<AgentPlatformSecret>,
}

/// Agent platform credentials as stored on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentPlatformSecret {
    pub api_key: String,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Resolved connection settings for the agent platform.
#[derive(Debug, Clone)]
pub struct AgentPlatformConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    /// Caller identity forwarded with every invocation.
    pub user_id: String,
}

impl AgentPlatformConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            user_id: "default".to_string(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Loads configuration from ~/.config/mcc/secret.json or environment
    /// variables.
    ///
    /// Priority:
    /// 1. ~/.config/mcc/secret.json (`agent_platform` section)
    /// 2. Environment variables (MCC_AGENT_API_KEY, MCC_AGENT_BASE_URL,
    ///    MCC_AGENT_USER_ID)
    pub fn try_from_env() -> Result<Self> {
        if let Ok(secret) = load_secret_config() {
            if let Some(platform) = secret.agent_platform {
                let mut config = Self::new(
                    platform
                        .base_url
                        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                )
                .with_api_key(platform.api_key);
                if let Some(user_id) = platform.user_id {
                    config = config.with_user_id(user_id);
                }
                return Ok(config);
            }
        }

        let api_key = env::var("MCC_AGENT_API_KEY").map_err(|_| {
            MccError::config(
                "MCC_AGENT_API_KEY not found in ~/.config/mcc/secret.json or environment variables",
            )
        })?;

        let base_url =
            env::var("MCC_AGENT_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(base_url).with_api_key(api_key);
        if let Ok(user_id) = env::var("MCC_AGENT_USER_ID") {
            config = config.with_user_id(user_id);
        }
        Ok(config)
    }
}

/// Loads the secret configuration file from ~/.config/mcc/secret.json
pub fn load_secret_config() -> Result<SecretConfig> {
    let config_path = secret_file_path()?;

    if !config_path.exists() {
        return Err(MccError::config(format!(
            "Configuration file not found at: {}",
            config_path.display()
        )));
    }

    let content = fs::read_to_string(&config_path).map_err(|e| {
        MccError::config(format!(
            "Failed to read configuration file at {}: {}",
            config_path.display(),
            e
        ))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        MccError::config(format!(
            "Failed to parse configuration file at {}: {}",
            config_path.display(),
            e
        ))
    })
}

/// Returns the path to the configuration file: ~/.config/mcc/secret.json
fn secret_file_path() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| MccError::config("Could not determine home directory"))?;
    Ok(home.join(".config").join("mcc").join("secret.json"))
}
