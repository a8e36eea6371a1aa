use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

use crate::utils;

/// Current configuration version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default = "default_config_version")]
    pub config_version: Option<u32>,
}

/// Settings for the optional hosted chat-completions call. The credential
/// itself lives in the key-value store, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_chat_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_chat_model")]
    pub model: String,
    #[serde(default = "default_chat_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_chat_temperature")]
    pub temperature: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
            chat: ChatConfig::default(),
            config_version: Some(CURRENT_CONFIG_VERSION),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: default_chat_endpoint(),
            model: default_chat_model(),
            max_tokens: default_chat_max_tokens(),
            temperature: default_chat_temperature(),
        }
    }
}

// Default value functions
fn default_storage_path() -> String {
    // This is a fallback - actual profile will be determined at load time
    if let Some(data_dir) = utils::get_data_dir(utils::Profile::Prod) {
        data_dir.join("garden.db").to_string_lossy().to_string()
    } else {
        "~/.local/share/moodgarden/garden.db".to_string()
    }
}

fn default_chat_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_chat_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_chat_max_tokens() -> u32 {
    300
}

fn default_chat_temperature() -> f32 {
    0.7
}

fn default_config_version() -> Option<u32> {
    Some(CURRENT_CONFIG_VERSION)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config directory: {0}")]
    ConfigDirError(String),
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to write config file: {0}")]
    WriteError(String),
}

impl Config {
    /// Load configuration from file, or create default if missing
    /// Uses the provided profile to determine config and storage paths
    pub fn load_with_profile(profile: utils::Profile) -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path(profile)?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::ReadError(e.to_string()))?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            // Create default config and save it
            let mut config = Config::default();
            config.storage_path = Self::default_storage_path_for_profile(profile);
            config.save_with_profile(profile)?;
            Ok(config)
        }
    }

    /// Load configuration from file, using production profile
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_profile(utils::Profile::Prod)
    }

    /// Save configuration to file
    pub fn save_with_profile(&mut self, profile: utils::Profile) -> Result<(), ConfigError> {
        // Ensure config version is set before saving
        self.config_version = Some(CURRENT_CONFIG_VERSION);

        let config_path = Self::get_config_path(profile)?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::WriteError(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, toml_string)
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn get_config_path(profile: utils::Profile) -> Result<PathBuf, ConfigError> {
        let config_dir = utils::get_config_dir(profile).ok_or_else(|| {
            ConfigError::ConfigDirError("Could not determine config directory".to_string())
        })?;
        Ok(config_dir.join("config.toml"))
    }

    /// Get default storage path for a specific profile
    fn default_storage_path_for_profile(profile: utils::Profile) -> String {
        if let Some(data_dir) = utils::get_data_dir(profile) {
            data_dir.join("garden.db").to_string_lossy().to_string()
        } else {
            match profile {
                utils::Profile::Dev => "~/.local/share/moodgarden-dev/garden.db".to_string(),
                utils::Profile::Prod => "~/.local/share/moodgarden/garden.db".to_string(),
            }
        }
    }

    /// Get the expanded storage path (with ~ expansion)
    pub fn get_storage_path(&self) -> PathBuf {
        utils::expand_path(&self.storage_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.chat.model, "gpt-3.5-turbo");
        assert_eq!(config.chat.max_tokens, 300);
        assert!(config.storage_path.ends_with("garden.db"));
    }

    #[test]
    fn partial_chat_section_keeps_other_defaults() {
        let config: Config = toml::from_str("[chat]\nmodel = \"gpt-4o-mini\"\n").unwrap();
        assert_eq!(config.chat.model, "gpt-4o-mini");
        assert_eq!(
            config.chat.endpoint,
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut config = Config::default();
        config.chat.temperature = 0.2;
        let raw = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&raw).unwrap();
        assert_eq!(parsed.chat.temperature, 0.2);
        assert_eq!(parsed.config_version, Some(CURRENT_CONFIG_VERSION));
    }
}
