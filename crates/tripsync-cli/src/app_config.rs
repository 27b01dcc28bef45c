//! Persisted CLI connection configuration.
//!
//! A built-in endpoint/key pair ships with the binary; anything set here
//! (or through `TRIPSYNC_SUPABASE_URL` / `TRIPSYNC_SUPABASE_ANON_KEY`)
//! overrides it on the next invocation.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tripsync_core::config::SyncConfig;
use tripsync_core::util::normalize_text_option;

use crate::error::CliError;

const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default)]
    pub supabase_url: Option<String>,
    #[serde(default)]
    pub supabase_anon_key: Option<String>,
}

const fn default_config_version() -> u32 {
    1
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| panic!("Failed to resolve CLI config directory"))
        .join("tripsync")
        .join(CONFIG_FILE_NAME)
}

impl AppConfig {
    pub fn load() -> Result<Self, CliError> {
        Self::load_from_path(&default_config_path())
    }

    pub fn load_from_path(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|error| {
            CliError::Config(format!("Failed to read config at {}: {error}", path.display()))
        })?;
        let mut config = serde_json::from_str::<Self>(&raw).map_err(|error| {
            CliError::Config(format!("Failed to parse config at {}: {error}", path.display()))
        })?;
        config.normalize();
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf, CliError> {
        let path = default_config_path();
        self.save_to_path(&path)?;
        Ok(path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), CliError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                CliError::Config(format!(
                    "Failed to create config directory {}: {error}",
                    parent.display()
                ))
            })?;
        }

        let mut normalized = self.clone();
        normalized.normalize();
        let serialized = serde_json::to_string_pretty(&normalized)
            .map_err(|error| CliError::Config(format!("Failed to serialize config: {error}")))?;
        std::fs::write(path, serialized).map_err(|error| {
            CliError::Config(format!("Failed to write config at {}: {error}", path.display()))
        })
    }

    fn normalize(&mut self) {
        self.supabase_url = normalize_text_option(self.supabase_url.clone());
        self.supabase_anon_key = normalize_text_option(self.supabase_anon_key.clone());
    }
}

/// Layered resolution: env override, then the config file, then the
/// built-in pair. URL and key resolve independently.
pub fn resolve_sync_config(config: &AppConfig) -> Result<SyncConfig, CliError> {
    let builtin = SyncConfig::builtin();

    let url = normalize_text_option(env::var("TRIPSYNC_SUPABASE_URL").ok())
        .or_else(|| normalize_text_option(config.supabase_url.clone()))
        .unwrap_or_else(|| builtin.supabase_url.clone());
    let key = normalize_text_option(env::var("TRIPSYNC_SUPABASE_ANON_KEY").ok())
        .or_else(|| normalize_text_option(config.supabase_anon_key.clone()))
        .unwrap_or_else(|| builtin.supabase_anon_key.clone());

    SyncConfig::new(url, key).map_err(|error| CliError::Config(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_as_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from_path(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn round_trip_normalizes_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = AppConfig {
            version: 1,
            supabase_url: Some(" https://project.supabase.co ".to_string()),
            supabase_anon_key: Some("   ".to_string()),
        };
        config.save_to_path(&path).unwrap();

        let loaded = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(
            loaded.supabase_url.as_deref(),
            Some("https://project.supabase.co")
        );
        assert_eq!(loaded.supabase_anon_key, None);
    }

    #[test]
    fn resolve_falls_back_to_builtin_pair() {
        let resolved = resolve_sync_config(&AppConfig::default()).unwrap();
        let builtin = SyncConfig::builtin();
        assert_eq!(resolved.supabase_url, builtin.supabase_url);
        assert_eq!(resolved.supabase_anon_key, builtin.supabase_anon_key);
    }

    #[test]
    fn resolve_prefers_file_values_over_builtin() {
        let config = AppConfig {
            version: 1,
            supabase_url: Some("https://other.supabase.co".to_string()),
            supabase_anon_key: Some("other-key".to_string()),
        };
        let resolved = resolve_sync_config(&config).unwrap();
        assert_eq!(resolved.supabase_url, "https://other.supabase.co");
        assert_eq!(resolved.supabase_anon_key, "other-key");
    }
}
