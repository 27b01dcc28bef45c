//! Connection configuration for the shared plan store.
//!
//! Two parameters matter: the Supabase project URL and its publishable anon
//! key. A built-in pair ships with the binary; user-supplied overrides are
//! persisted by the CLI layer and take effect on the next invocation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::util::{is_http_url, normalize_text_option};
use crate::{Error, Result};

const BUILTIN_SUPABASE_URL: &str = "https://aqoconcaaulgyfdvqqwo.supabase.co";
const BUILTIN_SUPABASE_ANON_KEY: &str = "sb_publishable__mEJwAPbyyH5sKWKV88cew_ADH7vlNp";

const DEFAULT_TABLE: &str = "travel_plans";
const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Validated connection parameters plus sync tuning knobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default = "default_poll_interval", with = "duration_secs")]
    pub poll_interval: Duration,
    #[serde(default = "default_request_timeout", with = "duration_secs")]
    pub request_timeout: Duration,
}

impl SyncConfig {
    /// Build a config from a project URL and anon key, normalizing both.
    pub fn new(supabase_url: impl Into<String>, anon_key: impl Into<String>) -> Result<Self> {
        let supabase_url = normalize_project_url(&supabase_url.into())?;
        let supabase_anon_key = normalize_text_option(Some(anon_key.into())).ok_or_else(|| {
            Error::InvalidConfiguration("Supabase anon key must not be empty".to_string())
        })?;

        Ok(Self {
            supabase_url,
            supabase_anon_key,
            table: default_table(),
            poll_interval: default_poll_interval(),
            request_timeout: default_request_timeout(),
        })
    }

    /// The pair baked into the binary.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            supabase_url: BUILTIN_SUPABASE_URL.to_string(),
            supabase_anon_key: BUILTIN_SUPABASE_ANON_KEY.to_string(),
            table: default_table(),
            poll_interval: default_poll_interval(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Normalize a Supabase project URL: require an http(s) scheme, trim the
/// trailing slash.
pub fn normalize_project_url(url: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(Error::InvalidConfiguration(
            "Supabase URL must not be empty".to_string(),
        ));
    }
    if !is_http_url(trimmed) {
        return Err(Error::InvalidConfiguration(
            "Supabase URL must include http:// or https://".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

const fn default_poll_interval() -> Duration {
    Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS)
}

const fn default_request_timeout() -> Duration {
    Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(deserializer)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_config_is_valid() {
        let config = SyncConfig::builtin();
        assert!(is_http_url(&config.supabase_url));
        assert!(!config.supabase_anon_key.is_empty());
        assert_eq!(config.table, "travel_plans");
    }

    #[test]
    fn new_trims_trailing_slash() {
        let config = SyncConfig::new("https://project.supabase.co/", "anon").unwrap();
        assert_eq!(config.supabase_url, "https://project.supabase.co");
    }

    #[test]
    fn new_rejects_missing_scheme() {
        assert!(SyncConfig::new("project.supabase.co", "anon").is_err());
    }

    #[test]
    fn new_rejects_empty_key() {
        assert!(SyncConfig::new("https://project.supabase.co", "   ").is_err());
    }

    #[test]
    fn serde_round_trip_keeps_durations() {
        let config = SyncConfig::builtin();
        let raw = serde_json::to_string(&config).unwrap();
        let parsed: SyncConfig = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, config);
    }
}
