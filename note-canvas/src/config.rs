use directories::ProjectDirs;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable names - single source of truth
pub mod env_vars {
    /// Base URL of the notes service, including the `/api` prefix.
    pub const API_URL: &str = "NOTE_CANVAS_API_URL";
    /// Directory holding the local store (`storage.json`).
    pub const DATA_DIR: &str = "NOTE_CANVAS_DATA_DIR";
}

/// Default values
pub mod defaults {
    pub const API_URL: &str = "http://localhost:5000/api";
    pub const DATA_DIR: &str = "./.note-canvas";
    pub const STORAGE_FILE: &str = "storage.json";
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be an http(s) URL, got '{value}'")]
    InvalidUrl { var: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub api_url: String,
    pub data_dir: PathBuf,
}

impl Config {
    /// Read configuration from the process environment. Call `dotenvy::dotenv()`
    /// first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(env_vars::API_URL)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| defaults::API_URL.to_string());
        let api_url = api_url.trim().trim_end_matches('/').to_string();

        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl {
                var: env_vars::API_URL,
                value: api_url,
            });
        }

        let data_dir = lookup(env_vars::DATA_DIR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        Ok(Self { api_url, data_dir })
    }

    /// Path of the JSON file backing the local store.
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(defaults::STORAGE_FILE)
    }
}

/// Platform data directory, or `./.note-canvas` when none can be determined.
fn default_data_dir() -> PathBuf {
    ProjectDirs::from("com", "note-canvas", "note-canvas")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(defaults::DATA_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.api_url, "http://localhost:5000/api");
        assert!(config.storage_path().ends_with("storage.json"));
    }

    #[test]
    fn test_overrides_and_trailing_slash() {
        let config = Config::from_lookup(lookup_from(&[
            (env_vars::API_URL, "https://notes.example.com/api/"),
            (env_vars::DATA_DIR, "/tmp/nc"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "https://notes.example.com/api");
        assert_eq!(config.storage_path(), PathBuf::from("/tmp/nc/storage.json"));
    }

    #[test]
    fn test_rejects_non_http_url() {
        let err = Config::from_lookup(lookup_from(&[(env_vars::API_URL, "localhost:5000")]))
            .unwrap_err();
        assert!(err.to_string().contains("NOTE_CANVAS_API_URL"));
    }
}
