//! Session configuration for the viewer
//!
//! The API key is always injected (CLI flag, environment or a JSON file) and
//! checked once at startup. A missing key is fatal: no request can succeed
//! without it, so no navigation model or fetcher is built.

use crate::core::constants::{
    API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_HEIGHT, DEFAULT_LAYER, DEFAULT_WIDTH, FETCH_TIMEOUT,
};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub base_url: String,
    pub api_key: String,
    pub layer: String,
    pub width: u32,
    pub height: u32,
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            layer: DEFAULT_LAYER.to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            timeout: FETCH_TIMEOUT,
        }
    }
}

impl ViewerConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Reads a JSON file; missing fields fall back to the defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&content)?;
        log::debug!("loaded viewer config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Startup check. `MissingCredential` is the only fatal outcome.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(MapError::MissingCredential(format!(
                "{API_KEY_ENV} is not set"
            )));
        }
        if self.base_url.trim().is_empty() {
            return Err(MapError::InvalidConfig("base_url is empty".to_string()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(MapError::InvalidConfig(format!(
                "image size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.timeout.is_zero() {
            return Err(MapError::InvalidConfig("timeout must be positive".to_string()));
        }
        Ok(())
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

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
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.base_url, "https://static-maps.yandex.ru/v1");
        assert_eq!((config.width, config.height), (600, 450));
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert_eq!(config.layer, "map");
    }

    #[test]
    fn test_missing_credential_is_fatal() {
        let err = ViewerConfig::default().validate().unwrap_err();
        assert!(matches!(err, MapError::MissingCredential(_)));
        assert!(err.is_fatal());

        let err = ViewerConfig::new("   ").validate().unwrap_err();
        assert!(matches!(err, MapError::MissingCredential(_)));
    }

    #[test]
    fn test_invalid_size() {
        let err = ViewerConfig::new("key").with_size(0, 450).validate().unwrap_err();
        assert!(matches!(err, MapError::InvalidConfig(_)));
        assert!(!err.is_fatal());
        assert!(ViewerConfig::new("key").validate().is_ok());
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"api_key": "abc", "width": 800, "timeout": 5}}"#).unwrap();

        let config = ViewerConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 450);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_from_json_file_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            ViewerConfig::from_json_file(file.path()),
            Err(MapError::Serialization(_))
        ));
    }
}
