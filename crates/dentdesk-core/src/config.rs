//! Core runtime configuration.
//!
//! Resolved once by the host shell and passed into the core at open time.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Persistence key the treatment store is written under.
pub const DEFAULT_STORAGE_KEY: &str = "treatment-store";

/// Default number of plans per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

const DEFAULT_MAX_UPLOAD_FILES: u32 = 10;
const DEFAULT_MAX_UPLOAD_BYTES: u64 = 20 * 1024 * 1024;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Core configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CoreConfig {
    /// Key the treatment store blob is persisted under
    pub storage_key: String,
    /// Default page size for the treatment list
    pub page_size: u32,
    /// Maximum number of images per intake
    pub max_upload_files: u32,
    /// Maximum size of a single image
    pub max_upload_bytes: u64,
    /// MIME types accepted by the intake wizard
    pub accepted_media_types: Vec<String>,
    /// Load sample patients and appointments into an empty database
    pub seed_sample_data: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            max_upload_files: DEFAULT_MAX_UPLOAD_FILES,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            accepted_media_types: vec![
                "image/jpeg".to_string(),
                "image/png".to_string(),
                "image/dicom".to_string(),
                "application/dicom".to_string(),
            ],
            seed_sample_data: false,
        }
    }
}

impl CoreConfig {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: CoreConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid("storage_key cannot be empty".into()));
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be at least 1".into()));
        }
        if self.max_upload_files == 0 || self.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid("upload limits must be non-zero".into()));
        }
        if self.accepted_media_types.is_empty() {
            return Err(ConfigError::Invalid(
                "accepted_media_types cannot be empty".into(),
            ));
        }
        Ok(())
    }

    /// Case-insensitive media type check.
    pub fn accepts_media_type(&self, media_type: &str) -> bool {
        self.accepted_media_types
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(media_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = CoreConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.storage_key, "treatment-store");
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn test_from_json_partial() {
        let config = CoreConfig::from_json(r#"{"page_size": 25}"#).unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(matches!(
            CoreConfig::from_json(r#"{"page_size": 0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            CoreConfig::from_json(r#"{"storage_key": "  "}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            CoreConfig::from_json("not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_accepts_media_type() {
        let config = CoreConfig::default();
        assert!(config.accepts_media_type("IMAGE/PNG"));
        assert!(!config.accepts_media_type("application/pdf"));
    }
}
