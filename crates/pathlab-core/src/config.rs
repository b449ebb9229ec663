//! Lab configuration.
//!
//! Loaded from JSON; every field has a default so a partial file (or none)
//! is fine.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::is_valid_price;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Settings for a lab installation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LabConfig {
    /// Name printed in the bill header
    pub lab_name: String,
    /// Flat fee added as the last line of every bill
    pub collection_fee: f64,
    /// Referring doctor pre-filled on a new report
    pub default_referring_doctor: String,
    /// Patients shown on the dashboard
    pub recent_patient_limit: usize,
    /// Bills shown in the billing chart
    pub ledger_chart_limit: usize,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            lab_name: "Health Care Pathology Lab".to_string(),
            collection_fee: 50.0,
            default_referring_doctor: "Dr. Self".to_string(),
            recent_patient_limit: 5,
            ledger_chart_limit: 10,
        }
    }
}

impl LabConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: LabConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&contents)?;
        tracing::debug!(path = %path.as_ref().display(), "Loaded lab config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_price(self.collection_fee) {
            return Err(ConfigError::Invalid(format!(
                "collection_fee must be a non-negative amount, got {}",
                self.collection_fee
            )));
        }
        if self.default_referring_doctor.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "default_referring_doctor must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = LabConfig::default();
        assert_eq!(config.collection_fee, 50.0);
        assert_eq!(config.default_referring_doctor, "Dr. Self");
        assert_eq!(config.recent_patient_limit, 5);
        assert_eq!(config.ledger_chart_limit, 10);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = LabConfig::from_json_str(r#"{"collection_fee": 75.5}"#).unwrap();
        assert_eq!(config.collection_fee, 75.5);
        assert_eq!(config.default_referring_doctor, "Dr. Self");
    }

    #[test]
    fn test_negative_fee_rejected() {
        let err = LabConfig::from_json_str(r#"{"collection_fee": -1}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = LabConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"lab_name": "City Lab", "recent_patient_limit": 3}}"#).unwrap();

        let config = LabConfig::load(file.path()).unwrap();
        assert_eq!(config.lab_name, "City Lab");
        assert_eq!(config.recent_patient_limit, 3);
    }

    #[test]
    fn test_load_missing_file() {
        let err = LabConfig::load("/nonexistent/lab-config.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
