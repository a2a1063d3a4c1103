pub mod alerting_config;
pub mod classification_config;
pub mod defaults;
pub mod masking_config;
pub mod notification_config;
pub mod observability_config;
pub mod validate;

pub use alerting_config::AlertingConfig;
pub use classification_config::ClassificationConfig;
pub use masking_config::MaskingConfig;
pub use notification_config::{validate_gate_parameters, NotificationConfig, SeverityThresholds};
pub use observability_config::ObservabilityConfig;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, SqlwatchResult};

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SqlwatchConfig {
    pub notification: NotificationConfig,
    pub alerting: AlertingConfig,
    pub masking: MaskingConfig,
    pub classification: ClassificationConfig,
    pub observability: ObservabilityConfig,
}

impl SqlwatchConfig {
    /// Parse from a TOML string and validate. Missing sections use defaults.
    pub fn from_toml(toml_str: &str) -> SqlwatchResult<Self> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file and validate.
    pub fn from_file(path: &Path) -> SqlwatchResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section; the first violation wins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.notification.validate()?;
        self.alerting.validate()?;
        self.masking.validate()?;
        self.observability.validate()?;
        self.classification.validate()
    }

    /// Serialize back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }
}
