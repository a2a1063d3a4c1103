use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Sensitive-data masking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskingConfig {
    /// When false, `mask` returns its input untouched.
    pub enabled: bool,
    /// Return `redaction_text` instead of the original on internal failure.
    pub fail_closed: bool,
    pub redaction_text: String,
}

impl Default for MaskingConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::DEFAULT_MASKING_ENABLED,
            fail_closed: defaults::DEFAULT_MASKING_FAIL_CLOSED,
            redaction_text: defaults::DEFAULT_MASKING_REDACTION.to_string(),
        }
    }
}

impl MaskingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fail_closed && self.redaction_text.is_empty() {
            return Err(ConfigError::invalid(
                "masking.redaction_text",
                "must not be empty when fail_closed is set",
            ));
        }
        Ok(())
    }
}
