use serde::{Deserialize, Serialize};

/// Structural identity of a SQL statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Fingerprint {
    /// Parameterized, normalized SQL text.
    pub template: String,
    /// 32 lowercase hex chars, or empty for blank input.
    pub hash: String,
}

impl Fingerprint {
    pub fn new(template: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            hash: hash.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hash.is_empty()
    }
}
