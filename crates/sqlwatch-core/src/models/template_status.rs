use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::NotificationError;

/// Lifecycle status of a query template.
///
/// `Pending -> Analyzing -> Waiting -> Sent` is the forward path. `Abandoned`
/// is entered only by restart housekeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateStatus {
    Pending,
    Analyzing,
    Waiting,
    Sent,
    Abandoned,
}

impl TemplateStatus {
    pub const ALL: [TemplateStatus; 5] = [
        Self::Pending,
        Self::Analyzing,
        Self::Waiting,
        Self::Sent,
        Self::Abandoned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Analyzing => "ANALYZING",
            Self::Waiting => "WAITING",
            Self::Sent => "SENT",
            Self::Abandoned => "ABANDONED",
        }
    }

    /// In-flight work that a restart cannot resume.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Pending | Self::Analyzing | Self::Waiting)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Sent | Self::Abandoned)
    }
}

impl fmt::Display for TemplateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateStatus {
    type Err = NotificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| NotificationError::UnknownStatus {
                value: s.to_string(),
            })
    }
}
