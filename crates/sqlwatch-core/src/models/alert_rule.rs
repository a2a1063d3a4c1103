use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::errors::AlertError;

/// How a rule's condition is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleType {
    /// Compare the metric against a threshold with an operator.
    Threshold,
    /// Any non-zero value, or exact equality when a threshold is set.
    Anomaly,
    /// Needs a time series; never fires from a single snapshot.
    Trend,
}

impl RuleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Threshold => "THRESHOLD",
            Self::Anomaly => "ANOMALY",
            Self::Trend => "TREND",
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleType {
    type Err = AlertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "THRESHOLD" => Ok(Self::Threshold),
            "ANOMALY" => Ok(Self::Anomaly),
            "TREND" => Ok(Self::Trend),
            _ => Err(AlertError::UnknownRuleType {
                value: s.to_string(),
            }),
        }
    }
}

/// Comparison between a metric value and a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOperator {
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = "=")]
    Equal,
}

impl ComparisonOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GreaterThan => ">",
            Self::GreaterOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessOrEqual => "<=",
            Self::Equal => "=",
        }
    }

    /// Apply `value <op> threshold`. NaN never satisfies any operator.
    pub fn apply(&self, value: f64, threshold: f64) -> bool {
        match self {
            Self::GreaterThan => value > threshold,
            Self::GreaterOrEqual => value >= threshold,
            Self::LessThan => value < threshold,
            Self::LessOrEqual => value <= threshold,
            Self::Equal => value == threshold,
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComparisonOperator {
    type Err = AlertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            ">" => Ok(Self::GreaterThan),
            ">=" => Ok(Self::GreaterOrEqual),
            "<" => Ok(Self::LessThan),
            "<=" => Ok(Self::LessOrEqual),
            "=" | "==" => Ok(Self::Equal),
            _ => Err(AlertError::UnknownOperator {
                value: s.to_string(),
            }),
        }
    }
}

/// Severity attached to a fired alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertSeverity {
    type Err = AlertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INFO" => Ok(Self::Info),
            "WARNING" => Ok(Self::Warning),
            "CRITICAL" => Ok(Self::Critical),
            _ => Err(AlertError::UnknownSeverity {
                value: s.to_string(),
            }),
        }
    }
}

fn default_cooldown_minutes() -> u32 {
    defaults::DEFAULT_RULE_COOLDOWN_MINUTES
}

fn default_enabled() -> bool {
    true
}

/// A system-health alert rule. Read-only to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRule {
    pub id: u64,
    /// Unique across the rule set.
    pub name: String,
    pub display_name: String,
    pub metric_name: String,
    pub rule_type: RuleType,
    #[serde(default)]
    pub operator: Option<ComparisonOperator>,
    #[serde(default)]
    pub threshold_value: Option<f64>,
    pub severity: AlertSeverity,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_cooldown_minutes")]
    pub cooldown_minutes: u32,
    #[serde(default)]
    pub description: Option<String>,
}

impl AlertRule {
    /// A THRESHOLD rule with the default cooldown.
    pub fn threshold(
        id: u64,
        name: impl Into<String>,
        metric_name: impl Into<String>,
        operator: ComparisonOperator,
        threshold_value: f64,
        severity: AlertSeverity,
    ) -> Self {
        let name = name.into();
        Self {
            id,
            display_name: name.clone(),
            name,
            metric_name: metric_name.into(),
            rule_type: RuleType::Threshold,
            operator: Some(operator),
            threshold_value: Some(threshold_value),
            severity,
            enabled: true,
            cooldown_minutes: default_cooldown_minutes(),
            description: None,
        }
    }

    /// An ANOMALY rule; `threshold_value` of None means "any non-zero value".
    pub fn anomaly(
        id: u64,
        name: impl Into<String>,
        metric_name: impl Into<String>,
        threshold_value: Option<f64>,
        severity: AlertSeverity,
    ) -> Self {
        let name = name.into();
        Self {
            id,
            display_name: name.clone(),
            name,
            metric_name: metric_name.into(),
            rule_type: RuleType::Anomaly,
            operator: None,
            threshold_value,
            severity,
            enabled: true,
            cooldown_minutes: default_cooldown_minutes(),
            description: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_cooldown_minutes(mut self, minutes: u32) -> Self {
        self.cooldown_minutes = minutes;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn cooldown(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.cooldown_minutes))
    }

    /// Name shown in messages; falls back to `name` when unset.
    pub fn label(&self) -> &str {
        if self.display_name.trim().is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }

    pub fn validate(&self) -> Result<(), AlertError> {
        let invalid = |reason: &str| AlertError::InvalidRule {
            rule: if self.name.is_empty() {
                format!("#{}", self.id)
            } else {
                self.name.clone()
            },
            reason: reason.to_string(),
        };
        if self.name.trim().is_empty() {
            return Err(invalid("name must not be empty"));
        }
        if self.metric_name.trim().is_empty() {
            return Err(invalid("metric_name must not be empty"));
        }
        if self.rule_type == RuleType::Threshold {
            if self.operator.is_none() {
                return Err(invalid("THRESHOLD rule requires an operator"));
            }
            if self.threshold_value.is_none() {
                return Err(invalid("THRESHOLD rule requires a threshold_value"));
            }
        }
        if self.threshold_value.is_some_and(|t| !t.is_finite()) {
            return Err(invalid("threshold_value must be finite"));
        }
        Ok(())
    }
}

/// Validate a rule set: every rule individually, then id and name uniqueness.
pub fn validate_rules(rules: &[AlertRule]) -> Result<(), AlertError> {
    let mut ids = HashSet::with_capacity(rules.len());
    let mut seen = HashSet::with_capacity(rules.len());
    for rule in rules {
        rule.validate()?;
        if !ids.insert(rule.id) {
            return Err(AlertError::DuplicateRuleId { id: rule.id });
        }
        if !seen.insert(rule.name.as_str()) {
            return Err(AlertError::DuplicateRuleName {
                name: rule.name.clone(),
            });
        }
    }
    Ok(())
}
