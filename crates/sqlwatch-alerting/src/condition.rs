//! Per-rule-type condition checks.

use sqlwatch_core::errors::AlertError;
use sqlwatch_core::models::{AlertRule, RuleType};

/// Whether `value` satisfies the rule's condition.
///
/// A THRESHOLD rule without operator or threshold is a configuration error.
/// TREND rules need a time series and never fire from one value.
pub fn is_triggered(rule: &AlertRule, value: f64) -> Result<bool, AlertError> {
    match rule.rule_type {
        RuleType::Threshold => {
            let (Some(operator), Some(threshold)) = (rule.operator, rule.threshold_value) else {
                return Err(AlertError::InvalidRule {
                    rule: rule.name.clone(),
                    reason: "THRESHOLD rule requires an operator and a threshold_value".into(),
                });
            };
            Ok(operator.apply(value, threshold))
        }
        RuleType::Anomaly => Ok(match rule.threshold_value {
            None => value != 0.0 && !value.is_nan(),
            Some(expected) => value == expected,
        }),
        RuleType::Trend => {
            tracing::debug!(rule = %rule.name, "trend rules are not evaluated");
            Ok(false)
        }
    }
}
