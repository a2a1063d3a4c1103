use std::fmt::Write;

use sqlwatch_core::models::{AlertRule, ComparisonOperator};

/// `Alert rule [<display>] fired: <metric> = <value> (threshold: <op> <threshold>)`,
/// then the rule description on its own line when one is set.
pub fn build_message(rule: &AlertRule, value: f64) -> String {
    let mut message = format!(
        "Alert rule [{}] fired: {} = {:.2}",
        rule.label(),
        rule.metric_name,
        value
    );
    if let Some(threshold) = rule.threshold_value {
        let op = rule.operator.unwrap_or(ComparisonOperator::Equal);
        let _ = write!(message, " (threshold: {op} {threshold})");
    }
    if let Some(description) = rule.description.as_deref().filter(|d| !d.trim().is_empty()) {
        let _ = write!(message, "\nDescription: {description}");
    }
    message
}
