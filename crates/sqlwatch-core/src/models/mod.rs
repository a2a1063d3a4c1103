pub mod alert_rule;
pub mod degradation_event;
pub mod error_classification;
pub mod error_taxonomy;
pub mod fingerprint;
pub mod fired_alert;
pub mod metric_snapshot;
pub mod notification_request;
pub mod query_template;
pub mod severity;
pub mod template_status;

pub use alert_rule::{validate_rules, AlertRule, AlertSeverity, ComparisonOperator, RuleType};
pub use degradation_event::DegradationEvent;
pub use error_classification::ErrorClassification;
pub use error_taxonomy::{
    ErrorCategory, ErrorKind, ErrorKindSpec, RecoveryStrategy, CATEGORY_STRATEGIES, ERROR_KINDS,
};
pub use fingerprint::Fingerprint;
pub use fired_alert::{AlertStatus, FiredAlert};
pub use metric_snapshot::{metric_names, MetricSnapshot, MetricSnapshotBuilder};
pub use notification_request::NotificationRequest;
pub use query_template::QueryTemplate;
pub use severity::{DisplaySeverity, Severity};
pub use template_status::TemplateStatus;
