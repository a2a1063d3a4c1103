//! # sqlwatch-notify
//!
//! Decides whether a slow-query template is worth a notification right now.
//!
//! - [`lifecycle`]: template status state machine.
//! - [`gate`]: first-contact, escalation and cooldown rules.
//! - [`severity`]: duration bucketing for notification and display.
//! - [`registry`]: concurrent template map with atomic decide-send-mark.
//! - [`housekeeping`]: restart cleanup of in-flight templates.

pub mod gate;
pub mod housekeeping;
pub mod lifecycle;
pub mod registry;
pub mod settings;
pub mod severity;

pub use gate::{GateDecision, TemplateNotificationGate};
pub use housekeeping::{abandon_in_flight, abandon_in_store};
pub use lifecycle::{can_transition, transition};
pub use registry::{GateOutcome, Observation, TemplateRegistry};
pub use settings::NotificationSettings;
pub use severity::{display_severity, severity_for};
