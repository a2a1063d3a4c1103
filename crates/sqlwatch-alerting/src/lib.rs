//! # sqlwatch-alerting
//!
//! System-health alert rules evaluated against metric snapshots. Each rule
//! has its own cooldown, independent of template notification gating.

pub mod condition;
pub mod engine;
pub mod fire_state;
pub mod message;

pub use engine::AlertRuleEngine;
pub use fire_state::{FireCheck, RuleFireState};
pub use message::build_message;
pub use sqlwatch_core::models::validate_rules;
