//! Template status state machine.
//!
//! ```text
//! Pending -> Analyzing -> Waiting -> Sent
//!                          Waiting -> Waiting     (send failed, keep waiting)
//! Pending | Analyzing | Waiting -> Abandoned      (restart housekeeping)
//! Abandoned -> Analyzing                          (re-analysis)
//! ```
//!
//! `Sent` never goes back to `Pending`; a sent template is re-notified
//! through the gate without a status change.

use sqlwatch_core::errors::NotificationError;
use sqlwatch_core::models::TemplateStatus;

use TemplateStatus as S;

/// Every legal `(from, to)` pair.
pub const TRANSITIONS: &[(TemplateStatus, TemplateStatus)] = &[
    (S::Pending, S::Analyzing),
    (S::Analyzing, S::Waiting),
    (S::Waiting, S::Sent),
    (S::Waiting, S::Waiting),
    (S::Pending, S::Abandoned),
    (S::Analyzing, S::Abandoned),
    (S::Waiting, S::Abandoned),
    (S::Abandoned, S::Analyzing),
];

pub fn can_transition(from: TemplateStatus, to: TemplateStatus) -> bool {
    TRANSITIONS.contains(&(from, to))
}

/// Validate `from -> to`, returning the new status.
pub fn transition(
    from: TemplateStatus,
    to: TemplateStatus,
) -> Result<TemplateStatus, NotificationError> {
    if can_transition(from, to) {
        Ok(to)
    } else {
        Err(NotificationError::IllegalTransition {
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}
