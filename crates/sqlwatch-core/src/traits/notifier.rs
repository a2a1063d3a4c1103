use crate::errors::SqlwatchResult;
use crate::models::NotificationRequest;

/// Notification transport (email, webhook, IM).
pub trait INotifier: Send + Sync {
    /// Deliver one notification. An `Err` leaves the template's notification
    /// state untouched.
    fn send(&self, request: &NotificationRequest) -> SqlwatchResult<()>;
}
