use crate::errors::SqlwatchResult;
use crate::models::FiredAlert;

/// Append-only alert history.
pub trait AlertHistorySink: Send + Sync {
    fn record(&self, alert: &FiredAlert) -> SqlwatchResult<()>;
}
