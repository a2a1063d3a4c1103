use crate::errors::SqlwatchResult;
use crate::models::QueryTemplate;

/// Persistence collaborator for query templates.
pub trait ITemplateStore: Send + Sync {
    fn get(&self, fingerprint: &str) -> SqlwatchResult<Option<QueryTemplate>>;

    /// Insert or replace by fingerprint.
    fn upsert(&self, template: &QueryTemplate) -> SqlwatchResult<()>;

    /// Templates whose status is Pending, Analyzing, or Waiting.
    fn list_in_flight(&self) -> SqlwatchResult<Vec<QueryTemplate>>;
}
