//! Restart housekeeping. In-flight analysis is never resumed after a restart.

use sqlwatch_core::errors::SqlwatchResult;
use sqlwatch_core::models::{QueryTemplate, TemplateStatus};
use sqlwatch_core::traits::ITemplateStore;

/// Mark every Pending, Analyzing or Waiting template as Abandoned.
/// Returns how many changed.
pub fn abandon_in_flight(templates: &mut [QueryTemplate]) -> usize {
    let mut count = 0;
    for template in templates.iter_mut().filter(|t| t.status.is_in_flight()) {
        template.status = TemplateStatus::Abandoned;
        count += 1;
    }
    count
}

/// Same as [`abandon_in_flight`] against a persistent store.
pub fn abandon_in_store(store: &dyn ITemplateStore) -> SqlwatchResult<usize> {
    let mut templates = store.list_in_flight()?;
    let count = abandon_in_flight(&mut templates);
    for template in templates.iter().filter(|t| t.status == TemplateStatus::Abandoned) {
        store.upsert(template)?;
    }
    tracing::info!(
        event = "templates_abandoned",
        count = count,
        "abandoned in-flight templates on startup"
    );
    Ok(count)
}
