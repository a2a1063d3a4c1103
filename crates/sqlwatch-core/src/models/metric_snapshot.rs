use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Well-known metric names.
pub mod metric_names {
    pub const SLOW_QUERY_QPS: &str = "slow_query_qps";
    pub const AI_ANALYSIS_DURATION_AVG: &str = "ai_analysis_duration_avg";
    pub const AI_ANALYSIS_DURATION_MAX: &str = "ai_analysis_duration_max";
    pub const AI_ANALYSIS_DURATION_P99: &str = "ai_analysis_duration_p99";
    pub const QUEUE_BACKLOG: &str = "queue_backlog";
    pub const DATASOURCE_STATUS: &str = "datasource_status";
    pub const MEMORY_USAGE: &str = "memory_usage";
    pub const CPU_USAGE: &str = "cpu_usage";
}

/// Named measurements captured at one instant. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSnapshot {
    captured_at: DateTime<Utc>,
    metrics: BTreeMap<String, f64>,
}

impl MetricSnapshot {
    pub fn new(captured_at: DateTime<Utc>, metrics: BTreeMap<String, f64>) -> Self {
        Self {
            captured_at,
            metrics,
        }
    }

    pub fn builder() -> MetricSnapshotBuilder {
        MetricSnapshotBuilder::default()
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }

    pub fn metrics(&self) -> &BTreeMap<String, f64> {
        &self.metrics
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// The metrics as a JSON object. Non-finite values become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .metrics
            .iter()
            .map(|(name, value)| {
                let json = serde_json::Number::from_f64(*value)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null);
                (name.clone(), json)
            })
            .collect();
        serde_json::Value::Object(map)
    }
}

/// Fluent builder for [`MetricSnapshot`].
#[derive(Debug, Default)]
pub struct MetricSnapshotBuilder {
    captured_at: Option<DateTime<Utc>>,
    metrics: BTreeMap<String, f64>,
}

impl MetricSnapshotBuilder {
    pub fn captured_at(mut self, at: DateTime<Utc>) -> Self {
        self.captured_at = Some(at);
        self
    }

    pub fn metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.metrics.insert(name.into(), value);
        self
    }

    pub fn slow_query_qps(self, value: f64) -> Self {
        self.metric(metric_names::SLOW_QUERY_QPS, value)
    }

    pub fn queue_backlog(self, value: f64) -> Self {
        self.metric(metric_names::QUEUE_BACKLOG, value)
    }

    pub fn datasource_status(self, value: f64) -> Self {
        self.metric(metric_names::DATASOURCE_STATUS, value)
    }

    pub fn memory_usage(self, value: f64) -> Self {
        self.metric(metric_names::MEMORY_USAGE, value)
    }

    pub fn cpu_usage(self, value: f64) -> Self {
        self.metric(metric_names::CPU_USAGE, value)
    }

    pub fn build(self) -> MetricSnapshot {
        MetricSnapshot {
            captured_at: self.captured_at.unwrap_or_else(Utc::now),
            metrics: self.metrics,
        }
    }
}
