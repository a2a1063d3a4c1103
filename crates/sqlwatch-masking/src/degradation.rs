//! Per-pass failure record for the masking engine.
//!
//! A pattern that failed to compile is skipped and the remaining patterns
//! still run. A panic during replacement aborts the pass and the configured
//! failure policy decides what the caller gets back.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    /// The pattern's regex never compiled.
    Compile,
    /// A replacement panicked mid-pass.
    Replace,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Compile => "compile",
            Self::Replace => "replace",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternFailure {
    pub pattern_name: String,
    pub category: String,
    pub stage: FailureStage,
    pub detail: String,
}

/// Failures accumulated during one masking pass.
#[derive(Debug, Default, Clone)]
pub struct DegradationTracker {
    failures: Vec<PatternFailure>,
}

impl DegradationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_compile_failure(&mut self, pattern_name: &str, category: &str) {
        self.failures.push(PatternFailure {
            pattern_name: pattern_name.to_string(),
            category: category.to_string(),
            stage: FailureStage::Compile,
            detail: "regex compilation failed".to_string(),
        });
    }

    pub fn record_panic(&mut self, detail: &str) {
        self.failures.push(PatternFailure {
            pattern_name: "engine".to_string(),
            category: "engine".to_string(),
            stage: FailureStage::Replace,
            detail: detail.to_string(),
        });
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn failures(&self) -> &[PatternFailure] {
        &self.failures
    }

    /// `name (stage): detail` entries joined for logs and degradation events.
    pub fn summary(&self) -> String {
        self.failures
            .iter()
            .map(|f| format!("{} ({}): {}", f.pattern_name, f.stage, f.detail))
            .collect::<Vec<_>>()
            .join("; ")
    }
}
