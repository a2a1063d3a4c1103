use std::any::Any;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};

use regex::Captures;
use sqlwatch_core::config::MaskingConfig;
use sqlwatch_core::traits::ISqlMasker;
use sqlwatch_observability::tracing_setup::events;

use crate::degradation::DegradationTracker;
use crate::patterns::{self, is_masked_value, MaskPattern};

/// Result of one masking pass.
#[derive(Debug, Clone)]
pub struct MaskOutcome {
    pub masked: String,
    /// Replacements made, keyed by pattern name.
    pub counts: BTreeMap<&'static str, usize>,
    pub tracker: DegradationTracker,
    /// The failure policy produced `masked` (original text or redaction).
    pub fell_back: bool,
}

impl MaskOutcome {
    fn untouched(sql: &str) -> Self {
        Self {
            masked: sql.to_string(),
            counts: BTreeMap::new(),
            tracker: DegradationTracker::new(),
            fell_back: false,
        }
    }

    pub fn total_masked(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_degraded(&self) -> bool {
        self.tracker.has_failures()
    }
}

/// Sensitive-data masker for SQL text.
///
/// Implements `ISqlMasker` from sqlwatch-core. Masking is idempotent and
/// never fails: a pattern that failed to compile is skipped, and a panic
/// during replacement hands the pass to the failure policy (original text
/// by default, `redaction_text` when `fail_closed` is set).
#[derive(Debug, Clone)]
pub struct SqlMasker {
    config: MaskingConfig,
    table: Vec<MaskPattern>,
    quick: Vec<MaskPattern>,
    detection: Vec<MaskPattern>,
}

impl SqlMasker {
    pub fn new() -> Self {
        Self::with_config(MaskingConfig::default())
    }

    pub fn with_config(config: MaskingConfig) -> Self {
        Self {
            config,
            table: patterns::all_patterns(),
            quick: patterns::quick_patterns(),
            detection: patterns::detection_patterns(),
        }
    }

    pub fn config(&self) -> &MaskingConfig {
        &self.config
    }

    /// Mask every sensitive value in `sql`.
    pub fn mask(&self, sql: &str) -> String {
        self.mask_with_report(sql).masked
    }

    /// Mask with per-pattern counts and the degradation record.
    pub fn mask_with_report(&self, sql: &str) -> MaskOutcome {
        self.run(sql, &self.table)
    }

    /// Phone, IPv4 and email only. Cheaper, and deliberately incomplete:
    /// ID numbers, cards, landlines and credentials pass through.
    pub fn quick_mask(&self, sql: &str) -> String {
        self.run(sql, &self.quick).masked
    }

    /// Whether `sql` holds a phone, ID, IPv4, email, password or token.
    /// Values that are already masked do not count.
    pub fn contains_sensitive(&self, sql: &str) -> bool {
        self.detection.iter().any(|pattern| {
            let Some(regex) = pattern.compiled() else {
                return false;
            };
            match pattern.value_group {
                None => regex.is_match(sql),
                Some(group) => regex.captures_iter(sql).any(|caps| {
                    caps.get(group)
                        .is_some_and(|v| !is_masked_value(v.as_str()))
                }),
            }
        })
    }

    /// Patterns whose regex failed to compile.
    pub fn check_pattern_health() -> DegradationTracker {
        let mut tracker = DegradationTracker::new();
        for pattern in patterns::all_patterns() {
            if pattern.compiled().is_none() {
                tracker.record_compile_failure(pattern.name, pattern.category);
            }
        }
        tracker
    }

    fn run(&self, sql: &str, table: &[MaskPattern]) -> MaskOutcome {
        if !self.config.enabled || sql.is_empty() {
            return MaskOutcome::untouched(sql);
        }
        let _span = sqlwatch_observability::masking_span!(sql.len()).entered();

        let mut tracker = DegradationTracker::new();
        let mut counts = BTreeMap::new();
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            apply_table(sql, table, &mut counts, &mut tracker)
        }));

        match result {
            Ok(masked) if !tracker.has_failures() => MaskOutcome {
                masked,
                counts,
                tracker,
                fell_back: false,
            },
            Ok(masked) => {
                events::masking_degraded(&tracker.summary(), self.config.fail_closed);
                if self.config.fail_closed {
                    self.fall_back(sql, tracker)
                } else {
                    MaskOutcome {
                        masked,
                        counts,
                        tracker,
                        fell_back: false,
                    }
                }
            }
            Err(payload) => {
                tracker.record_panic(&panic_message(payload.as_ref()));
                events::masking_degraded(&tracker.summary(), self.config.fail_closed);
                self.fall_back(sql, tracker)
            }
        }
    }

    fn fall_back(&self, sql: &str, tracker: DegradationTracker) -> MaskOutcome {
        let masked = if self.config.fail_closed {
            self.config.redaction_text.clone()
        } else {
            sql.to_string()
        };
        MaskOutcome {
            masked,
            counts: BTreeMap::new(),
            tracker,
            fell_back: true,
        }
    }
}

impl Default for SqlMasker {
    fn default() -> Self {
        Self::new()
    }
}

impl ISqlMasker for SqlMasker {
    fn mask(&self, sql: &str) -> String {
        SqlMasker::mask(self, sql)
    }

    fn contains_sensitive(&self, sql: &str) -> bool {
        SqlMasker::contains_sensitive(self, sql)
    }
}

/// Apply `table` in order. Input with no match comes back byte-identical.
fn apply_table(
    sql: &str,
    table: &[MaskPattern],
    counts: &mut BTreeMap<&'static str, usize>,
    tracker: &mut DegradationTracker,
) -> String {
    let mut current: Option<String> = None;
    for pattern in table {
        let Some(regex) = pattern.compiled() else {
            tracker.record_compile_failure(pattern.name, pattern.category);
            continue;
        };
        let source = current.as_deref().unwrap_or(sql);
        let mut hits = 0usize;
        let replaced = match regex.replace_all(source, |caps: &Captures<'_>| {
            let already_masked = pattern
                .value_group
                .and_then(|g| caps.get(g))
                .is_some_and(|v| is_masked_value(v.as_str()));
            if already_masked {
                return caps.get(0).map_or_else(String::new, |m| m.as_str().to_string());
            }
            hits += 1;
            pattern.replacement.render(caps)
        }) {
            Cow::Borrowed(_) => None,
            Cow::Owned(text) => Some(text),
        };
        if hits > 0 {
            *counts.entry(pattern.name).or_insert(0) += hits;
        }
        if let Some(text) = replaced {
            current = Some(text);
        }
    }
    current.unwrap_or_else(|| sql.to_string())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panic during replacement: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panic during replacement: {s}")
    } else {
        "panic during replacement".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::Replacement;
    use regex::Regex;
    use std::sync::LazyLock;

    static BROKEN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new("(unclosed").ok());
    static DIGITS: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\d+").ok());

    fn broken_pattern() -> MaskPattern {
        MaskPattern {
            name: "broken",
            category: "test",
            regex: &BROKEN,
            replacement: Replacement::Template("x"),
            value_group: None,
        }
    }

    fn panicking_pattern() -> MaskPattern {
        MaskPattern {
            name: "explodes",
            category: "test",
            regex: &DIGITS,
            replacement: Replacement::With(|_| panic!("boom")),
            value_group: None,
        }
    }

    fn masker_with(config: MaskingConfig, table: Vec<MaskPattern>) -> SqlMasker {
        SqlMasker {
            table,
            ..SqlMasker::with_config(config)
        }
    }

    const SQL: &str = "SELECT * FROM u WHERE phone = '13812345678'";

    #[test]
    fn uncompiled_pattern_is_skipped_and_the_rest_still_apply() {
        let mut table = vec![broken_pattern()];
        table.extend(patterns::all_patterns());
        let masker = masker_with(MaskingConfig::default(), table);

        let outcome = masker.mask_with_report(SQL);
        assert_eq!(outcome.masked, "SELECT * FROM u WHERE phone = '138****5678'");
        assert!(outcome.is_degraded());
        assert!(!outcome.fell_back);
        assert_eq!(outcome.tracker.failures()[0].pattern_name, "broken");
        assert_eq!(outcome.tracker.failures()[0].stage, crate::degradation::FailureStage::Compile);
    }

    #[test]
    fn uncompiled_pattern_redacts_when_fail_closed() {
        let config = MaskingConfig {
            fail_closed: true,
            ..MaskingConfig::default()
        };
        let masker = masker_with(config, vec![broken_pattern()]);
        let outcome = masker.mask_with_report(SQL);
        assert_eq!(outcome.masked, "[MASKING_FAILED]");
        assert!(outcome.fell_back);
    }

    #[test]
    fn panic_fails_open_with_original_text() {
        let masker = masker_with(MaskingConfig::default(), vec![panicking_pattern()]);
        let outcome = masker.mask_with_report(SQL);
        assert_eq!(outcome.masked, SQL);
        assert!(outcome.fell_back);
        assert!(outcome.counts.is_empty());
        assert!(outcome.tracker.summary().contains("boom"));
    }

    #[test]
    fn panic_fails_closed_with_redaction() {
        let config = MaskingConfig {
            fail_closed: true,
            redaction_text: "<redacted>".into(),
            ..MaskingConfig::default()
        };
        let masker = masker_with(config, vec![panicking_pattern()]);
        assert_eq!(masker.mask(SQL), "<redacted>");
    }

    #[test]
    fn already_masked_secrets_are_not_counted_again() {
        let masker = SqlMasker::new();
        let outcome = masker.mask_with_report("UPDATE u SET password = '******'");
        assert_eq!(outcome.total_masked(), 0);
    }

    #[test]
    fn bundled_patterns_all_compile() {
        assert!(!SqlMasker::check_pattern_health().has_failures());
    }
}
