//! Test fixture loader for sqlwatch golden datasets, plus builders and
//! in-memory collaborators shared by integration tests across crates.

pub mod builders;
pub mod collaborators;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::PathBuf;

/// Root directory of the test-fixtures crate, which holds `golden/`.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

/// List all JSON files in a fixture subdirectory, sorted by name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                Some(path)
            } else {
                None
            }
        })
        .collect();
    files.sort();
    files
}

// ── Golden dataset shapes ──

/// `golden/masking/*.json`
#[derive(Debug, Clone, Deserialize)]
pub struct MaskingGolden {
    pub description: String,
    pub cases: Vec<MaskingCase>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MaskingCase {
    pub name: String,
    pub input: String,
    pub expected: String,
    #[serde(default)]
    pub sensitive: Option<bool>,
}

/// `golden/fingerprint/*.json`
#[derive(Debug, Clone, Deserialize)]
pub struct FingerprintGolden {
    pub description: String,
    #[serde(default)]
    pub cases: Vec<FingerprintCase>,
    /// Every statement inside one group must share a hash.
    #[serde(default)]
    pub same_hash_groups: Vec<Vec<String>>,
    /// Every statement across this list must hash differently.
    #[serde(default)]
    pub distinct: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FingerprintCase {
    pub name: String,
    pub sql: String,
    pub template: String,
}

/// `golden/classify/*.json`
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifyGolden {
    pub description: String,
    pub cases: Vec<ClassifyCase>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifyCase {
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
    pub kind: String,
    pub category: String,
    pub strategy: String,
}

/// `golden/alerting/*.json`
#[derive(Debug, Clone, Deserialize)]
pub struct AlertingGolden {
    pub description: String,
    pub rules: Vec<sqlwatch_core::models::AlertRule>,
    pub metrics: std::collections::BTreeMap<String, f64>,
    /// Names of rules expected to fire, in rule order.
    pub expected_fired: Vec<String>,
}
