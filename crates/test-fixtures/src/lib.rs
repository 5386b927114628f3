//! Golden cases for Tessera search: canonical DAGs with the skeleton,
//! sepsets and CPDAG a correct search must produce, plus background
//! knowledge scenarios.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root directory of the fixture files.
pub fn fixtures_root() -> PathBuf {
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

pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// All JSON files in a fixture subdirectory, sorted by path.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            path.extension().is_some_and(|ext| ext == "json").then_some(path)
        })
        .collect();
    files.sort();
    files
}

/// Load every case in a subdirectory.
pub fn load_all<T: DeserializeOwned>(subdir: &str) -> Vec<T> {
    let root = fixtures_root();
    list_fixtures(subdir)
        .into_iter()
        .map(|path| {
            let relative = path.strip_prefix(&root).unwrap_or(&path).to_string_lossy().into_owned();
            load_fixture(&relative)
        })
        .collect()
}

/// A recorded separating set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedSepset {
    pub pair: (String, String),
    pub set: Vec<String>,
}

/// A DAG with the outputs of a full-depth search over its oracle.
///
/// `dag` is kept as raw JSON in the graph snapshot format so this crate
/// stays free of the graph types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoldenCpdagCase {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub dag: serde_json::Value,
    pub expected_skeleton: Vec<String>,
    #[serde(default)]
    pub expected_sepsets: Vec<ExpectedSepset>,
    pub expected_cpdag: Vec<String>,
}

/// A search over a DAG's oracle with background knowledge applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoldenKnowledgeCase {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub dag: serde_json::Value,
    pub knowledge: serde_json::Value,
    pub expected_pattern: Vec<String>,
}
