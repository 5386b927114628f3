//! Record of the conditioning sets that separated node pairs during adjacency search.

use std::collections::BTreeMap;

/// Maps an unordered pair of node names to the set that rendered them independent.
///
/// Keys are stored with the lexically smaller name first, so lookups are
/// symmetric. Iteration order is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SepsetMap {
    sets: BTreeMap<(String, String), Vec<String>>,
}

fn key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

impl SepsetMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `sepset(a, b) = set`, replacing any previous entry.
    pub fn set(&mut self, a: &str, b: &str, set: Vec<String>) {
        self.sets.insert(key(a, b), set);
    }

    pub fn get(&self, a: &str, b: &str) -> Option<&[String]> {
        self.sets.get(&key(a, b)).map(Vec::as_slice)
    }

    /// Whether `node` belongs to the recorded separating set of `a` and `b`.
    /// `None` when the pair was never separated.
    pub fn separates_with(&self, a: &str, b: &str, node: &str) -> Option<bool> {
        self.get(a, b).map(|set| set.iter().any(|n| n == node))
    }

    pub fn remove(&mut self, a: &str, b: &str) -> Option<Vec<String>> {
        self.sets.remove(&key(a, b))
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &[String])> {
        self.sets
            .iter()
            .map(|((a, b), set)| (a.as_str(), b.as_str(), set.as_slice()))
    }
}
