//! Value-type edge used for snapshots, fixtures, and comparisons.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::endpoint::Endpoint;
use crate::errors::GraphError;

/// An edge between two named nodes. `endpoint1` is the mark at `node1`,
/// `endpoint2` the mark at `node2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub node1: String,
    pub node2: String,
    pub endpoint1: Endpoint,
    pub endpoint2: Endpoint,
}

impl Edge {
    pub fn new(
        node1: impl Into<String>,
        node2: impl Into<String>,
        endpoint1: Endpoint,
        endpoint2: Endpoint,
    ) -> Self {
        Self {
            node1: node1.into(),
            node2: node2.into(),
            endpoint1,
            endpoint2,
        }
    }

    /// `from --> to`.
    pub fn directed(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::new(from, to, Endpoint::Tail, Endpoint::Arrow)
    }

    /// `a --- b`.
    pub fn undirected(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self::new(a, b, Endpoint::Tail, Endpoint::Tail)
    }

    pub fn is_directed(&self) -> bool {
        matches!(
            (self.endpoint1, self.endpoint2),
            (Endpoint::Tail, Endpoint::Arrow) | (Endpoint::Arrow, Endpoint::Tail)
        )
    }

    pub fn is_undirected(&self) -> bool {
        self.endpoint1 == Endpoint::Tail && self.endpoint2 == Endpoint::Tail
    }

    /// For a directed edge, the (tail, head) pair.
    pub fn direction(&self) -> Option<(&str, &str)> {
        match (self.endpoint1, self.endpoint2) {
            (Endpoint::Tail, Endpoint::Arrow) => Some((&self.node1, &self.node2)),
            (Endpoint::Arrow, Endpoint::Tail) => Some((&self.node2, &self.node1)),
            _ => None,
        }
    }

    /// Canonical form: node names in ascending order, endpoints swapped to match.
    /// Two edges describe the same connection iff their canonical forms are equal.
    pub fn canonical(&self) -> Self {
        if self.node1 <= self.node2 {
            self.clone()
        } else {
            Self {
                node1: self.node2.clone(),
                node2: self.node1.clone(),
                endpoint1: self.endpoint2,
                endpoint2: self.endpoint1,
            }
        }
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}-{} {}",
            self.node1,
            self.endpoint1.left_glyph(),
            self.endpoint2.right_glyph(),
            self.node2
        )
    }
}

impl FromStr for Edge {
    type Err = GraphError;

    /// Parses `A --> B`, `A --- B`, `A <-> B`, `A o-> B`, `A o-o B` and mirrors.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GraphError::InvalidEdgeSpec {
            spec: s.to_string(),
        };
        let parts: Vec<&str> = s.split_whitespace().collect();
        let [node1, connector, node2] = parts.as_slice() else {
            return Err(invalid());
        };
        let (endpoint1, endpoint2) = Endpoint::parse_connector(connector).ok_or_else(invalid)?;
        if node1 == node2 {
            return Err(GraphError::SelfLoop {
                name: node1.to_string(),
            });
        }
        Ok(Self::new(*node1, *node2, endpoint1, endpoint2))
    }
}

impl Serialize for Edge {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Edge {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
