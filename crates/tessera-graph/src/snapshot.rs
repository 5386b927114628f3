//! Serializable form of a [`Graph`]: node list plus edge strings like `"A --> B"`.

use serde::{Deserialize, Serialize};

use tessera_core::errors::GraphError;
use tessera_core::models::{Edge, Node};

use crate::marked_graph::Graph;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl GraphSnapshot {
    /// Measured nodes named `names`, plus the given edge strings.
    pub fn from_specs(names: &[&str], edges: &[&str]) -> Result<Self, GraphError> {
        Ok(Self {
            nodes: names.iter().map(|n| Node::measured(*n)).collect(),
            edges: edges
                .iter()
                .map(|e| e.parse())
                .collect::<Result<Vec<Edge>, GraphError>>()?,
        })
    }
}

impl TryFrom<GraphSnapshot> for Graph {
    type Error = GraphError;

    fn try_from(snapshot: GraphSnapshot) -> Result<Self, Self::Error> {
        let mut graph = Graph::with_nodes(snapshot.nodes)?;
        for edge in &snapshot.edges {
            graph.insert_edge(edge)?;
        }
        Ok(graph)
    }
}

impl From<Graph> for GraphSnapshot {
    fn from(graph: Graph) -> Self {
        Self {
            nodes: graph.nodes().cloned().collect(),
            edges: graph.edges(),
        }
    }
}

impl Graph {
    /// Build a graph of measured nodes from edge strings, e.g.
    /// `Graph::from_specs(&["X", "Y"], &["X --> Y"])`.
    pub fn from_specs(names: &[&str], edges: &[&str]) -> Result<Self, GraphError> {
        Graph::try_from(GraphSnapshot::from_specs(names, edges)?)
    }

    pub fn to_snapshot(&self) -> GraphSnapshot {
        GraphSnapshot::from(self.clone())
    }
}
