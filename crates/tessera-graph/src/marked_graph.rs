//! petgraph::StableGraph wrapper whose edges carry an endpoint mark at each side.

use std::collections::HashMap;

use petgraph::graph::DiGraph;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use petgraph::Undirected;
use serde::{Deserialize, Serialize};

use tessera_core::errors::GraphError;
use tessera_core::models::{Edge, Endpoint, Node};

use crate::snapshot::GraphSnapshot;

/// Handle to a node. Stable across edge and node removals.
pub type NodeId = NodeIndex;

/// Endpoint marks stored on an edge, keyed by petgraph's source/target order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeMarks {
    pub at_source: Endpoint,
    pub at_target: Endpoint,
}

/// The underlying undirected storage graph.
pub type MarkedStableGraph = StableGraph<Node, EdgeMarks, Undirected>;

/// A mixed graph: at most one edge per adjacent pair, each edge with two marks.
///
/// Node ids iterate in insertion order, which every search stage relies on
/// for reproducible output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "GraphSnapshot", into = "GraphSnapshot")]
pub struct Graph {
    inner: MarkedStableGraph,
    node_index: HashMap<String, NodeIndex>,
    /// Live ids in insertion order. petgraph reuses freed slots, so its own
    /// index order drifts after a removal.
    order: Vec<NodeIndex>,
    rank: HashMap<NodeIndex, usize>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// A graph over `nodes` with no edges.
    pub fn with_nodes(nodes: impl IntoIterator<Item = Node>) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        for node in nodes {
            graph.add_node(node)?;
        }
        Ok(graph)
    }

    /// The complete undirected graph over `nodes`.
    pub fn complete(nodes: impl IntoIterator<Item = Node>) -> Result<Self, GraphError> {
        let mut graph = Self::with_nodes(nodes)?;
        let ids: Vec<NodeId> = graph.node_ids().collect();
        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i + 1..] {
                graph.add_undirected_edge(a, b)?;
            }
        }
        Ok(graph)
    }

    // --- Nodes ---

    pub fn add_node(&mut self, node: Node) -> Result<NodeId, GraphError> {
        if self.node_index.contains_key(&node.name) {
            return Err(GraphError::DuplicateNode { name: node.name });
        }
        let name = node.name.clone();
        let idx = self.inner.add_node(node);
        self.node_index.insert(name, idx);
        self.rank.insert(idx, self.order.len());
        self.order.push(idx);
        Ok(idx)
    }

    /// Remove a node and all its edges.
    pub fn remove_node(&mut self, name: &str) -> bool {
        match self.node_index.remove(name) {
            Some(idx) => {
                self.inner.remove_node(idx);
                self.order.retain(|&id| id != idx);
                self.rank = self.order.iter().enumerate().map(|(i, &id)| (id, i)).collect();
                true
            }
            None => false,
        }
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.node_index.get(name).copied()
    }

    /// Like [`Graph::node_id`] but reports a missing node as an error.
    pub fn require_node(&self, name: &str) -> Result<NodeId, GraphError> {
        self.node_id(name).ok_or_else(|| GraphError::NodeNotFound {
            name: name.to_string(),
        })
    }

    /// The node behind an id.
    ///
    /// # Panics
    ///
    /// If `id` is not live in this graph: it came from another graph or its
    /// node was removed. Check with [`Graph::contains`] when unsure.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.inner[id]
    }

    /// Name of the node behind an id. Panics like [`Graph::node`].
    pub fn name(&self, id: NodeId) -> &str {
        &self.inner[id].name
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.inner.contains_node(id)
    }

    /// Node ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.order.iter().copied()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.order.iter().map(move |&idx| &self.inner[idx])
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Read-only access to the petgraph storage for algorithms that want it.
    pub fn inner(&self) -> &MarkedStableGraph {
        &self.inner
    }

    // --- Edges ---

    /// Add `a *-* b` with `mark_a` at `a` and `mark_b` at `b`.
    pub fn add_edge(
        &mut self,
        a: NodeId,
        b: NodeId,
        mark_a: Endpoint,
        mark_b: Endpoint,
    ) -> Result<(), GraphError> {
        if a == b {
            return Err(GraphError::SelfLoop {
                name: self.name(a).to_string(),
            });
        }
        if self.is_adjacent(a, b) {
            return Err(GraphError::DuplicateEdge {
                node1: self.name(a).to_string(),
                node2: self.name(b).to_string(),
            });
        }
        self.inner.add_edge(
            a,
            b,
            EdgeMarks {
                at_source: mark_a,
                at_target: mark_b,
            },
        );
        Ok(())
    }

    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId) -> Result<(), GraphError> {
        self.add_edge(from, to, Endpoint::Tail, Endpoint::Arrow)
    }

    pub fn add_undirected_edge(&mut self, a: NodeId, b: NodeId) -> Result<(), GraphError> {
        self.add_edge(a, b, Endpoint::Tail, Endpoint::Tail)
    }

    /// Add an edge given by node names. Both nodes must already exist.
    pub fn insert_edge(&mut self, edge: &Edge) -> Result<(), GraphError> {
        let a = self.require_node(&edge.node1)?;
        let b = self.require_node(&edge.node2)?;
        self.add_edge(a, b, edge.endpoint1, edge.endpoint2)
    }

    pub fn remove_edge(&mut self, a: NodeId, b: NodeId) -> bool {
        match self.inner.find_edge(a, b) {
            Some(e) => {
                self.inner.remove_edge(e);
                true
            }
            None => false,
        }
    }

    pub fn is_adjacent(&self, a: NodeId, b: NodeId) -> bool {
        self.inner.find_edge(a, b).is_some()
    }

    /// Neighbors of `a` in insertion order.
    pub fn adjacent_nodes(&self, a: NodeId) -> Vec<NodeId> {
        let mut adj: Vec<NodeId> = self.inner.neighbors(a).collect();
        self.sort_by_insertion(&mut adj);
        adj.dedup();
        adj
    }

    /// Sort ids of this graph into insertion order. Foreign ids sort last.
    pub fn sort_by_insertion(&self, ids: &mut [NodeId]) {
        ids.sort_unstable_by_key(|id| self.rank.get(id).copied().unwrap_or(usize::MAX));
    }

    pub fn degree(&self, a: NodeId) -> usize {
        self.inner.neighbors(a).count()
    }

    fn edge_between(&self, a: NodeId, b: NodeId) -> Option<(EdgeIndex, bool)> {
        let e = self.inner.find_edge(a, b)?;
        let (source, _) = self.inner.edge_endpoints(e)?;
        Some((e, source == a))
    }

    /// (mark at `a`, mark at `b`) for the edge `a *-* b`.
    pub fn marks(&self, a: NodeId, b: NodeId) -> Option<(Endpoint, Endpoint)> {
        let (e, a_is_source) = self.edge_between(a, b)?;
        let marks = self.inner.edge_weight(e)?;
        if a_is_source {
            Some((marks.at_source, marks.at_target))
        } else {
            Some((marks.at_target, marks.at_source))
        }
    }

    /// The mark at `b` on the edge `a *-* b`.
    pub fn endpoint(&self, a: NodeId, b: NodeId) -> Option<Endpoint> {
        self.marks(a, b).map(|(_, at_b)| at_b)
    }

    /// Replace both marks of an existing edge.
    pub fn set_marks(
        &mut self,
        a: NodeId,
        b: NodeId,
        mark_a: Endpoint,
        mark_b: Endpoint,
    ) -> Result<(), GraphError> {
        let (e, a_is_source) = self.edge_between(a, b).ok_or_else(|| GraphError::EdgeNotFound {
            node1: self.name(a).to_string(),
            node2: self.name(b).to_string(),
        })?;
        if let Some(marks) = self.inner.edge_weight_mut(e) {
            if a_is_source {
                marks.at_source = mark_a;
                marks.at_target = mark_b;
            } else {
                marks.at_source = mark_b;
                marks.at_target = mark_a;
            }
        }
        Ok(())
    }

    /// Set the mark at `b` on the edge `a *-* b`, leaving the mark at `a` alone.
    pub fn set_endpoint(&mut self, a: NodeId, b: NodeId, mark: Endpoint) -> Result<(), GraphError> {
        let at_a = self
            .marks(a, b)
            .map(|(at_a, _)| at_a)
            .ok_or_else(|| GraphError::EdgeNotFound {
                node1: self.name(a).to_string(),
                node2: self.name(b).to_string(),
            })?;
        self.set_marks(a, b, at_a, mark)
    }

    /// Turn the existing edge into `from --> to`.
    pub fn orient(&mut self, from: NodeId, to: NodeId) -> Result<(), GraphError> {
        self.set_marks(from, to, Endpoint::Tail, Endpoint::Arrow)
    }

    /// Turn the existing edge into `a --- b`.
    pub fn make_undirected(&mut self, a: NodeId, b: NodeId) -> Result<(), GraphError> {
        self.set_marks(a, b, Endpoint::Tail, Endpoint::Tail)
    }

    /// `from --> to`.
    pub fn is_directed_from_to(&self, from: NodeId, to: NodeId) -> bool {
        self.marks(from, to) == Some((Endpoint::Tail, Endpoint::Arrow))
    }

    /// `a --- b`.
    pub fn is_undirected(&self, a: NodeId, b: NodeId) -> bool {
        self.marks(a, b) == Some((Endpoint::Tail, Endpoint::Tail))
    }

    /// Arrowheads at `b` from both `a` and `c`.
    pub fn is_def_collider(&self, a: NodeId, b: NodeId, c: NodeId) -> bool {
        self.endpoint(a, b) == Some(Endpoint::Arrow) && self.endpoint(c, b) == Some(Endpoint::Arrow)
    }

    /// Nodes `p` with `p --> b`, ascending.
    pub fn parents(&self, b: NodeId) -> Vec<NodeId> {
        self.adjacent_nodes(b)
            .into_iter()
            .filter(|&p| self.is_directed_from_to(p, b))
            .collect()
    }

    /// Nodes `c` with `a --> c`, ascending.
    pub fn children(&self, a: NodeId) -> Vec<NodeId> {
        self.adjacent_nodes(a)
            .into_iter()
            .filter(|&c| self.is_directed_from_to(a, c))
            .collect()
    }

    /// Nodes `n` with `a --- n`, ascending.
    pub fn undirected_neighbors(&self, a: NodeId) -> Vec<NodeId> {
        self.adjacent_nodes(a)
            .into_iter()
            .filter(|&n| self.is_undirected(a, n))
            .collect()
    }

    /// Adjacent pairs `(a, b)` with `a` inserted before `b`, in insertion order.
    pub fn adjacent_pairs(&self) -> Vec<(NodeId, NodeId)> {
        let mut pairs: Vec<(usize, usize)> = self
            .inner
            .edge_indices()
            .filter_map(|e| self.inner.edge_endpoints(e))
            .filter_map(|(a, b)| Some((*self.rank.get(&a)?, *self.rank.get(&b)?)))
            .map(|(a, b)| if a < b { (a, b) } else { (b, a) })
            .collect();
        pairs.sort_unstable();
        pairs
            .into_iter()
            .map(|(a, b)| (self.order[a], self.order[b]))
            .collect()
    }

    /// The edge `a *-* b`, written from `a`'s side.
    pub fn edge(&self, a: NodeId, b: NodeId) -> Option<Edge> {
        let (mark_a, mark_b) = self.marks(a, b)?;
        Some(Edge::new(self.name(a), self.name(b), mark_a, mark_b))
    }

    /// All edges in canonical form, sorted. Suitable for equality checks.
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self
            .adjacent_pairs()
            .into_iter()
            .filter_map(|(a, b)| self.edge(a, b))
            .map(|e| e.canonical())
            .collect();
        edges.sort_by(|x, y| (&x.node1, &x.node2).cmp(&(&y.node1, &y.node2)));
        edges
    }

    pub fn directed_edge_count(&self) -> usize {
        self.edges().iter().filter(|e| e.is_directed()).count()
    }

    pub fn undirected_edge_count(&self) -> usize {
        self.edges().iter().filter(|e| e.is_undirected()).count()
    }

    /// Same nodes, every edge replaced by `---`.
    pub fn skeleton(&self) -> Self {
        let mut skeleton = self.clone();
        for (a, b) in self.adjacent_pairs() {
            let _ = skeleton.make_undirected(a, b);
        }
        skeleton
    }

    /// The directed edges alone, as a petgraph `DiGraph` indexed like this graph's node order.
    pub fn directed_subgraph(&self) -> DiGraph<NodeId, ()> {
        let mut di = DiGraph::new();
        let mut map = HashMap::new();
        for id in self.node_ids() {
            map.insert(id, di.add_node(id));
        }
        for (a, b) in self.adjacent_pairs() {
            let (from, to) = if self.is_directed_from_to(a, b) {
                (a, b)
            } else if self.is_directed_from_to(b, a) {
                (b, a)
            } else {
                continue;
            };
            di.add_edge(map[&from], map[&to], ());
        }
        di
    }
}

impl PartialEq for Graph {
    /// Equal when the node names and every edge with its marks agree.
    fn eq(&self, other: &Self) -> bool {
        let mut ours: Vec<&str> = self.nodes().map(|n| n.name.as_str()).collect();
        let mut theirs: Vec<&str> = other.nodes().map(|n| n.name.as_str()).collect();
        ours.sort_unstable();
        theirs.sort_unstable();
        ours == theirs && self.edges() == other.edges()
    }
}

impl std::fmt::Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.nodes().map(|n| n.name.as_str()).collect();
        writeln!(f, "Graph Nodes:")?;
        writeln!(f, "{}", names.join(";"))?;
        writeln!(f)?;
        writeln!(f, "Graph Edges:")?;
        for (i, edge) in self.edges().iter().enumerate() {
            writeln!(f, "{}. {}", i + 1, edge)?;
        }
        Ok(())
    }
}
