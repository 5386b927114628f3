//! Directed-cycle checks over the directed part of a mixed graph.
//! Orientation consults these before committing any new arrowhead.

use std::collections::{HashSet, VecDeque};

use petgraph::algo::{is_cyclic_directed, tarjan_scc, toposort};

use tessera_core::errors::GraphError;

use crate::marked_graph::{Graph, NodeId};

/// Check whether orienting `from --> to` would close a directed cycle.
///
/// Returns `true` if a cycle would be created (orientation should be skipped).
pub fn would_create_cycle(graph: &Graph, from: NodeId, to: NodeId) -> bool {
    // Self-loops are always cycles.
    if from == to {
        return true;
    }
    exists_directed_path(graph, to, from)
}

/// BFS over `-->` edges: can we reach `target` from `source`?
pub fn exists_directed_path(graph: &Graph, source: NodeId, target: NodeId) -> bool {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    visited.insert(source);
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        for child in graph.children(current) {
            if child == target {
                return true;
            }
            if visited.insert(child) {
                queue.push_back(child);
            }
        }
    }
    false
}

/// Every edge is `-->` and the directed edges form no cycle.
pub fn is_legal_dag(graph: &Graph) -> bool {
    graph.edges().iter().all(|e| e.is_directed()) && !is_cyclic_directed(&graph.directed_subgraph())
}

/// Groups of nodes lying on a common directed cycle (strongly connected
/// components with more than one node).
pub fn find_cycles(graph: &Graph) -> Vec<Vec<NodeId>> {
    let di = graph.directed_subgraph();
    tarjan_scc(&di)
        .into_iter()
        .filter(|scc| scc.len() > 1)
        .map(|scc| scc.into_iter().map(|ix| di[ix]).collect())
        .collect()
}

/// Nodes ordered so every directed edge points forward. Fails on a directed cycle.
pub fn topological_order(graph: &Graph) -> Result<Vec<NodeId>, GraphError> {
    let di = graph.directed_subgraph();
    toposort(&di, None)
        .map(|order| order.into_iter().map(|ix| di[ix]).collect())
        .map_err(|cycle| GraphError::NotADag {
            reason: format!("directed cycle through {}", graph.name(di[cycle.node_id()])),
        })
}
