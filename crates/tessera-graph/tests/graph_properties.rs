//! Property tests for tessera-graph: acyclicity, path bounds, d-separation.

use proptest::prelude::*;

use tessera_core::models::Node;
use tessera_graph::dag_enforcement::{find_cycles, topological_order};
use tessera_graph::{
    directed_paths_from_to, exists_directed_path, is_d_separated, is_legal_dag,
    semidirected_paths_from_to, treks_from_to, would_create_cycle, Graph, NodeId,
};

/// Build a random DAG with `n` nodes, skipping edges that would close a cycle.
fn build_random_dag(n: usize, edges: &[(usize, usize)]) -> Graph {
    let mut graph = Graph::with_nodes((0..n).map(|i| Node::measured(format!("n{i}")))).unwrap();
    let ids: Vec<NodeId> = graph.node_ids().collect();
    for &(src, tgt) in edges {
        if src < n && tgt < n && src != tgt {
            let (a, b) = (ids[src], ids[tgt]);
            if !graph.is_adjacent(a, b) && !would_create_cycle(&graph, a, b) {
                graph.add_directed_edge(a, b).unwrap();
            }
        }
    }
    graph
}

fn edge_strategy(n: usize) -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0..n, 0..n), 0..n * 2)
}

// =============================================================================
// Cycle guard keeps every built graph a legal DAG
// =============================================================================
proptest! {
    #[test]
    fn random_dag_is_legal(edges in edge_strategy(15)) {
        let graph = build_random_dag(15, &edges);
        prop_assert!(is_legal_dag(&graph));
        prop_assert!(find_cycles(&graph).is_empty());
        let order = topological_order(&graph).unwrap();
        prop_assert_eq!(order.len(), 15);
    }
}

// =============================================================================
// Enumerated paths respect the length bound and are simple
// =============================================================================
proptest! {
    #[test]
    fn paths_bounded_and_simple(
        max_length in 1_usize..6,
        edges in edge_strategy(10)
    ) {
        let graph = build_random_dag(10, &edges);
        let ids: Vec<NodeId> = graph.node_ids().collect();
        for &from in &ids {
            for &to in &ids {
                for path in directed_paths_from_to(&graph, from, to, max_length)
                    .into_iter()
                    .chain(semidirected_paths_from_to(&graph, from, to, max_length))
                    .chain(treks_from_to(&graph, from, to, max_length))
                {
                    prop_assert!(path.len() - 1 <= max_length);
                    prop_assert_eq!(path.first(), Some(&from));
                    prop_assert_eq!(path.last(), Some(&to));
                    let mut seen = path.clone();
                    seen.sort_unstable();
                    seen.dedup();
                    prop_assert_eq!(seen.len(), path.len());
                }
            }
        }
    }
}

// =============================================================================
// A directed path exists iff a long enough enumeration finds one
// =============================================================================
proptest! {
    #[test]
    fn directed_path_agrees_with_enumeration(edges in edge_strategy(8)) {
        let graph = build_random_dag(8, &edges);
        let ids: Vec<NodeId> = graph.node_ids().collect();
        for &from in &ids {
            for &to in &ids {
                if from == to {
                    continue;
                }
                let enumerated = !directed_paths_from_to(&graph, from, to, 8).is_empty();
                prop_assert_eq!(exists_directed_path(&graph, from, to), enumerated);
            }
        }
    }
}

// =============================================================================
// Adjacent nodes are never d-separated; parents separate a node from its non-descendants
// =============================================================================
proptest! {
    #[test]
    fn d_separation_local_markov(edges in edge_strategy(10)) {
        let graph = build_random_dag(10, &edges);
        let ids: Vec<NodeId> = graph.node_ids().collect();
        for &x in &ids {
            let parents = graph.parents(x);
            for &y in &ids {
                if x == y {
                    continue;
                }
                if graph.is_adjacent(x, y) {
                    prop_assert!(!is_d_separated(&graph, x, y, &[]));
                    continue;
                }
                if !parents.contains(&y) && !exists_directed_path(&graph, x, y) {
                    prop_assert!(is_d_separated(&graph, x, y, &parents));
                }
            }
        }
    }
}

#[test]
fn snapshot_json_round_trip() {
    let graph = Graph::from_specs(&["A", "B", "C"], &["A --> B", "C o-> B"]).unwrap();
    let json = serde_json::to_string(&graph).unwrap();
    let back: Graph = serde_json::from_str(&json).unwrap();
    assert_eq!(back, graph);
}
