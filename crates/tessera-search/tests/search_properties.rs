//! Property tests for tessera-search: adjacency search, orientation, transforms.

use proptest::prelude::*;

use tessera_core::config::{FasConfig, OrientationConfig};
use tessera_core::models::{Node, SepsetMap};
use tessera_core::{CancellationToken, Knowledge, TesseraConfig};
use tessera_graph::dag_enforcement::find_cycles;
use tessera_graph::{is_legal_dag, would_create_cycle, Graph, NodeId};
use tessera_search::{
    cpdag_to_dag, dag_to_cpdag, orient_colliders, Fas, MSeparationTest, MeekRules, PcSearch,
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

fn oracle(dag: &Graph) -> MSeparationTest {
    MSeparationTest::new(dag.clone(), 0.05).unwrap()
}

fn fas_with(depth: i32, parallel: bool) -> Fas {
    Fas::new(FasConfig {
        depth,
        parallel,
        ..FasConfig::default()
    })
}

// =============================================================================
// Deeper searches only remove more edges
// =============================================================================
proptest! {
    #[test]
    fn fas_monotone_in_depth(edges in edge_strategy(8), depth in 0_i32..4) {
        let dag = build_random_dag(8, &edges);
        let test = oracle(&dag);
        let never = CancellationToken::new();
        let shallow = fas_with(depth, false).search(&test, &Knowledge::new(), &never).unwrap();
        let deep = fas_with(depth + 1, false).search(&test, &Knowledge::new(), &never).unwrap();
        for (a, b) in deep.graph.adjacent_pairs() {
            let (na, nb) = (deep.graph.name(a), deep.graph.name(b));
            let sa = shallow.graph.node_id(na).unwrap();
            let sb = shallow.graph.node_id(nb).unwrap();
            prop_assert!(shallow.graph.is_adjacent(sa, sb), "{na} - {nb} appeared at depth {}", depth + 1);
        }
    }
}

// =============================================================================
// Parallel levels reproduce the sequential result exactly
// =============================================================================
proptest! {
    #[test]
    fn parallel_equals_sequential(edges in edge_strategy(9)) {
        let dag = build_random_dag(9, &edges);
        let test = oracle(&dag);
        let never = CancellationToken::new();
        let seq = fas_with(-1, false).search(&test, &Knowledge::new(), &never).unwrap();
        let par = fas_with(-1, true).search(&test, &Knowledge::new(), &never).unwrap();
        prop_assert_eq!(&seq.graph, &par.graph);
        prop_assert_eq!(&seq.sepsets, &par.sepsets);
        prop_assert_eq!(&seq.stats, &par.stats);
    }
}

// =============================================================================
// With the oracle, PC recovers the skeleton and the CPDAG of the true DAG
// =============================================================================
proptest! {
    #[test]
    fn oracle_pc_recovers_cpdag(edges in edge_strategy(8)) {
        let dag = build_random_dag(8, &edges);
        let outcome = PcSearch::new(TesseraConfig::default())
            .search(&oracle(&dag), &Knowledge::new(), &CancellationToken::new())
            .unwrap();
        prop_assert!(outcome.completed);
        prop_assert_eq!(&outcome.graph.skeleton(), &dag.skeleton());
        prop_assert_eq!(&outcome.graph, &dag_to_cpdag(&dag).unwrap());
    }
}

// =============================================================================
// Meek never closes a cycle, and a second run changes nothing
// =============================================================================
proptest! {
    #[test]
    fn meek_acyclic_and_idempotent(
        skeleton in edge_strategy(9),
        r4 in any::<bool>()
    ) {
        let mut graph = Graph::with_nodes((0..9).map(|i| Node::measured(format!("n{i}")))).unwrap();
        let ids: Vec<NodeId> = graph.node_ids().collect();
        for &(a, b) in &skeleton {
            if a != b && !graph.is_adjacent(ids[a], ids[b]) {
                graph.add_undirected_edge(ids[a], ids[b]).unwrap();
            }
        }
        // Every non-adjacent pair separated by the empty set: colliders everywhere allowed.
        let mut sepsets = SepsetMap::new();
        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i + 1..] {
                if !graph.is_adjacent(a, b) {
                    sepsets.set(graph.name(a), graph.name(b), Vec::new());
                }
            }
        }

        let knowledge = Knowledge::new();
        let config = OrientationConfig { prevent_cycles: true, always_apply_r4: r4 };
        orient_colliders(&mut graph, &sepsets, &knowledge, true).unwrap();
        let rules = MeekRules::new(&knowledge, &config);
        rules.orient(&mut graph, &CancellationToken::new()).unwrap();
        prop_assert!(find_cycles(&graph).is_empty());

        let once = graph.clone();
        let again = rules.orient(&mut graph, &CancellationToken::new()).unwrap();
        prop_assert_eq!(again.total_oriented(), 0);
        prop_assert_eq!(&graph, &once);
    }
}

// =============================================================================
// Output never contradicts background knowledge, under either policy
// =============================================================================
proptest! {
    #[test]
    fn knowledge_is_respected(
        edges in edge_strategy(7),
        required in prop::collection::vec((0_usize..7, 0_usize..7), 0..3),
        forbidden in prop::collection::vec((0_usize..7, 0_usize..7), 0..5),
        skeleton_policy in any::<bool>()
    ) {
        let dag = build_random_dag(7, &edges);
        let name = |i: usize| format!("n{i}");
        let mut knowledge = Knowledge::new();
        for &(a, b) in &required {
            let _ = knowledge.set_required(&name(a), &name(b));
        }
        for &(a, b) in &forbidden {
            let _ = knowledge.set_forbidden(&name(a), &name(b));
        }

        let mut config = TesseraConfig::default();
        if skeleton_policy {
            config.fas.knowledge_policy = tessera_core::config::KnowledgePolicy::SkeletonAndOrientation;
        }
        let outcome = PcSearch::new(config)
            .search(&oracle(&dag), &knowledge, &CancellationToken::new())
            .unwrap();
        let g = &outcome.graph;

        for (from, to) in knowledge.required_edges() {
            let (a, b) = (g.node_id(from).unwrap(), g.node_id(to).unwrap());
            prop_assert!(g.is_directed_from_to(a, b), "required {from} --> {to} missing");
        }
        for edge in g.edges() {
            if let Some((from, to)) = edge.direction() {
                prop_assert!(!knowledge.is_forbidden(from, to), "forbidden {from} --> {to} present");
            }
        }
    }
}

// =============================================================================
// DAG -> CPDAG -> DAG stays in the equivalence class
// =============================================================================
proptest! {
    #[test]
    fn cpdag_round_trip(edges in edge_strategy(10)) {
        let dag = build_random_dag(10, &edges);
        let cpdag = dag_to_cpdag(&dag).unwrap();
        let extension = cpdag_to_dag(&cpdag).unwrap();
        prop_assert!(is_legal_dag(&extension));
        prop_assert_eq!(&extension.skeleton(), &dag.skeleton());
        prop_assert_eq!(&dag_to_cpdag(&extension).unwrap(), &cpdag);
    }
}
