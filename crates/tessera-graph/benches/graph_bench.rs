use criterion::{criterion_group, criterion_main, Criterion};

use tessera_core::models::Node;
use tessera_graph::{directed_paths_from_to, is_d_separated, would_create_cycle, Graph, NodeId};

/// Build a DAG with ~1K edges: 200 nodes, up to 5 forward edges per node.
fn build_1k_edge_dag() -> (Graph, Vec<NodeId>) {
    let n = 200;
    let mut graph = Graph::with_nodes((0..n).map(|i| Node::measured(format!("n{i}")))).unwrap();
    let ids: Vec<NodeId> = graph.node_ids().collect();
    let mut count = 0;
    for i in 0..n {
        for j in 1..=5 {
            let target = i + j;
            if target < n {
                graph.add_directed_edge(ids[i], ids[target]).unwrap();
                count += 1;
            }
        }
    }
    assert!(count >= 900, "Should have ~1K edges, got {count}");
    (graph, ids)
}

fn bench_cycle_check(c: &mut Criterion) {
    let (graph, ids) = build_1k_edge_dag();

    c.bench_function("cycle_check_1k_edges", |b| {
        b.iter(|| would_create_cycle(&graph, ids[199], ids[0]));
    });
}

fn bench_d_separation(c: &mut Criterion) {
    let (graph, ids) = build_1k_edge_dag();
    let z: Vec<NodeId> = ids[95..105].to_vec();

    c.bench_function("d_separation_1k_edges", |b| {
        b.iter(|| is_d_separated(&graph, ids[0], ids[199], &z));
    });
}

fn bench_directed_paths(c: &mut Criterion) {
    let (graph, ids) = build_1k_edge_dag();

    c.bench_function("directed_paths_len_4", |b| {
        b.iter(|| directed_paths_from_to(&graph, ids[0], ids[10], 4));
    });
}

criterion_group!(benches, bench_cycle_check, bench_d_separation, bench_directed_paths);
criterion_main!(benches);
