//! Conversions between a DAG and its Markov equivalence class.

use tracing::debug;

use tessera_core::config::OrientationConfig;
use tessera_core::errors::{GraphError, TesseraResult};
use tessera_core::{CancellationToken, Knowledge};
use tessera_graph::{is_legal_dag, would_create_cycle, Graph, NodeId};

use crate::orientation::MeekRules;

fn cycle_safe_config() -> OrientationConfig {
    OrientationConfig {
        prevent_cycles: true,
        always_apply_r4: false,
    }
}

/// The CPDAG of `dag`: its skeleton with the unshielded colliders kept and
/// everything Meek's rules then force.
pub fn dag_to_cpdag(dag: &Graph) -> TesseraResult<Graph> {
    if !is_legal_dag(dag) {
        return Err(GraphError::NotADag {
            reason: "input has an undirected edge or a directed cycle".to_string(),
        }
        .into());
    }

    let mut cpdag = dag.skeleton();
    for b in dag.node_ids() {
        let parents = dag.parents(b);
        for (i, &a) in parents.iter().enumerate() {
            for &c in &parents[i + 1..] {
                if !dag.is_adjacent(a, c) {
                    cpdag.orient(a, b)?;
                    cpdag.orient(c, b)?;
                }
            }
        }
    }

    let knowledge = Knowledge::new();
    MeekRules::new(&knowledge, &cycle_safe_config()).orient(&mut cpdag, &CancellationToken::new())?;
    Ok(cpdag)
}

/// A consistent extension of `cpdag`: a DAG in the same equivalence class.
///
/// Orients the first remaining undirected edge in whichever direction
/// keeps the graph acyclic, propagates with Meek's rules, and repeats.
/// Fails on edges that are neither directed nor undirected, or if the
/// input admits no extension.
pub fn cpdag_to_dag(cpdag: &Graph) -> TesseraResult<Graph> {
    if let Some(edge) = cpdag
        .edges()
        .into_iter()
        .find(|e| !e.is_directed() && !e.is_undirected())
    {
        return Err(GraphError::NotADag {
            reason: format!("edge {edge} is not a CPDAG edge"),
        }
        .into());
    }

    let knowledge = Knowledge::new();
    let rules = MeekRules::new(&knowledge, &cycle_safe_config());
    let never = CancellationToken::new();
    let mut dag = cpdag.clone();

    while let Some((a, b)) = first_undirected(&dag) {
        let (from, to) = if would_create_cycle(&dag, a, b) { (b, a) } else { (a, b) };
        debug!(from = %dag.name(from), to = %dag.name(to), "extension choice");
        dag.orient(from, to)?;
        rules.orient(&mut dag, &never)?;
    }

    if !is_legal_dag(&dag) {
        return Err(GraphError::NotADag {
            reason: "no consistent extension exists".to_string(),
        }
        .into());
    }
    Ok(dag)
}

fn first_undirected(graph: &Graph) -> Option<(NodeId, NodeId)> {
    graph
        .adjacent_pairs()
        .into_iter()
        .find(|&(a, b)| graph.is_undirected(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_becomes_fully_undirected() {
        let dag = Graph::from_specs(&["A", "B", "C"], &["A --> B", "B --> C"]).unwrap();
        let cpdag = dag_to_cpdag(&dag).unwrap();
        assert_eq!(cpdag.undirected_edge_count(), 2);
    }

    #[test]
    fn collider_survives() {
        let dag = Graph::from_specs(&["A", "B", "C"], &["A --> B", "C --> B"]).unwrap();
        assert_eq!(dag_to_cpdag(&dag).unwrap(), dag);
    }

    #[test]
    fn rejects_cyclic_input() {
        let g = Graph::from_specs(&["A", "B", "C"], &["A --> B", "B --> C", "C --> A"]).unwrap();
        assert!(dag_to_cpdag(&g).is_err());
    }

    #[test]
    fn extension_of_undirected_chain_has_no_new_collider() {
        let cpdag = Graph::from_specs(&["A", "B", "C"], &["A --- B", "B --- C"]).unwrap();
        let dag = cpdag_to_dag(&cpdag).unwrap();
        assert!(is_legal_dag(&dag));
        assert_eq!(dag_to_cpdag(&dag).unwrap(), cpdag);
    }

    #[test]
    fn bidirected_edge_is_rejected() {
        let g = Graph::from_specs(&["A", "B"], &["A <-> B"]).unwrap();
        assert!(cpdag_to_dag(&g).is_err());
    }
}
