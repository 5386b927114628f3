//! Unshielded-collider orientation from the sepset record.

use serde::{Deserialize, Serialize};
use tracing::debug;

use tessera_core::errors::TesseraResult;
use tessera_core::models::{Endpoint, SepsetMap};
use tessera_core::Knowledge;
use tessera_graph::{would_create_cycle, Graph, NodeId};

use super::knowledge::is_arrowhead_allowed;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColliderStats {
    /// Colliders `X --> Y <-- Z` oriented.
    pub oriented: usize,
    pub skipped_by_knowledge: usize,
    pub skipped_by_cycle: usize,
    /// Triples skipped because a leg already points away from the middle node.
    pub skipped_by_conflict: usize,
}

/// Orient `X --> Y <-- Z` for every unshielded triple `X *-* Y *-* Z`
/// (`X` before `Z` in node order) whose recorded sepset of `X` and `Z`
/// does not contain `Y`.
///
/// Triples without a recorded sepset are left alone. A collider is only
/// oriented when knowledge allows both arrowheads and, with
/// `prevent_cycles`, neither leg closes a directed cycle.
pub fn orient_colliders(
    graph: &mut Graph,
    sepsets: &SepsetMap,
    knowledge: &Knowledge,
    prevent_cycles: bool,
) -> TesseraResult<ColliderStats> {
    let mut stats = ColliderStats::default();
    let middles: Vec<NodeId> = graph.node_ids().collect();

    for y in middles {
        let adjacent = graph.adjacent_nodes(y);
        for (i, &x) in adjacent.iter().enumerate() {
            for &z in &adjacent[i + 1..] {
                if graph.is_adjacent(x, z) {
                    continue;
                }
                if sepsets.separates_with(graph.name(x), graph.name(z), graph.name(y)) != Some(false) {
                    continue;
                }
                if graph.is_def_collider(x, y, z) {
                    continue;
                }
                if points_away(graph, y, x) || points_away(graph, y, z) {
                    stats.skipped_by_conflict += 1;
                    continue;
                }
                if !is_arrowhead_allowed(graph, x, y, knowledge)
                    || !is_arrowhead_allowed(graph, z, y, knowledge)
                {
                    stats.skipped_by_knowledge += 1;
                    continue;
                }
                if prevent_cycles && (creates_cycle(graph, x, y) || creates_cycle(graph, z, y)) {
                    stats.skipped_by_cycle += 1;
                    continue;
                }
                debug!(
                    x = %graph.name(x),
                    y = %graph.name(y),
                    z = %graph.name(z),
                    "oriented collider"
                );
                graph.orient(x, y)?;
                graph.orient(z, y)?;
                stats.oriented += 1;
            }
        }
    }
    Ok(stats)
}

/// The edge already carries an arrowhead at `leg`.
fn points_away(graph: &Graph, middle: NodeId, leg: NodeId) -> bool {
    graph.endpoint(middle, leg) == Some(Endpoint::Arrow)
}

/// Orienting `from --> to` closes a cycle, unless it is already that edge.
fn creates_cycle(graph: &Graph, from: NodeId, to: NodeId) -> bool {
    !graph.is_directed_from_to(from, to) && would_create_cycle(graph, from, to)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sepset(a: &str, b: &str, set: &[&str]) -> SepsetMap {
        let mut map = SepsetMap::new();
        map.set(a, b, set.iter().map(|s| s.to_string()).collect());
        map
    }

    #[test]
    fn empty_sepset_makes_collider() {
        let mut g = Graph::from_specs(&["A", "B", "C"], &["A --- B", "B --- C"]).unwrap();
        let stats =
            orient_colliders(&mut g, &sepset("A", "C", &[]), &Knowledge::new(), true).unwrap();
        assert_eq!(stats.oriented, 1);
        assert_eq!(
            g,
            Graph::from_specs(&["A", "B", "C"], &["A --> B", "C --> B"]).unwrap()
        );
    }

    #[test]
    fn middle_in_sepset_is_not_collider() {
        let mut g = Graph::from_specs(&["A", "B", "C"], &["A --- B", "B --- C"]).unwrap();
        orient_colliders(&mut g, &sepset("A", "C", &["B"]), &Knowledge::new(), true).unwrap();
        assert_eq!(g.undirected_edge_count(), 2);
    }

    #[test]
    fn missing_sepset_leaves_triple() {
        let mut g = Graph::from_specs(&["A", "B", "C"], &["A --- B", "B --- C"]).unwrap();
        orient_colliders(&mut g, &SepsetMap::new(), &Knowledge::new(), true).unwrap();
        assert_eq!(g.undirected_edge_count(), 2);
    }

    #[test]
    fn forbidden_arrowhead_blocks_collider() {
        let mut g = Graph::from_specs(&["A", "B", "C"], &["A --- B", "B --- C"]).unwrap();
        let mut k = Knowledge::new();
        k.set_forbidden("A", "B").unwrap();
        let stats = orient_colliders(&mut g, &sepset("A", "C", &[]), &k, true).unwrap();
        assert_eq!(stats.skipped_by_knowledge, 1);
        assert_eq!(g.undirected_edge_count(), 2);
    }

    #[test]
    fn collider_closing_a_cycle_is_skipped() {
        // B --> D --> A already exists, so A --> B would close a cycle.
        let mut g = Graph::from_specs(
            &["A", "B", "C", "D"],
            &["A --- B", "B --- C", "B --> D", "D --> A"],
        )
        .unwrap();
        let stats = orient_colliders(&mut g, &sepset("A", "C", &[]), &Knowledge::new(), true).unwrap();
        assert_eq!(stats.skipped_by_cycle, 1);
        assert_eq!(stats.oriented, 0);
        assert_eq!(g.undirected_edge_count(), 2);
    }

    #[test]
    fn leg_pointing_away_is_a_conflict() {
        let mut g = Graph::from_specs(&["A", "B", "C"], &["B --> A", "B --- C"]).unwrap();
        let stats = orient_colliders(&mut g, &sepset("A", "C", &[]), &Knowledge::new(), true).unwrap();
        assert_eq!(stats.skipped_by_conflict, 1);
        assert_eq!(stats.oriented, 0);
        let b = g.node_id("B").unwrap();
        let c = g.node_id("C").unwrap();
        assert!(g.is_undirected(b, c));
    }
}
