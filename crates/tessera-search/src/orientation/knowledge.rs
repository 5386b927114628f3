//! Background knowledge applied directly to a graph.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use tessera_core::errors::TesseraResult;
use tessera_core::Knowledge;
use tessera_graph::{would_create_cycle, Graph, NodeId};

/// What [`apply_background_knowledge`] changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeStats {
    /// Required edges that were missing and got added.
    pub added_required: usize,
    /// Edges oriented to match a required edge, including reversals.
    pub oriented_required: usize,
    /// Existing orientations reversed by a required edge.
    pub overridden: usize,
    /// Undirected edges oriented away from a forbidden direction.
    pub oriented_forbidden: usize,
    /// Forbidden-direction orientations skipped because they would close a cycle.
    pub skipped_by_cycle: usize,
}

/// Whether knowledge allows the orientation `from --> to`.
pub fn is_arrowhead_allowed(graph: &Graph, from: NodeId, to: NodeId, knowledge: &Knowledge) -> bool {
    let (from, to) = (graph.name(from), graph.name(to));
    !knowledge.is_forbidden(from, to) && !knowledge.is_required(to, from)
}

/// Make the graph agree with `knowledge`.
///
/// Every required edge between nodes of the graph ends up as exactly that
/// directed edge, added if missing and reversed if oriented the other way.
/// An undirected edge forbidden in one direction only is oriented the
/// other way, unless `prevent_cycles` is set and that would close a cycle.
/// Knowledge about variables outside the graph is ignored.
pub fn apply_background_knowledge(
    graph: &mut Graph,
    knowledge: &Knowledge,
    prevent_cycles: bool,
) -> TesseraResult<KnowledgeStats> {
    let mut stats = KnowledgeStats::default();
    if knowledge.is_empty() {
        return Ok(stats);
    }

    for (from_name, to_name) in knowledge.required_edges() {
        let (Some(from), Some(to)) = (graph.node_id(from_name), graph.node_id(to_name)) else {
            continue;
        };
        if !graph.is_adjacent(from, to) {
            debug!(from = from_name, to = to_name, "adding required edge");
            graph.add_directed_edge(from, to)?;
            stats.added_required += 1;
            continue;
        }
        if graph.is_directed_from_to(from, to) {
            continue;
        }
        if graph.is_directed_from_to(to, from) {
            warn!(from = from_name, to = to_name, "required edge overrides opposite orientation");
            stats.overridden += 1;
        }
        graph.orient(from, to)?;
        stats.oriented_required += 1;
    }

    for (a, b) in graph.adjacent_pairs() {
        if !graph.is_undirected(a, b) {
            continue;
        }
        let forward = knowledge.is_forbidden(graph.name(a), graph.name(b));
        let backward = knowledge.is_forbidden(graph.name(b), graph.name(a));
        let (from, to) = match (forward, backward) {
            (true, false) => (b, a),
            (false, true) => (a, b),
            _ => continue,
        };
        if prevent_cycles && would_create_cycle(graph, from, to) {
            stats.skipped_by_cycle += 1;
            continue;
        }
        debug!(from = %graph.name(from), to = %graph.name(to), "oriented by forbidden direction");
        graph.orient(from, to)?;
        stats.oriented_forbidden += 1;
    }

    Ok(stats)
}
