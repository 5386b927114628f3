use tessera_core::models::Endpoint;

use crate::marked_graph::{Graph, NodeId};

use super::bounded_walk;

/// All simple paths from `from` to `to` on which no edge has an arrowhead
/// pointing back toward `from`, with at most `max_length` edges.
pub fn semidirected_paths_from_to(
    graph: &Graph,
    from: NodeId,
    to: NodeId,
    max_length: usize,
) -> Vec<Vec<NodeId>> {
    bounded_walk(graph, from, to, max_length, (), |g, current, ()| {
        g.adjacent_nodes(current)
            .into_iter()
            .filter(|&next| {
                g.marks(current, next)
                    .is_some_and(|(at_current, _)| at_current != Endpoint::Arrow)
            })
            .map(|next| (next, ()))
            .collect()
    })
}
