use crate::marked_graph::{Graph, NodeId};

use super::bounded_walk;

/// All simple paths `from --> ... --> to` with at most `max_length` edges.
pub fn directed_paths_from_to(
    graph: &Graph,
    from: NodeId,
    to: NodeId,
    max_length: usize,
) -> Vec<Vec<NodeId>> {
    bounded_walk(graph, from, to, max_length, (), |g, current, ()| {
        g.children(current).into_iter().map(|c| (c, ())).collect()
    })
}
