use crate::marked_graph::{Graph, NodeId};

use super::bounded_walk;

/// All treks between `from` and `to`: simple paths `from <-- ... <-- S --> ... --> to`
/// where either leg may be empty. At most `max_length` edges.
pub fn treks_from_to(
    graph: &Graph,
    from: NodeId,
    to: NodeId,
    max_length: usize,
) -> Vec<Vec<NodeId>> {
    // State: `true` while still climbing toward the source.
    bounded_walk(graph, from, to, max_length, true, |g, current, climbing| {
        let mut next: Vec<(NodeId, bool)> = Vec::new();
        if climbing {
            next.extend(g.parents(current).into_iter().map(|p| (p, true)));
        }
        next.extend(g.children(current).into_iter().map(|c| (c, false)));
        next
    })
}
