//! Bounded path enumeration. Every search is a depth-first walk over simple
//! paths capped at `max_length` edges, so it terminates on cyclic and
//! near-complete graphs alike.

mod directed;
mod semidirected;
mod treks;

pub use directed::directed_paths_from_to;
pub use semidirected::semidirected_paths_from_to;
pub use treks::treks_from_to;

use tessera_core::config::PathConfig;
use tessera_core::constants::MAX_PATH_LENGTH;

use crate::marked_graph::{Graph, NodeId};

/// The three enumerations with one configured length bound.
#[derive(Debug, Clone, Copy)]
pub struct PathEnumerator {
    max_length: usize,
}

impl PathEnumerator {
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length: max_length.min(MAX_PATH_LENGTH),
        }
    }

    pub fn from_config(config: &PathConfig) -> Self {
        Self::new(config.max_path_length)
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn directed(&self, graph: &Graph, from: NodeId, to: NodeId) -> Vec<Vec<NodeId>> {
        directed_paths_from_to(graph, from, to, self.max_length)
    }

    pub fn semidirected(&self, graph: &Graph, from: NodeId, to: NodeId) -> Vec<Vec<NodeId>> {
        semidirected_paths_from_to(graph, from, to, self.max_length)
    }

    pub fn treks(&self, graph: &Graph, from: NodeId, to: NodeId) -> Vec<Vec<NodeId>> {
        treks_from_to(graph, from, to, self.max_length)
    }
}

/// Walk simple paths from `from`, extending with `step(graph, current, state)`,
/// and collect every path that ends at `to`.
pub(crate) fn bounded_walk<S, F>(
    graph: &Graph,
    from: NodeId,
    to: NodeId,
    max_length: usize,
    initial: S,
    step: F,
) -> Vec<Vec<NodeId>>
where
    S: Copy,
    F: Fn(&Graph, NodeId, S) -> Vec<(NodeId, S)>,
{
    let max_length = max_length.min(MAX_PATH_LENGTH);
    let mut found = Vec::new();
    if from == to || max_length == 0 || !graph.contains(from) || !graph.contains(to) {
        return found;
    }

    let mut path = vec![from];
    let mut stack: Vec<std::vec::IntoIter<(NodeId, S)>> =
        vec![step(graph, from, initial).into_iter()];

    while let Some(frontier) = stack.last_mut() {
        let Some((next, state)) = frontier.next() else {
            stack.pop();
            path.pop();
            continue;
        };
        if path.contains(&next) {
            continue;
        }
        if next == to {
            let mut complete = path.clone();
            complete.push(next);
            found.push(complete);
            continue;
        }
        // Path currently has `path.len() - 1` edges; extending adds one more.
        if path.len() < max_length {
            path.push(next);
            stack.push(step(graph, next, state).into_iter());
        }
    }
    found
}

/// Render a path as `A --> B --> C` style text using the graph's marks.
pub fn path_to_string(graph: &Graph, path: &[NodeId]) -> String {
    let mut out = String::new();
    for (i, &node) in path.iter().enumerate() {
        if i > 0 {
            let prev = path[i - 1];
            match graph.marks(prev, node) {
                Some((at_prev, at_node)) => {
                    out.push(' ');
                    out.push(at_prev.left_glyph());
                    out.push('-');
                    out.push(at_node.right_glyph());
                    out.push(' ');
                }
                None => out.push_str(" ... "),
            }
        }
        out.push_str(graph.name(node));
    }
    out
}
