//! d-separation over the directed edges of a graph, by the reachability
//! ("Bayes ball") procedure: one pass collects the ancestors of the
//! conditioning set, a second walks active trails from `x`.

use std::collections::{HashSet, VecDeque};

use crate::marked_graph::{Graph, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Travel {
    /// Arrived from a child, moving against edge direction.
    Up,
    /// Arrived from a parent, moving along edge direction.
    Down,
}

/// Whether `x` and `y` are d-separated given `z` in the DAG `graph`.
pub fn is_d_separated(graph: &Graph, x: NodeId, y: NodeId, z: &[NodeId]) -> bool {
    if x == y {
        return false;
    }
    let conditioned: HashSet<NodeId> = z.iter().copied().collect();
    if conditioned.contains(&x) || conditioned.contains(&y) {
        return true;
    }
    !reachable_from(graph, x, &conditioned).contains(&y)
}

/// Nodes connected to `x` by an active trail given `conditioned`.
fn reachable_from(graph: &Graph, x: NodeId, conditioned: &HashSet<NodeId>) -> HashSet<NodeId> {
    let ancestors_of_z = ancestors_of(graph, conditioned);

    let mut reachable = HashSet::new();
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back((x, Travel::Up));

    while let Some((node, travel)) = queue.pop_front() {
        if !visited.insert((node, travel)) {
            continue;
        }
        let observed = conditioned.contains(&node);
        if !observed {
            reachable.insert(node);
        }
        match travel {
            Travel::Up if !observed => {
                for p in graph.parents(node) {
                    queue.push_back((p, Travel::Up));
                }
                for c in graph.children(node) {
                    queue.push_back((c, Travel::Down));
                }
            }
            Travel::Up => {}
            Travel::Down => {
                if !observed {
                    for c in graph.children(node) {
                        queue.push_back((c, Travel::Down));
                    }
                }
                // A collider opens when it or one of its descendants is observed.
                if ancestors_of_z.contains(&node) {
                    for p in graph.parents(node) {
                        queue.push_back((p, Travel::Up));
                    }
                }
            }
        }
    }
    reachable
}

/// `nodes` together with all their ancestors.
fn ancestors_of(graph: &Graph, nodes: &HashSet<NodeId>) -> HashSet<NodeId> {
    let mut ancestors = nodes.clone();
    let mut queue: VecDeque<NodeId> = nodes.iter().copied().collect();
    while let Some(node) = queue.pop_front() {
        for p in graph.parents(node) {
            if ancestors.insert(p) {
                queue.push_back(p);
            }
        }
    }
    ancestors
}
