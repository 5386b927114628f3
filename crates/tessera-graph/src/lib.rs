//! # tessera-graph
//!
//! The graph every search stage reads and mutates: a `petgraph`
//! `StableGraph` whose edges carry one endpoint mark per side, indexed by
//! node name. Also hosts the graph-only algorithms: cycle checks, the
//! legal-DAG test, d-separation, and bounded path enumeration.

pub mod dag_enforcement;
pub mod marked_graph;
pub mod paths;
pub mod separation;
pub mod snapshot;

pub use dag_enforcement::{exists_directed_path, is_legal_dag, would_create_cycle};
pub use marked_graph::{EdgeMarks, Graph, NodeId};
pub use paths::{
    directed_paths_from_to, semidirected_paths_from_to, treks_from_to, PathEnumerator,
};
pub use separation::is_d_separated;
pub use snapshot::GraphSnapshot;
