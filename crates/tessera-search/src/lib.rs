//! # tessera-search
//!
//! Constraint-based causal structure search over an independence test.
//!
//! - [`fas`]: adjacency search producing the skeleton and sepsets
//! - [`orientation`]: background knowledge, colliders, Meek rules R1 to R4
//! - [`independence`]: the d-separation oracle, Fisher Z, and the registry
//! - [`pc`]: the full pipeline
//! - [`transforms`]: DAG to CPDAG and back

pub mod fas;
pub mod independence;
pub mod observability;
pub mod orientation;
pub mod pc;
pub mod transforms;

pub use fas::{Fas, FasOutcome, FasStats};
pub use independence::{build_test, FisherZTest, MSeparationTest, TestSource};
pub use observability::init_tracing;
pub use orientation::{
    apply_background_knowledge, meek_orient, orient_colliders, MeekRules, MeekStats, Rule,
};
pub use pc::{PcSearch, SearchOutcome, SearchStats};
pub use transforms::{cpdag_to_dag, dag_to_cpdag};
