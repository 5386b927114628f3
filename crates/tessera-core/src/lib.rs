//! # tessera-core
//!
//! Foundation crate for Tessera causal structure search.
//! Defines the variable and edge model, background knowledge, the
//! independence-test contract, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod knowledge;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::TesseraConfig;
pub use errors::{TesseraError, TesseraResult};
pub use knowledge::Knowledge;
pub use models::{DataSet, Edge, Endpoint, Node, NodeType, SepsetMap};
pub use traits::{Cancellable, CancellationToken, IndependenceResult, IndependenceTest};
