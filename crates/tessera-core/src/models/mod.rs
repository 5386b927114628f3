//! Variable, endpoint, edge, sepset, and data models shared by every crate.

pub mod dataset;
pub mod edge;
pub mod endpoint;
pub mod node;
pub mod sepset;

pub use dataset::{Column, DataSet};
pub use edge::Edge;
pub use endpoint::Endpoint;
pub use node::{Node, NodeType};
pub use sepset::SepsetMap;
