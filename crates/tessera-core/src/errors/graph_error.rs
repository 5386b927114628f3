/// Graph construction and mutation errors.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("node not found: {name}")]
    NodeNotFound { name: String },

    #[error("duplicate node: {name}")]
    DuplicateNode { name: String },

    #[error("nodes {node1} and {node2} are already adjacent")]
    DuplicateEdge { node1: String, node2: String },

    #[error("no edge between {node1} and {node2}")]
    EdgeNotFound { node1: String, node2: String },

    #[error("self loop on {name}")]
    SelfLoop { name: String },

    #[error("cannot parse edge specification: {spec}")]
    InvalidEdgeSpec { spec: String },

    #[error("graph is not a DAG: {reason}")]
    NotADag { reason: String },
}
