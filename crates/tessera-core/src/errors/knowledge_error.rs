/// Background knowledge errors. Raised at the point of insertion.
#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    #[error("{from} --> {to} would be both required and forbidden: {reason}")]
    Conflict {
        from: String,
        to: String,
        reason: String,
    },

    #[error("edges {a} --> {b} and {b} --> {a} cannot both be required")]
    RequiredBothWays { a: String, b: String },

    #[error("knowledge cannot mention a self edge on {name}")]
    SelfEdge { name: String },
}
