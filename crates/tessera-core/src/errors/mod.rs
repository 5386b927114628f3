//! Error types for every Tessera subsystem, unified under [`TesseraError`].

mod config_error;
mod graph_error;
mod independence_error;
mod knowledge_error;

pub use config_error::ConfigError;
pub use graph_error::GraphError;
pub use independence_error::IndependenceError;
pub use knowledge_error::KnowledgeError;

/// Top-level error for all Tessera operations.
#[derive(Debug, thiserror::Error)]
pub enum TesseraError {
    #[error("graph error: {0}")]
    GraphError(#[from] GraphError),

    #[error("knowledge error: {0}")]
    KnowledgeError(#[from] KnowledgeError),

    #[error("independence test error: {0}")]
    IndependenceError(#[from] IndependenceError),

    #[error("configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Convenience alias used across the workspace.
pub type TesseraResult<T> = Result<T, TesseraError>;
