/// Independence test errors.
///
/// Numerical failures during a search are counted and the edge is kept;
/// construction failures (wrong data type, unknown variable) are fatal.
#[derive(Debug, thiserror::Error)]
pub enum IndependenceError {
    #[error("singular covariance submatrix testing {x} _||_ {y} given {conditioning_size} variables")]
    SingularMatrix {
        x: String,
        y: String,
        conditioning_size: usize,
    },

    #[error("insufficient samples: needed {needed}, available {available}")]
    InsufficientSamples { needed: usize, available: usize },

    #[error("unknown variable: {name}")]
    UnknownVariable { name: String },

    #[error("variable {name} is not continuous")]
    NonContinuous { name: String },

    #[error("reference distribution unavailable: {reason}")]
    Distribution { reason: String },

    #[error("malformed data set: {reason}")]
    MalformedData { reason: String },
}
