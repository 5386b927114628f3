/// Configuration errors, rejected synchronously at call time.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid depth {depth}: must be -1 (unlimited) or non-negative")]
    InvalidDepth { depth: i32 },

    #[error("invalid significance level {alpha}: must lie in (0, 1)")]
    InvalidAlpha { alpha: f64 },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("failed to parse TOML config: {reason}")]
    Toml { reason: String },

    #[error("test {kind} cannot be built from {source_kind}")]
    SourceMismatch { kind: String, source_kind: String },
}
