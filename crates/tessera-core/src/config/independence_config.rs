use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// The closed set of independence tests the registry can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    /// d-separation oracle over a known DAG.
    #[default]
    MSeparation,
    /// Gaussian partial-correlation test over continuous data.
    FisherZ,
}

impl TestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MSeparation => "m_separation",
            Self::FisherZ => "fisher_z",
        }
    }
}

impl std::fmt::Display for TestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Independence test selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndependenceConfig {
    pub kind: TestKind,
    /// Significance level; a pair is judged independent when `p >= alpha`.
    pub alpha: f64,
}

impl IndependenceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(ConfigError::InvalidAlpha { alpha: self.alpha });
        }
        Ok(())
    }
}

impl Default for IndependenceConfig {
    fn default() -> Self {
        Self {
            kind: TestKind::default(),
            alpha: defaults::DEFAULT_ALPHA,
        }
    }
}
