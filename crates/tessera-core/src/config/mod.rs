//! Search configuration. Passed explicitly into every search call; there
//! is no ambient global state.

pub mod defaults;
mod fas_config;
mod independence_config;
mod observability_config;
mod orientation_config;
mod path_config;

use serde::{Deserialize, Serialize};

pub use fas_config::{FasConfig, KnowledgePolicy};
pub use independence_config::{IndependenceConfig, TestKind};
pub use observability_config::ObservabilityConfig;
pub use orientation_config::OrientationConfig;
pub use path_config::PathConfig;

use crate::errors::{ConfigError, TesseraResult};

/// Top-level configuration, loadable from TOML. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TesseraConfig {
    pub fas: FasConfig,
    pub orientation: OrientationConfig,
    pub independence: IndependenceConfig,
    pub paths: PathConfig,
    pub observability: ObservabilityConfig,
}

impl TesseraConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml(toml_str: &str) -> TesseraResult<Self> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::Toml {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.fas.validate()?;
        self.independence.validate()?;
        self.paths.validate()?;
        Ok(())
    }
}
