use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::MAX_PATH_LENGTH;
use crate::errors::ConfigError;

/// Bounds for path and trek enumeration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Longest path, in edges, that enumeration will return.
    pub max_path_length: usize,
}

impl PathConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_path_length == 0 || self.max_path_length > MAX_PATH_LENGTH {
            return Err(ConfigError::InvalidValue {
                field: "paths.max_path_length".to_string(),
                reason: format!("must lie in 1..={MAX_PATH_LENGTH}"),
            });
        }
        Ok(())
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            max_path_length: defaults::DEFAULT_MAX_PATH_LENGTH,
        }
    }
}
