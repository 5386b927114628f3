use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// When background knowledge takes effect relative to adjacency search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum KnowledgePolicy {
    /// Adjacency search ignores knowledge; it is applied during orientation.
    #[default]
    OrientationOnly,
    /// Adjacency search also skips fully forbidden pairs and never removes required ones.
    SkeletonAndOrientation,
}

/// Adjacency search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FasConfig {
    /// Largest conditioning set size, or -1 for no limit.
    pub depth: i32,
    /// Test the pairs of one depth level on the rayon pool.
    pub parallel: bool,
    pub knowledge_policy: KnowledgePolicy,
}

impl FasConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth < -1 {
            return Err(ConfigError::InvalidDepth { depth: self.depth });
        }
        Ok(())
    }

    /// The depth as an optional bound. `None` means unlimited.
    pub fn depth_limit(&self) -> Option<usize> {
        usize::try_from(self.depth).ok()
    }
}

impl Default for FasConfig {
    fn default() -> Self {
        Self {
            depth: defaults::DEFAULT_DEPTH,
            parallel: defaults::DEFAULT_PARALLEL,
            knowledge_policy: KnowledgePolicy::default(),
        }
    }
}
