use serde::{Deserialize, Serialize};

use super::defaults;

/// Collider and Meek-rule orientation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientationConfig {
    /// Skip any orientation that would close a directed cycle.
    pub prevent_cycles: bool,
    /// Run Meek rule 4 even without background knowledge.
    pub always_apply_r4: bool,
}

impl Default for OrientationConfig {
    fn default() -> Self {
        Self {
            prevent_cycles: defaults::DEFAULT_PREVENT_CYCLES,
            always_apply_r4: defaults::DEFAULT_ALWAYS_APPLY_R4,
        }
    }
}
