// Single source of truth for all default values.

// --- Adjacency search ---
pub const DEFAULT_DEPTH: i32 = crate::constants::NO_DEPTH_LIMIT;
pub const DEFAULT_PARALLEL: bool = false;

// --- Orientation ---
pub const DEFAULT_PREVENT_CYCLES: bool = true;
pub const DEFAULT_ALWAYS_APPLY_R4: bool = false;

// --- Independence ---
pub const DEFAULT_ALPHA: f64 = 0.05;

// --- Paths ---
pub const DEFAULT_MAX_PATH_LENGTH: usize = 8;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
