/// Tessera version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Depth sentinel meaning "grow conditioning sets until neighbors run out".
pub const NO_DEPTH_LIMIT: i32 = -1;

/// Hard ceiling on path length for enumeration, whatever the caller asks for.
pub const MAX_PATH_LENGTH: usize = 64;

/// Fewest rows a data-driven test will accept beyond the conditioning set size.
pub const MIN_SAMPLE_MARGIN: usize = 4;
