//! Span definitions per search stage: adjacency search, orientation, full PC run.

/// Create an adjacency-search span.
#[macro_export]
macro_rules! fas_span {
    ($variables:expr, $depth:expr) => {
        tracing::info_span!("tessera.fas", variables = $variables, depth = $depth)
    };
}

/// Create an orientation span.
#[macro_export]
macro_rules! orientation_span {
    ($stage:expr, $edges:expr) => {
        tracing::info_span!("tessera.orientation", stage = %$stage, edges = $edges)
    };
}

/// Create a span covering one PC run.
#[macro_export]
macro_rules! search_span {
    ($test:expr, $variables:expr) => {
        tracing::info_span!("tessera.search", test = %$test, variables = $variables)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const FAS: &str = "tessera.fas";
    pub const ORIENTATION: &str = "tessera.orientation";
    pub const SEARCH: &str = "tessera.search";
}
