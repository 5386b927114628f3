//! Independence tests and the enum-keyed registry that builds them.

pub mod fisher_z;
pub mod matrix;
pub mod msep;

pub use fisher_z::FisherZTest;
pub use msep::MSeparationTest;

use tessera_core::config::{IndependenceConfig, TestKind};
use tessera_core::errors::{ConfigError, TesseraResult};
use tessera_core::models::DataSet;
use tessera_core::traits::IndependenceTest;
use tessera_graph::Graph;

/// What a test is built over.
#[derive(Debug, Clone)]
pub enum TestSource {
    /// A known DAG, for the oracle.
    Dag(Graph),
    /// Observed data.
    Data(DataSet),
}

impl TestSource {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Dag(_) => "dag",
            Self::Data(_) => "data",
        }
    }
}

/// Build the test `kind` over `source` at significance level `alpha`.
pub fn build_test(
    kind: TestKind,
    source: TestSource,
    alpha: f64,
) -> TesseraResult<Box<dyn IndependenceTest>> {
    IndependenceConfig { kind, alpha }.validate()?;
    match (kind, source) {
        (TestKind::MSeparation, TestSource::Dag(dag)) => Ok(Box::new(MSeparationTest::new(dag, alpha)?)),
        (TestKind::FisherZ, TestSource::Data(data)) => Ok(Box::new(FisherZTest::new(&data, alpha)?)),
        (kind, source) => Err(ConfigError::SourceMismatch {
            kind: kind.to_string(),
            source_kind: source.kind_name().to_string(),
        }
        .into()),
    }
}

/// [`build_test`] driven by an [`IndependenceConfig`].
pub fn build_from_config(
    config: &IndependenceConfig,
    source: TestSource,
) -> TesseraResult<Box<dyn IndependenceTest>> {
    build_test(config.kind, source, config.alpha)
}
