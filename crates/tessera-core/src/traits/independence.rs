use serde::{Deserialize, Serialize};

use crate::errors::TesseraResult;
use crate::models::Node;

/// Outcome of one conditional independence judgment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndependenceResult {
    pub independent: bool,
    pub p_value: f64,
}

impl IndependenceResult {
    /// Judgment from a p-value against a significance level: independent iff `p >= alpha`.
    pub fn from_p_value(p_value: f64, alpha: f64) -> Self {
        Self {
            independent: p_value >= alpha,
            p_value,
        }
    }
}

/// Conditional independence test over a fixed variable list.
///
/// Implementations must be deterministic for a given `(x, y, z)` and must
/// not mutate their underlying data. An `Err` means the test could not
/// decide (e.g. a singular covariance submatrix); search treats that as
/// dependence and keeps the edge.
pub trait IndependenceTest: Send + Sync {
    /// The variables this test can reason about, in a stable order.
    fn variables(&self) -> &[Node];

    /// Test `x _||_ y | z`.
    fn check_independence(&self, x: &Node, y: &Node, z: &[Node])
        -> TesseraResult<IndependenceResult>;

    /// Significance level used to turn p-values into judgments.
    fn alpha(&self) -> f64;

    /// Short identifier for logs and diagnostics.
    fn name(&self) -> &str;
}
