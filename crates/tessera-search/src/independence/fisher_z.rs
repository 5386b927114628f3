//! Gaussian conditional independence via Fisher's z transform of the
//! partial correlation.

use std::collections::HashMap;

use statrs::distribution::{ContinuousCDF, Normal};

use tessera_core::constants::MIN_SAMPLE_MARGIN;
use tessera_core::errors::{IndependenceError, TesseraResult};
use tessera_core::models::{Column, DataSet, Node};
use tessera_core::traits::{IndependenceResult, IndependenceTest};

use super::matrix::{covariance_matrix, invert, submatrix};

/// Partial correlations at this magnitude are treated as exactly ±1.
const MAX_ABS_CORRELATION: f64 = 1.0 - 1e-12;

/// Fisher Z test over continuous data. The covariance matrix is computed
/// once at construction; each check inverts the `(2 + |Z|)` submatrix.
#[derive(Debug, Clone)]
pub struct FisherZTest {
    variables: Vec<Node>,
    index: HashMap<String, usize>,
    covariance: Vec<Vec<f64>>,
    sample_size: usize,
    alpha: f64,
    standard_normal: Normal,
}

impl FisherZTest {
    /// Rejects discrete columns and data sets too small to test anything.
    pub fn new(data: &DataSet, alpha: f64) -> Result<Self, IndependenceError> {
        let mut columns = Vec::with_capacity(data.columns().len());
        for column in data.columns() {
            match column {
                Column::Continuous { values, .. } => columns.push(values.clone()),
                Column::Discrete { name, .. } => {
                    return Err(IndependenceError::NonContinuous { name: name.clone() })
                }
            }
        }
        let sample_size = data.n_rows();
        if sample_size < MIN_SAMPLE_MARGIN {
            return Err(IndependenceError::InsufficientSamples {
                needed: MIN_SAMPLE_MARGIN,
                available: sample_size,
            });
        }

        let standard_normal =
            Normal::new(0.0, 1.0).map_err(|e| IndependenceError::Distribution {
                reason: e.to_string(),
            })?;

        let variables = data.variables();
        let index = variables
            .iter()
            .enumerate()
            .map(|(i, n)| (n.name.clone(), i))
            .collect();
        Ok(Self {
            variables,
            index,
            covariance: covariance_matrix(&columns),
            sample_size,
            alpha,
            standard_normal,
        })
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Two-sided tail probability of a standard normal statistic.
    pub fn two_sided_p_value(&self, statistic: f64) -> f64 {
        (2.0 * self.standard_normal.sf(statistic.abs())).clamp(0.0, 1.0)
    }

    fn column_of(&self, node: &Node) -> Result<usize, IndependenceError> {
        self.index
            .get(&node.name)
            .copied()
            .ok_or_else(|| IndependenceError::UnknownVariable {
                name: node.name.clone(),
            })
    }

    /// Partial correlation of `x` and `y` given `z`, from the precision
    /// matrix of their covariance submatrix.
    pub fn partial_correlation(&self, x: &Node, y: &Node, z: &[Node]) -> Result<f64, IndependenceError> {
        let mut indices = vec![self.column_of(x)?, self.column_of(y)?];
        for node in z {
            indices.push(self.column_of(node)?);
        }
        let singular = || IndependenceError::SingularMatrix {
            x: x.name.clone(),
            y: y.name.clone(),
            conditioning_size: z.len(),
        };

        let precision = invert(&submatrix(&self.covariance, &indices)).ok_or_else(singular)?;
        let denom = precision[0][0] * precision[1][1];
        if denom <= 0.0 || !denom.is_finite() {
            return Err(singular());
        }
        let r = -precision[0][1] / denom.sqrt();
        if !r.is_finite() {
            return Err(singular());
        }
        Ok(r.clamp(-MAX_ABS_CORRELATION, MAX_ABS_CORRELATION))
    }
}

impl IndependenceTest for FisherZTest {
    fn variables(&self) -> &[Node] {
        &self.variables
    }

    fn check_independence(&self, x: &Node, y: &Node, z: &[Node]) -> TesseraResult<IndependenceResult> {
        let needed = z.len() + MIN_SAMPLE_MARGIN;
        if self.sample_size < needed {
            return Err(IndependenceError::InsufficientSamples {
                needed,
                available: self.sample_size,
            }
            .into());
        }

        let r = self.partial_correlation(x, y, z)?;
        let fisher_z = 0.5 * ((1.0 + r) / (1.0 - r)).ln();
        let dof = (self.sample_size - z.len() - 3) as f64;
        let statistic = dof.sqrt() * fisher_z.abs();
        Ok(IndependenceResult::from_p_value(
            self.two_sided_p_value(statistic),
            self.alpha,
        ))
    }

    fn alpha(&self) -> f64 {
        self.alpha
    }

    fn name(&self) -> &str {
        "fisher_z"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(columns: Vec<(&str, Vec<f64>)>) -> DataSet {
        DataSet::continuous(columns.into_iter().map(|(n, v)| (n.to_string(), v))).unwrap()
    }

    #[test]
    fn rejects_discrete_columns() {
        let ds = DataSet::new(vec![Column::Discrete {
            name: "D".to_string(),
            values: vec![0, 1, 0, 1, 1],
        }])
        .unwrap();
        assert!(matches!(
            FisherZTest::new(&ds, 0.05),
            Err(IndependenceError::NonContinuous { .. })
        ));
    }

    #[test]
    fn strong_linear_dependence_is_detected() {
        let x: Vec<f64> = (0..50).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().enumerate().map(|(i, v)| 2.0 * v + (i % 3) as f64).collect();
        let test = FisherZTest::new(&data(vec![("X", x), ("Y", y)]), 0.05).unwrap();
        let r = test
            .check_independence(&Node::measured("X"), &Node::measured("Y"), &[])
            .unwrap();
        assert!(!r.independent);
        assert!(r.p_value < 1e-6);
    }

    #[test]
    fn normal_tail_probabilities() {
        let x: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let y: Vec<f64> = (0..10).map(|i| (i * 3 % 7) as f64).collect();
        let test = FisherZTest::new(&data(vec![("X", x), ("Y", y)]), 0.05).unwrap();

        assert_eq!(test.two_sided_p_value(0.0), 1.0);
        assert!((test.two_sided_p_value(1.959964) - 0.05).abs() < 1e-6);
        assert!((test.two_sided_p_value(-1.959964) - 0.05).abs() < 1e-6);
        assert!((test.two_sided_p_value(3.0) - 2.6998e-3).abs() < 1e-6);
        // Far tail keeps relative precision instead of collapsing to zero.
        let far = test.two_sided_p_value(9.0);
        assert!(far > 0.0 && far < 1e-18);
    }

    #[test]
    fn duplicated_column_is_singular_given_itself() {
        let x: Vec<f64> = (0..20).map(|i| (i * 7 % 11) as f64).collect();
        let y: Vec<f64> = (0..20).map(|i| (i * 5 % 13) as f64).collect();
        let test =
            FisherZTest::new(&data(vec![("X", x.clone()), ("Y", y), ("X2", x)]), 0.05).unwrap();
        let err = test
            .check_independence(&Node::measured("X"), &Node::measured("Y"), &[Node::measured("X2")])
            .unwrap_err();
        assert!(err.to_string().contains("singular"));
    }

    #[test]
    fn too_few_rows_for_conditioning_set() {
        let test = FisherZTest::new(
            &data(vec![
                ("A", vec![1.0, 2.0, 3.0, 5.0]),
                ("B", vec![2.0, 1.0, 4.0, 3.0]),
                ("C", vec![0.0, 1.0, 1.0, 2.0]),
            ]),
            0.05,
        )
        .unwrap();
        assert!(test
            .check_independence(&Node::measured("A"), &Node::measured("B"), &[Node::measured("C")])
            .is_err());
    }
}
