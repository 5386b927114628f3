//! Tabular sample data handed to data-driven independence tests.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::node::Node;
use crate::errors::IndependenceError;

/// A single named variable and its samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Column {
    Continuous { name: String, values: Vec<f64> },
    Discrete { name: String, values: Vec<i64> },
}

impl Column {
    pub fn name(&self) -> &str {
        match self {
            Self::Continuous { name, .. } | Self::Discrete { name, .. } => name,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Continuous { values, .. } => values.len(),
            Self::Discrete { values, .. } => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::Continuous { .. })
    }
}

/// Column-major data set. All columns have the same number of rows and
/// distinct names; both are checked at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSet {
    columns: Vec<Column>,
}

impl DataSet {
    pub fn new(columns: Vec<Column>) -> Result<Self, IndependenceError> {
        let mut names = HashSet::new();
        for column in &columns {
            if !names.insert(column.name()) {
                return Err(IndependenceError::MalformedData {
                    reason: format!("duplicate column {}", column.name()),
                });
            }
        }
        if let Some(first) = columns.first() {
            let rows = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != rows) {
                return Err(IndependenceError::MalformedData {
                    reason: format!(
                        "column {} has {} rows, expected {}",
                        bad.name(),
                        bad.len(),
                        rows
                    ),
                });
            }
        }
        Ok(Self { columns })
    }

    /// Build an all-continuous data set from named columns.
    pub fn continuous(
        columns: impl IntoIterator<Item = (String, Vec<f64>)>,
    ) -> Result<Self, IndependenceError> {
        Self::new(
            columns
                .into_iter()
                .map(|(name, values)| Column::Continuous { name, values })
                .collect(),
        )
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    /// Every column as a measured variable, in column order.
    pub fn variables(&self) -> Vec<Node> {
        self.columns.iter().map(|c| Node::measured(c.name())).collect()
    }

    pub fn is_all_continuous(&self) -> bool {
        self.columns.iter().all(Column::is_continuous)
    }
}
