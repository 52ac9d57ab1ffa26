use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::assembler::{FeatureError, FeatureRow};

/// Ordered column list a fitted model expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ModelSchema {
    columns: Vec<String>,
}

/// Result of reconciling a row with a [`ModelSchema`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alignment {
    /// Row holding exactly the schema columns, in schema order.
    pub row: FeatureRow,
    /// Schema columns the input row did not provide; set to zero.
    pub filled: Vec<String>,
    /// Input columns the schema does not know about.
    pub dropped: Vec<String>,
}

impl Alignment {
    pub fn is_exact(&self) -> bool {
        self.filled.is_empty() && self.dropped.is_empty()
    }
}

impl ModelSchema {
    pub fn new<I, S>(columns: I) -> Result<Self, FeatureError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(FeatureError::DuplicateColumn(column.clone()));
            }
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn matches(&self, row: &FeatureRow) -> bool {
        self.columns == row.columns()
    }

    /// Reorder `row` to this schema. Missing columns become 0, unknown ones are dropped.
    pub fn align(&self, row: &FeatureRow) -> Alignment {
        let provided: HashMap<&str, f64> = row.iter().collect();
        let expected: HashSet<&str> = self.columns.iter().map(String::as_str).collect();

        let mut filled = Vec::new();
        let values = self
            .columns
            .iter()
            .map(|column| match provided.get(column.as_str()) {
                Some(value) => *value,
                None => {
                    filled.push(column.clone());
                    0.0
                }
            })
            .collect();

        let dropped = row
            .columns()
            .iter()
            .filter(|column| !expected.contains(column.as_str()))
            .cloned()
            .collect();

        Alignment {
            row: FeatureRow::from_parts(self.columns.clone(), values),
            filled,
            dropped,
        }
    }
}
