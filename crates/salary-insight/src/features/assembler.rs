use std::collections::HashSet;

use serde::Serialize;

use super::encoding::{CategoricalField, MultiSelectField, UnknownCategoryError};

/// Failures while turning form answers into a feature row.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeatureError {
    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategoryError),
    #[error("feature column '{0}' appears more than once")]
    DuplicateColumn(String),
    #[error("{field} declares label '{label}' more than once")]
    DuplicateLabel { field: String, label: String },
}

/// Named feature values in a fixed column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRow {
    columns: Vec<String>,
    values: Vec<f64>,
}

impl FeatureRow {
    pub(crate) fn from_parts(columns: Vec<String>, values: Vec<f64>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|name| name == column)
            .map(|index| self.values[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Builds a [`FeatureRow`] one column at a time, keeping insertion order.
#[derive(Debug, Default)]
pub struct FeatureAssembler {
    columns: Vec<String>,
    values: Vec<f64>,
    seen: HashSet<String>,
}

impl FeatureAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scalar(mut self, column: &str, value: f64) -> Result<Self, FeatureError> {
        self.push(column.to_string(), value)?;
        Ok(self)
    }

    pub fn flag(self, column: &str, enabled: bool) -> Result<Self, FeatureError> {
        self.scalar(column, if enabled { 1.0 } else { 0.0 })
    }

    /// Encode `label` through `field` and store the code under `column`.
    pub fn code(
        self,
        column: &str,
        field: &CategoricalField,
        label: &str,
    ) -> Result<Self, FeatureError> {
        let code = field.encode(label)?;
        self.scalar(column, code as f64)
    }

    /// Append one flag column per declared option of `field`.
    pub fn flags<S: AsRef<str>>(
        mut self,
        field: &MultiSelectField,
        selected: &[S],
    ) -> Result<Self, FeatureError> {
        for (column, enabled) in field.flags(selected)? {
            self.push(column, if enabled { 1.0 } else { 0.0 })?;
        }
        Ok(self)
    }

    pub fn finish(self) -> FeatureRow {
        FeatureRow::from_parts(self.columns, self.values)
    }

    fn push(&mut self, column: String, value: f64) -> Result<(), FeatureError> {
        if !self.seen.insert(column.clone()) {
            return Err(FeatureError::DuplicateColumn(column));
        }
        self.columns.push(column);
        self.values.push(value);
        Ok(())
    }
}
