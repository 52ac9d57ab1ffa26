//! Pre-trained model artifacts and the inference seam.

mod artifacts;

pub use artifacts::{
    ArtifactError, ModelArtifacts, COUNTRY_ENCODER_FILE, EDUCATION_ENCODER_FILE, FEATURES_FILE,
    MODEL_FILE,
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::features::FeatureRow;

/// Failures raised while running a model over an aligned row.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InferenceError {
    #[error("model expects {expected} features but received {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("model produced a non-finite prediction ({0})")]
    NonFinite(f64),
    #[error("model backend failed: {0}")]
    Backend(String),
}

/// Anything that can turn an aligned feature row into a single estimate.
pub trait Regressor: Send + Sync {
    fn predict(&self, row: &FeatureRow) -> Result<f64, InferenceError>;
}

/// Ordinary least squares model exported as an intercept plus one weight per schema column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trained_on: Option<NaiveDate>,
}

impl Regressor for LinearRegression {
    fn predict(&self, row: &FeatureRow) -> Result<f64, InferenceError> {
        if row.len() != self.coefficients.len() {
            return Err(InferenceError::DimensionMismatch {
                expected: self.coefficients.len(),
                actual: row.len(),
            });
        }

        let estimate = self
            .coefficients
            .iter()
            .zip(row.values())
            .fold(self.intercept, |acc, (weight, value)| acc + weight * value);

        if estimate.is_finite() {
            Ok(estimate)
        } else {
            Err(InferenceError::NonFinite(estimate))
        }
    }
}
