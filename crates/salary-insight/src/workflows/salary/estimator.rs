use tracing::{debug, info};

use crate::features::{FeatureError, FeatureRow};
use crate::model::{InferenceError, LinearRegression, ModelArtifacts, Regressor};

use super::currency::CurrencyTable;
use super::form::{SalaryForm, SalaryFormOptions, SalaryProfile};
use super::presenter::{SalaryEstimate, SalaryRecap};

/// Lowest annual salary (USD) an estimate may report.
pub const SALARY_FLOOR_USD: f64 = 5000.0;

pub fn apply_floor(raw_prediction: f64) -> f64 {
    SALARY_FLOOR_USD.max(raw_prediction)
}

#[derive(Debug, thiserror::Error)]
pub enum SalaryError {
    #[error(transparent)]
    Feature(#[from] FeatureError),
    #[error("years of experience must be between 0 and 50 (got {0})")]
    ExperienceOutOfRange(u32),
    #[error("salary prediction failed: {0}")]
    Inference(#[from] InferenceError),
}

/// Read-only salary pipeline built once at startup and shared across requests.
pub struct SalaryEstimator<M = LinearRegression> {
    artifacts: ModelArtifacts<M>,
    form: SalaryForm,
    currencies: CurrencyTable,
}

impl<M: Regressor> SalaryEstimator<M> {
    pub fn new(artifacts: ModelArtifacts<M>, currencies: CurrencyTable) -> Self {
        Self {
            artifacts,
            form: SalaryForm::standard(),
            currencies,
        }
    }

    pub fn artifacts(&self) -> &ModelArtifacts<M> {
        &self.artifacts
    }

    pub fn currencies(&self) -> &CurrencyTable {
        &self.currencies
    }

    pub fn options(&self) -> SalaryFormOptions {
        self.form
            .options(&self.artifacts.education, &self.artifacts.country)
    }

    /// Encode the profile without aligning it to the model schema.
    pub fn features(&self, profile: &SalaryProfile) -> Result<FeatureRow, SalaryError> {
        self.form
            .assemble(&self.artifacts.education, &self.artifacts.country, profile)
    }

    pub fn estimate(&self, profile: &SalaryProfile) -> Result<SalaryEstimate, SalaryError> {
        let row = self.features(profile)?;
        let alignment = self.artifacts.schema.align(&row);
        if !alignment.is_exact() {
            debug!(
                filled = ?alignment.filled,
                dropped = ?alignment.dropped,
                "feature row realigned to model schema"
            );
        }

        let raw_prediction = self.artifacts.model.predict(&alignment.row)?;
        let salary_usd = apply_floor(raw_prediction);
        let currency = self.currencies.lookup(&profile.country);

        info!(
            country = %profile.country,
            raw_prediction,
            salary_usd,
            currency = %currency.code,
            "salary estimated"
        );

        let recap = SalaryRecap::from_profile(&self.form, profile);
        Ok(SalaryEstimate::new(raw_prediction, salary_usd, currency, recap))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::ModelSchema;

    struct FailingModel;

    impl Regressor for FailingModel {
        fn predict(&self, _row: &FeatureRow) -> Result<f64, InferenceError> {
            Err(InferenceError::Backend("model file truncated".to_string()))
        }
    }

    struct RecordingModel {
        schema: ModelSchema,
    }

    impl Regressor for RecordingModel {
        fn predict(&self, row: &FeatureRow) -> Result<f64, InferenceError> {
            assert!(self.schema.matches(row), "row reached model unaligned");
            Ok(row.get("YearsCodePro").unwrap_or_default() * 1000.0)
        }
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    fn linear(intercept: f64) -> SalaryEstimator {
        let model = LinearRegression {
            intercept,
            coefficients: vec![2000.0, 3000.0, 0.0, 0.0],
            trained_on: None,
        };
        let artifacts = ModelArtifacts::from_parts(
            model,
            strings(&["Bachelor", "Master"]),
            strings(&["India", "Japan"]),
            strings(&["YearsCodePro", "EdLevel", "Remote_Remote", "Rust"]),
        )
        .expect("artifacts");
        SalaryEstimator::new(artifacts, CurrencyTable::standard())
    }

    fn profile() -> SalaryProfile {
        SalaryProfile {
            education: "Master".to_string(),
            years_experience: 10,
            country: "India".to_string(),
            work_environment: "Remote".to_string(),
            has_certification: false,
            developer_roles: Vec::new(),
            languages: vec!["Python".to_string()],
        }
    }

    #[test]
    fn floor_is_a_hard_minimum() {
        assert_eq!(apply_floor(-12_000.0), SALARY_FLOOR_USD);
        assert_eq!(apply_floor(4999.99), SALARY_FLOOR_USD);
        assert_eq!(apply_floor(5000.0), 5000.0);
        assert_eq!(apply_floor(87_250.5), 87_250.5);
    }

    #[test]
    fn estimate_scores_aligned_row_and_converts() {
        let estimator = linear(10_000.0);
        let estimate = estimator.estimate(&profile()).expect("estimate");

        // 10_000 + 2000 * 10 years + 3000 * EdLevel(Master = 1)
        assert_eq!(estimate.raw_prediction_usd, 33_000.0);
        assert_eq!(estimate.salary_usd, 33_000.0);
        assert!(!estimate.floor_applied);
        assert_eq!(estimate.currency_code, "INR");
        assert_eq!(estimate.salary_local, 33_000.0 * 83.0);
    }

    #[test]
    fn low_predictions_are_clamped() {
        let estimator = linear(-200_000.0);
        let estimate = estimator.estimate(&profile()).expect("estimate");

        assert!(estimate.raw_prediction_usd < SALARY_FLOOR_USD);
        assert_eq!(estimate.salary_usd, SALARY_FLOOR_USD);
        assert!(estimate.floor_applied);
        assert_eq!(estimate.salary_local, SALARY_FLOOR_USD * 83.0);
    }

    #[test]
    fn model_only_sees_schema_columns() {
        let schema = ModelSchema::new(["Student", "YearsCodePro", "NotOnTheForm"]).expect("schema");
        let artifacts = ModelArtifacts::with_model(
            RecordingModel {
                schema: schema.clone(),
            },
            strings(&["Bachelor", "Master"]),
            strings(&["India"]),
            schema,
        )
        .expect("artifacts");
        let estimator = SalaryEstimator::new(artifacts, CurrencyTable::standard());

        let estimate = estimator.estimate(&profile()).expect("estimate");
        assert_eq!(estimate.salary_usd, 10_000.0);
    }

    #[test]
    fn inference_failures_surface_as_errors() {
        let artifacts = ModelArtifacts::with_model(
            FailingModel,
            strings(&["Master"]),
            strings(&["India"]),
            ModelSchema::new(["EdLevel"]).expect("schema"),
        )
        .expect("artifacts");
        let estimator = SalaryEstimator::new(artifacts, CurrencyTable::standard());

        let err = estimator.estimate(&profile()).expect_err("model fails");
        assert!(matches!(err, SalaryError::Inference(_)));
        assert!(err.to_string().contains("model file truncated"));
    }
}
