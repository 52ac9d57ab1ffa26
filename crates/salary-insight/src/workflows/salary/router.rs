use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::estimator::SalaryEstimator;
use super::form::{SalaryFormOptions, SalaryProfile};
use super::presenter::SalaryEstimate;
use crate::error::AppError;
use crate::model::Regressor;

#[derive(Debug, Serialize)]
pub struct SalaryEstimateResponse {
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub estimate: SalaryEstimate,
    pub summary: String,
}

/// Router exposing the salary form options and the estimate endpoint.
pub fn salary_router<M>(estimator: Arc<SalaryEstimator<M>>) -> Router
where
    M: Regressor + 'static,
{
    Router::new()
        .route("/api/v1/salary/options", get(options_handler::<M>))
        .route("/api/v1/salary/estimate", post(estimate_handler::<M>))
        .with_state(estimator)
}

pub(crate) async fn options_handler<M>(
    State(estimator): State<Arc<SalaryEstimator<M>>>,
) -> Json<SalaryFormOptions>
where
    M: Regressor + 'static,
{
    Json(estimator.options())
}

pub(crate) async fn estimate_handler<M>(
    State(estimator): State<Arc<SalaryEstimator<M>>>,
    payload: Result<Json<SalaryProfile>, JsonRejection>,
) -> Result<Json<SalaryEstimateResponse>, AppError>
where
    M: Regressor + 'static,
{
    let Json(profile) = payload?;
    let estimate = estimator.estimate(&profile)?;
    let summary = estimate.render();
    Ok(Json(SalaryEstimateResponse {
        generated_at: Utc::now(),
        estimate,
        summary,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{FeatureRow, ModelSchema};
    use crate::model::{InferenceError, ModelArtifacts};
    use crate::workflows::salary::CurrencyTable;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    struct UnavailableModel;

    impl Regressor for UnavailableModel {
        fn predict(&self, _row: &FeatureRow) -> Result<f64, InferenceError> {
            Err(InferenceError::Backend("weights failed checksum".to_string()))
        }
    }

    fn estimator() -> Arc<SalaryEstimator<UnavailableModel>> {
        let artifacts = ModelArtifacts::with_model(
            UnavailableModel,
            vec!["Master".to_string()],
            vec!["India".to_string()],
            ModelSchema::new(["EdLevel", "YearsCodePro"]).expect("schema"),
        )
        .expect("artifacts");
        Arc::new(SalaryEstimator::new(artifacts, CurrencyTable::standard()))
    }

    async fn post_estimate(payload: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/salary/estimate")
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request builds");
        let response = salary_router(estimator())
            .oneshot(request)
            .await
            .expect("router responds");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let body = serde_json::from_slice(&bytes).expect("json error body");
        (status, body)
    }

    #[tokio::test]
    async fn inference_failure_is_a_server_error() {
        let (status, body) = post_estimate(json!({
            "education": "Master",
            "years_experience": 4,
            "country": "India",
            "work_environment": "Remote"
        }))
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let message = body["error"].as_str().expect("error message");
        assert!(message.contains("weights failed checksum"), "{message}");
    }

    #[tokio::test]
    async fn negative_experience_is_rejected_as_json() {
        let (status, body) = post_estimate(json!({
            "education": "Master",
            "years_experience": -1,
            "country": "India",
            "work_environment": "Remote"
        }))
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let message = body["error"].as_str().expect("error message");
        assert!(message.contains("years_experience"), "{message}");
    }

    #[tokio::test]
    async fn unknown_country_is_unprocessable() {
        let (status, body) = post_estimate(json!({
            "education": "Master",
            "years_experience": 4,
            "country": "Atlantis",
            "work_environment": "Remote"
        }))
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().expect("message").contains("Atlantis"));
    }
}
