use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::classifier::{IncomeClassification, IncomeClassifier};
use super::form::{IncomeFormOptions, IncomeProfile};
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct IncomeClassificationResponse {
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub classification: IncomeClassification,
}

/// Router exposing the income form options and the classification endpoint.
pub fn income_router(classifier: Arc<IncomeClassifier>) -> Router {
    Router::new()
        .route("/api/v1/income/options", get(options_handler))
        .route("/api/v1/income/classify", post(classify_handler))
        .with_state(classifier)
}

pub(crate) async fn options_handler(
    State(classifier): State<Arc<IncomeClassifier>>,
) -> Json<IncomeFormOptions> {
    Json(classifier.options())
}

pub(crate) async fn classify_handler(
    State(classifier): State<Arc<IncomeClassifier>>,
    payload: Result<Json<IncomeProfile>, JsonRejection>,
) -> Result<Json<IncomeClassificationResponse>, AppError> {
    let Json(profile) = payload?;
    let classification = classifier.classify(&profile)?;
    Ok(Json(IncomeClassificationResponse {
        generated_at: Utc::now(),
        classification,
    }))
}
