use crate::config::ConfigError;
use crate::model::ArtifactError;
use crate::telemetry::TelemetryError;
use crate::workflows::income::IncomeError;
use crate::workflows::salary::{CurrencyError, SalaryError};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;
use tracing::{error, warn};

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Artifact(ArtifactError),
    Currency(CurrencyError),
    Salary(SalaryError),
    Income(IncomeError),
    Payload(JsonRejection),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Artifact(err) => write!(f, "model artifact error: {}", err),
            AppError::Currency(err) => write!(f, "currency table error: {}", err),
            AppError::Salary(err) => write!(f, "{}", err),
            AppError::Income(err) => write!(f, "{}", err),
            AppError::Payload(err) => write!(f, "invalid request body: {}", err.body_text()),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Artifact(err) => Some(err),
            AppError::Currency(err) => Some(err),
            AppError::Salary(err) => Some(err),
            AppError::Income(err) => Some(err),
            AppError::Payload(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Payload(rejection) => rejection.status(),
            AppError::Income(_) | AppError::Salary(SalaryError::Feature(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Salary(SalaryError::ExperienceOutOfRange(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Salary(SalaryError::Inference(_))
            | AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Artifact(_)
            | AppError::Currency(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(error = %self, %status, "request rejected");
        }

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ArtifactError> for AppError {
    fn from(value: ArtifactError) -> Self {
        Self::Artifact(value)
    }
}

impl From<CurrencyError> for AppError {
    fn from(value: CurrencyError) -> Self {
        Self::Currency(value)
    }
}

impl From<SalaryError> for AppError {
    fn from(value: SalaryError) -> Self {
        Self::Salary(value)
    }
}

impl From<IncomeError> for AppError {
    fn from(value: IncomeError) -> Self {
        Self::Income(value)
    }
}

impl From<JsonRejection> for AppError {
    fn from(value: JsonRejection) -> Self {
        Self::Payload(value)
    }
}
