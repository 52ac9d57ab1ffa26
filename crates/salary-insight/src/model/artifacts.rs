use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::info;

use super::{LinearRegression, Regressor};
use crate::features::{CategoricalField, FeatureError, ModelSchema};

pub const MODEL_FILE: &str = "model_lr.json";
pub const EDUCATION_ENCODER_FILE: &str = "le_edu.json";
pub const COUNTRY_ENCODER_FILE: &str = "le_country.json";
pub const FEATURES_FILE: &str = "model_features.json";

/// Errors raised while loading the read-only model bundle at startup.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("unable to read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("artifact {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("encoder '{0}' has no classes")]
    EmptyEncoder(String),
    #[error("model has {coefficients} coefficients but the feature schema lists {columns} columns")]
    CoefficientCount { coefficients: usize, columns: usize },
    #[error(transparent)]
    Feature(#[from] FeatureError),
}

#[derive(Debug, Deserialize)]
struct EncoderFile {
    classes: Vec<String>,
}

/// Model, categorical encoders, and expected column order, loaded once per process.
#[derive(Debug, Clone)]
pub struct ModelArtifacts<M = LinearRegression> {
    pub model: M,
    pub education: CategoricalField,
    pub country: CategoricalField,
    pub schema: ModelSchema,
}

impl ModelArtifacts<LinearRegression> {
    /// Read the four artifact files from `directory`.
    pub fn load(directory: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let directory = directory.as_ref();
        let model: LinearRegression = read_json(&directory.join(MODEL_FILE))?;
        let education: EncoderFile = read_json(&directory.join(EDUCATION_ENCODER_FILE))?;
        let country: EncoderFile = read_json(&directory.join(COUNTRY_ENCODER_FILE))?;
        let columns: Vec<String> = read_json(&directory.join(FEATURES_FILE))?;

        let artifacts = Self::from_parts(model, education.classes, country.classes, columns)?;
        info!(
            directory = %directory.display(),
            columns = artifacts.schema.len(),
            education_levels = artifacts.education.labels().len(),
            countries = artifacts.country.labels().len(),
            trained_on = ?artifacts.model.trained_on,
            "model artifacts loaded"
        );
        Ok(artifacts)
    }

    /// Assemble a bundle from in-memory parts, checking the model width against the schema.
    pub fn from_parts(
        model: LinearRegression,
        education_classes: Vec<String>,
        country_classes: Vec<String>,
        columns: Vec<String>,
    ) -> Result<Self, ArtifactError> {
        let schema = ModelSchema::new(columns)?;
        if model.coefficients.len() != schema.len() {
            return Err(ArtifactError::CoefficientCount {
                coefficients: model.coefficients.len(),
                columns: schema.len(),
            });
        }
        Self::with_model(model, education_classes, country_classes, schema)
    }
}

impl<M: Regressor> ModelArtifacts<M> {
    /// Pair any [`Regressor`] with label-encoded education and country fields.
    pub fn with_model(
        model: M,
        education_classes: Vec<String>,
        country_classes: Vec<String>,
        schema: ModelSchema,
    ) -> Result<Self, ArtifactError> {
        Ok(Self {
            model,
            education: encoder("education level", education_classes)?,
            country: encoder("country", country_classes)?,
            schema,
        })
    }
}

fn encoder(name: &str, classes: Vec<String>) -> Result<CategoricalField, ArtifactError> {
    if classes.is_empty() {
        return Err(ArtifactError::EmptyEncoder(name.to_string()));
    }
    Ok(CategoricalField::indexed(name, classes)?)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let raw = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ArtifactError::Json {
        path: path.to_path_buf(),
        source,
    })
}
