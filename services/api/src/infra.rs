use crate::demo::ArtifactArgs;
use metrics_exporter_prometheus::PrometheusHandle;
use salary_insight::config::{AppConfig, ArtifactConfig};
use salary_insight::error::AppError;
use salary_insight::model::ModelArtifacts;
use salary_insight::telemetry::{self, LogSink};
use salary_insight::workflows::salary::{CurrencyTable, SalaryEstimator};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Apply command-line artifact overrides on top of the environment configuration.
pub(crate) fn apply_artifact_overrides(config: &mut AppConfig, args: &ArtifactArgs) {
    if let Some(directory) = args.artifact_dir.clone() {
        config.artifacts.directory = directory;
    }
    if let Some(table) = args.currency_table.clone() {
        config.artifacts.currency_table = Some(table);
    }
}

/// Configuration for one-shot CLI commands; logs go to stderr so stdout stays readable.
pub(crate) fn cli_config(args: &ArtifactArgs) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load()?;
    apply_artifact_overrides(&mut config, args);
    telemetry::init(&config.telemetry, LogSink::Stderr)?;
    Ok(config)
}

/// Load the model bundle and exchange rates once; the estimator is read-only afterwards.
pub(crate) fn load_estimator(config: &ArtifactConfig) -> Result<SalaryEstimator, AppError> {
    let artifacts = ModelArtifacts::load(&config.directory)?;
    let currencies = match &config.currency_table {
        Some(path) => {
            let table = CurrencyTable::from_path(path)?;
            info!(path = %path.display(), countries = table.len(), "currency table loaded");
            table
        }
        None => CurrencyTable::standard(),
    };
    Ok(SalaryEstimator::new(artifacts, currencies))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::path::PathBuf;

    pub(crate) fn artifact_config() -> ArtifactConfig {
        ArtifactConfig {
            directory: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../artifacts"),
            currency_table: None,
        }
    }

    #[test]
    fn loads_bundled_artifacts() {
        let estimator = load_estimator(&artifact_config()).expect("estimator loads");
        assert_eq!(estimator.artifacts().schema.len(), 28);
    }

    #[test]
    fn currency_override_replaces_built_in_rates() {
        let path = std::env::temp_dir().join(format!(
            "salary-insight-rates-{}.csv",
            std::process::id()
        ));
        std::fs::write(&path, "country,currency_code,rate\nIndia,INR,90.5\n").expect("csv written");

        let mut config = artifact_config();
        config.currency_table = Some(path.clone());
        let estimator = load_estimator(&config);
        std::fs::remove_file(&path).ok();
        let estimator = estimator.expect("estimator loads");

        let currencies = estimator.currencies();
        assert_eq!(currencies.len(), 1);
        assert_eq!(currencies.lookup("India").rate, 90.5);
        assert_eq!(currencies.lookup("Japan").code, "USD");
    }

    #[test]
    fn bundled_currency_csv_loads() {
        let mut config = artifact_config();
        config.currency_table = Some(config.directory.join("currency_rates.csv"));
        let estimator = load_estimator(&config).expect("estimator loads");
        assert_eq!(estimator.currencies().len(), CurrencyTable::standard().len());
        assert_eq!(estimator.currencies().lookup("India").code, "INR");
    }

    #[test]
    fn missing_directory_is_an_artifact_error() {
        let config = ArtifactConfig {
            directory: PathBuf::from("/definitely/not/here"),
            currency_table: None,
        };
        let err = load_estimator(&config).err().expect("load fails");
        assert!(matches!(err, AppError::Artifact(_)));
    }

    #[test]
    fn overrides_replace_configured_locations() {
        let mut config = AppConfig {
            environment: salary_insight::config::AppEnvironment::Test,
            server: salary_insight::config::ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            telemetry: salary_insight::config::TelemetryConfig {
                log_level: "info".to_string(),
            },
            artifacts: artifact_config(),
        };
        let args = ArtifactArgs {
            artifact_dir: Some(PathBuf::from("/srv/models")),
            currency_table: Some(PathBuf::from("/srv/rates.csv")),
        };

        apply_artifact_overrides(&mut config, &args);
        assert_eq!(config.artifacts.directory, PathBuf::from("/srv/models"));
        assert_eq!(
            config.artifacts.currency_table,
            Some(PathBuf::from("/srv/rates.csv"))
        );
    }
}
