use crate::cli::ServeArgs;
use crate::infra::{apply_artifact_overrides, load_estimator, AppState};
use crate::routes::with_prediction_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use salary_insight::config::AppConfig;
use salary_insight::error::AppError;
use salary_insight::telemetry::{self, LogSink};
use salary_insight::workflows::income::IncomeClassifier;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    apply_artifact_overrides(&mut config, &args.artifacts);

    telemetry::init(&config.telemetry, LogSink::Stdout)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let estimator = Arc::new(load_estimator(&config.artifacts)?);
    let classifier = Arc::new(IncomeClassifier::standard()?);

    let app = with_prediction_routes(estimator, classifier)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "salary insight service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
