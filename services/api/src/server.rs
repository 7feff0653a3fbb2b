use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::router;
use axum_prometheus::PrometheusMetricLayer;
use damage_estimator::config::AppConfig;
use damage_estimator::error::AppError;
use damage_estimator::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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

    telemetry::init(&config.telemetry)?;

    let catalog = config.pricing.load_catalog()?;
    info!(
        parts = catalog.len(),
        source = ?config.pricing.catalog_path,
        "part catalog loaded"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState::new(
        readiness_flag.clone(),
        prometheus_handle,
        catalog,
        &config.pricing,
    );

    let app = router(state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "damage estimator ready");

    axum::serve(listener, app).await?;
    Ok(())
}
