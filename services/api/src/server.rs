use crate::cli::ServeArgs;
use crate::infra::{AppState, UbexContext};
use crate::routes::ubex_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use ubex::config::AppConfig;
use ubex::error::AppError;
use ubex::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let context = Arc::new(UbexContext::from_config(&config));
    info!(
        insights_enabled = context.insights.model().is_enabled(),
        review_delay = ?config.lifecycle.review_delay(),
        decision_delay = ?config.lifecycle.decision_delay(),
        "session context seeded"
    );

    let app = ubex_router(context)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "ubex api ready");

    axum::serve(listener, app).await?;
    Ok(())
}
