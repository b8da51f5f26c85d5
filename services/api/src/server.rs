use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryScreenRepository};
use crate::routes::with_results_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use benefits_screener::config::AppConfig;
use benefits_screener::error::AppError;
use benefits_screener::results::ScreeningService;
use benefits_screener::telemetry;
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        screening: config.screening.clone(),
    };

    let repository = Arc::new(InMemoryScreenRepository::default());
    let screening_service = Arc::new(ScreeningService::new(repository, config.screening.clone()));

    let app = with_results_routes(screening_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        as_of = %config.screening.reference_month(),
        "benefits screener results service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
