use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState, InMemoryProfileRepository};
use crate::routes::with_eligibility_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use sarvasahay::config::AppConfig;
use sarvasahay::eligibility::EligibilityService;
use sarvasahay::error::AppError;
use sarvasahay::telemetry;
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

    let catalog = Arc::new(load_catalog(&config.eligibility, None)?);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        catalog: catalog.clone(),
    };

    let repository = Arc::new(InMemoryProfileRepository::default());
    let eligibility_service = Arc::new(EligibilityService::new(
        repository,
        catalog.clone(),
        config.eligibility.engine_config(),
    ));

    let app = with_eligibility_routes(eligibility_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        schemes = catalog.count(),
        budget_secs = config.eligibility.max_evaluation_time.as_secs_f64(),
        "eligibility service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
