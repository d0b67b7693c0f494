use crate::cli::ServeArgs;
use crate::demo::seed_demo_population;
use crate::infra::{AppState, Registry};
use crate::routes::with_grant_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Local;
use household_grants::config::AppConfig;
use household_grants::eligibility::EligibilityConfig;
use household_grants::error::AppError;
use household_grants::telemetry;
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
    };

    let registry = Registry::in_memory(EligibilityConfig::default());
    if config.seed_demo {
        let seeded = seed_demo_population(&registry.service, Local::now().date_naive())?;
        info!(?seeded, "demo households seeded");
    }

    let app = with_grant_routes(registry.service, registry.engine)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "household grants service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
