use crate::cli::ServeArgs;
use crate::infra::{
    default_rule_set, seed_demo_assessment, AppState, DemoProfile, InMemoryAssessmentStore,
};
use crate::routes::with_assessment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use cso_assess::assessment::AssessmentService;
use cso_assess::config::AppConfig;
use cso_assess::error::AppError;
use cso_assess::telemetry;
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

    let store = Arc::new(InMemoryAssessmentStore::default());
    store.set_rules(default_rule_set());
    if args.demo_data {
        let id = seed_demo_assessment(
            &store,
            "demo",
            "Harbor Education Collective",
            DemoProfile::Typical,
        );
        info!(assessment = %id.0, "seeded demo assessment");
    }

    let service = Arc::new(AssessmentService::new(store));

    let app = with_assessment_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "assessment scoring service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
