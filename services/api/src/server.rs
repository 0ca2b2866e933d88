use crate::cli::ServeArgs;
use crate::demo::resolve_dataset;
use crate::infra::{AppState, InMemoryNotificationStore, InMemoryWorkforceStore};
use crate::routes::api_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Local;
use skill_matrix::config::AppConfig;
use skill_matrix::error::AppError;
use skill_matrix::telemetry;
use skill_matrix::workforce::notifications::NotificationService;
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
    if let Some(dataset) = args.dataset.take() {
        config.dataset_path = Some(dataset);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let today = Local::now().date_naive();
    let (dataset, from_file) = resolve_dataset(config.dataset_path.clone(), today)?;
    if from_file {
        info!(employees = dataset.employees.len(), "dataset loaded from file");
    } else {
        info!("using built-in sample dataset");
    }

    let workforce = Arc::new(InMemoryWorkforceStore::with_dataset(dataset));
    let feeds = Arc::new(InMemoryNotificationStore::default());
    let notifications = Arc::new(NotificationService::new(workforce.clone(), feeds));

    let app = api_router(workforce, notifications)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "skill matrix portal ready");

    axum::serve(listener, app).await?;
    Ok(())
}
