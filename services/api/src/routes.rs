use crate::infra::{AppState, InMemoryNotificationStore, InMemoryWorkforceStore};
use axum::extract::{Path, Query};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;
use skill_matrix::workforce::analytics::{analytics_overview, dashboard_stats, skill_matrix};
use skill_matrix::workforce::notifications::{notification_router, NotificationService};
use skill_matrix::workforce::repository::{StoreError, WorkforceStore};
use skill_matrix::workforce::transfer::{
    export_csv, export_json, AssessmentCsvImporter, ExportError, ExportFormat, ExportKind,
    ImportError,
};
use std::sync::Arc;

pub(crate) fn api_router(
    workforce: Arc<InMemoryWorkforceStore>,
    notifications: Arc<NotificationService<InMemoryWorkforceStore, InMemoryNotificationStore>>,
) -> axum::Router {
    notification_router(notifications)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/dashboard/stats",
            axum::routing::get(dashboard_stats_endpoint),
        )
        .route(
            "/api/v1/dashboard/matrix",
            axum::routing::get(skill_matrix_endpoint),
        )
        .route("/api/v1/analytics", axum::routing::get(analytics_endpoint))
        .route("/api/v1/export/:kind", axum::routing::get(export_endpoint))
        .route(
            "/api/v1/assessments/import",
            axum::routing::post(import_endpoint),
        )
        .layer(Extension(workforce))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AnalyticsQuery {
    pub(crate) today: Option<NaiveDate>,
    pub(crate) department: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ExportQuery {
    pub(crate) format: Option<String>,
}

pub(crate) async fn dashboard_stats_endpoint(
    Extension(workforce): Extension<Arc<InMemoryWorkforceStore>>,
) -> Response {
    match workforce.load() {
        Ok(dataset) => Json(dashboard_stats(&dataset)).into_response(),
        Err(err) => store_error_response(err),
    }
}

pub(crate) async fn skill_matrix_endpoint(
    Extension(workforce): Extension<Arc<InMemoryWorkforceStore>>,
) -> Response {
    match workforce.load() {
        Ok(dataset) => Json(json!({ "matrix": skill_matrix(&dataset) })).into_response(),
        Err(err) => store_error_response(err),
    }
}

pub(crate) async fn analytics_endpoint(
    Extension(workforce): Extension<Arc<InMemoryWorkforceStore>>,
    Query(query): Query<AnalyticsQuery>,
) -> Response {
    let today = query.today.unwrap_or_else(|| Local::now().date_naive());
    match workforce.load() {
        Ok(dataset) => {
            Json(analytics_overview(&dataset, today, query.department.as_deref())).into_response()
        }
        Err(err) => store_error_response(err),
    }
}

pub(crate) async fn export_endpoint(
    Extension(workforce): Extension<Arc<InMemoryWorkforceStore>>,
    Path(kind): Path<String>,
    Query(query): Query<ExportQuery>,
) -> Response {
    let kind: ExportKind = match kind.parse() {
        Ok(kind) => kind,
        Err(err) => return export_error_response(err),
    };
    let format: ExportFormat = match query.format.as_deref().unwrap_or("json").parse() {
        Ok(format) => format,
        Err(err) => return export_error_response(err),
    };

    let dataset = match workforce.load() {
        Ok(dataset) => dataset,
        Err(err) => return store_error_response(err),
    };

    match format {
        ExportFormat::Json => {
            let disposition = format!("attachment; filename=\"{}-export.json\"", kind.as_str());
            (
                StatusCode::OK,
                [(header::CONTENT_DISPOSITION, disposition)],
                Json(export_json(&dataset, kind)),
            )
                .into_response()
        }
        ExportFormat::Csv => match export_csv(&dataset, kind) {
            Ok(body) => {
                let disposition = format!("attachment; filename=\"{}-export.csv\"", kind.as_str());
                (
                    StatusCode::OK,
                    [
                        (header::CONTENT_TYPE, "text/csv".to_string()),
                        (header::CONTENT_DISPOSITION, disposition),
                    ],
                    body,
                )
                    .into_response()
            }
            Err(err) => export_error_response(err),
        },
    }
}

pub(crate) async fn import_endpoint(
    Extension(workforce): Extension<Arc<InMemoryWorkforceStore>>,
    body: String,
) -> Response {
    let importer = match AssessmentCsvImporter::from_reader(body.as_bytes()) {
        Ok(importer) => importer,
        Err(err) => return import_error_response(err),
    };

    let mut dataset = match workforce.load() {
        Ok(dataset) => dataset,
        Err(err) => return store_error_response(err),
    };

    let summary = importer.apply_to(&mut dataset);
    if let Err(err) = workforce.save(&dataset) {
        return store_error_response(err);
    }

    Json(summary).into_response()
}

fn store_error_response(err: StoreError) -> Response {
    let payload = json!({ "error": err.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
}

fn export_error_response(err: ExportError) -> Response {
    let status = match err {
        ExportError::UnknownKind(_)
        | ExportError::UnknownFormat(_)
        | ExportError::CsvUnsupported => StatusCode::BAD_REQUEST,
        ExportError::Csv(_) | ExportError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": err.to_string() });
    (status, Json(payload)).into_response()
}

fn import_error_response(err: ImportError) -> Response {
    let status = match err {
        ImportError::Csv(_) => StatusCode::BAD_REQUEST,
        ImportError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": err.to_string() });
    (status, Json(payload)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::sample_dataset;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date")
    }

    fn build_router() -> axum::Router {
        let workforce = Arc::new(InMemoryWorkforceStore::with_dataset(sample_dataset(
            fixed_today(),
        )));
        let feeds = Arc::new(InMemoryNotificationStore::default());
        let notifications = Arc::new(NotificationService::new(workforce.clone(), feeds));
        api_router(workforce, notifications)
    }

    async fn get_json(router: axum::Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).expect("request builds"))
            .await
            .expect("route executes");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        (status, serde_json::from_slice(&bytes).expect("body is JSON"))
    }

    #[tokio::test]
    async fn dashboard_stats_endpoint_reports_counts() {
        let (status, payload) = get_json(build_router(), "/api/v1/dashboard/stats").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["total_employees"], 5);
        assert_eq!(payload["total_skills"], 10);
        assert!(payload["average_skill_level"].as_f64().expect("average") > 0.0);
    }

    #[tokio::test]
    async fn matrix_endpoint_covers_the_cross_product() {
        let (status, payload) = get_json(build_router(), "/api/v1/dashboard/matrix").await;

        assert_eq!(status, StatusCode::OK);
        let rows = payload["matrix"].as_array().expect("rows");
        assert_eq!(rows.len(), 5);
        assert!(rows
            .iter()
            .all(|row| row["skills"].as_array().expect("cells").len() == 10));
    }

    #[tokio::test]
    async fn analytics_endpoint_accepts_department_filter() {
        let (status, payload) = get_json(
            build_router(),
            "/api/v1/analytics?today=2026-03-02&department=Engineering",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["department"], "Engineering");
        assert_eq!(payload["total_employees"], 2);
    }

    #[tokio::test]
    async fn export_endpoint_serves_csv_and_rejects_unknown_kinds() {
        let router = build_router();

        let response = router
            .clone()
            .oneshot(
                Request::get("/api/v1/export/employees?format=csv")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .expect("content type"),
            "text/csv"
        );

        let (status, payload) = get_json(router, "/api/v1/export/reports").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(payload["error"]
            .as_str()
            .expect("error")
            .contains("unknown export kind"));
    }

    #[tokio::test]
    async fn combined_export_rejects_csv() {
        let (status, payload) = get_json(build_router(), "/api/v1/export/all?format=csv").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(payload["error"]
            .as_str()
            .expect("error")
            .contains("only available as JSON"));
    }

    #[tokio::test]
    async fn import_endpoint_applies_rows_and_reports_rejections() {
        let workforce = Arc::new(InMemoryWorkforceStore::with_dataset(sample_dataset(
            fixed_today(),
        )));
        let feeds = Arc::new(InMemoryNotificationStore::default());
        let notifications = Arc::new(NotificationService::new(workforce.clone(), feeds));
        let router = api_router(workforce.clone(), notifications);

        let csv = "employee_id,skill_id,proficiency,notes,last_updated,assessed_by\n\
                   emp-1,sk-4,4,,2026-02-20,self\n\
                   ghost,sk-4,4,,2026-02-20,self\n";
        let response = router
            .oneshot(
                Request::post("/api/v1/assessments/import")
                    .header(header::CONTENT_TYPE, "text/csv")
                    .body(Body::from(csv))
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let payload: Value = serde_json::from_slice(&bytes).expect("body is JSON");
        assert_eq!(payload["processed"], 2);
        assert_eq!(payload["created"], 1);
        assert_eq!(payload["errors"].as_array().expect("errors").len(), 1);

        let stored = workforce.load().expect("dataset loads");
        assert!(stored
            .assessment(
                &skill_matrix::workforce::domain::EmployeeId("emp-1".to_string()),
                &skill_matrix::workforce::domain::SkillId("sk-4".to_string()),
            )
            .is_some());
    }

    #[tokio::test]
    async fn notification_routes_are_mounted() {
        let (status, payload) = get_json(
            build_router(),
            "/api/v1/employees/emp-2/notifications?today=2026-03-02",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let notifications = payload["notifications"].as_array().expect("feed");
        assert!(notifications
            .iter()
            .any(|entry| entry["id"] == "training-due-tr-2"));
        assert!(notifications
            .iter()
            .any(|entry| entry["id"] == "welcome-notification"));
    }
}
