use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use chrono::{Local, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;

use super::super::domain::EmployeeId;
use super::super::repository::{NotificationStore, WorkforceStore};
use super::domain::CustomNotification;
use super::service::{NotificationService, NotificationServiceError};

/// Router builder exposing the per-viewer notification feed endpoints.
pub fn notification_router<W, S>(service: Arc<NotificationService<W, S>>) -> Router
where
    W: WorkforceStore + 'static,
    S: NotificationStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/employees/:employee_id/notifications",
            get(refresh_handler::<W, S>)
                .post(add_custom_handler::<W, S>)
                .delete(clear_handler::<W, S>),
        )
        .route(
            "/api/v1/employees/:employee_id/notifications/read-all",
            post(mark_all_read_handler::<W, S>),
        )
        .route(
            "/api/v1/employees/:employee_id/notifications/:notification_id/read",
            post(mark_read_handler::<W, S>),
        )
        .route(
            "/api/v1/employees/:employee_id/notifications/:notification_id",
            delete(remove_handler::<W, S>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RefreshQuery {
    /// Evaluation date override (YYYY-MM-DD); defaults to the local date.
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) async fn refresh_handler<W, S>(
    State(service): State<Arc<NotificationService<W, S>>>,
    Path(employee_id): Path<String>,
    Query(query): Query<RefreshQuery>,
) -> Response
where
    W: WorkforceStore + 'static,
    S: NotificationStore + 'static,
{
    let viewer = EmployeeId(employee_id);
    let today = query.today.unwrap_or_else(|| Local::now().date_naive());
    to_response(service.refresh(&viewer, today, Utc::now()), StatusCode::OK)
}

pub(crate) async fn mark_read_handler<W, S>(
    State(service): State<Arc<NotificationService<W, S>>>,
    Path((employee_id, notification_id)): Path<(String, String)>,
) -> Response
where
    W: WorkforceStore + 'static,
    S: NotificationStore + 'static,
{
    let viewer = EmployeeId(employee_id);
    to_response(service.mark_read(&viewer, &notification_id), StatusCode::OK)
}

pub(crate) async fn mark_all_read_handler<W, S>(
    State(service): State<Arc<NotificationService<W, S>>>,
    Path(employee_id): Path<String>,
) -> Response
where
    W: WorkforceStore + 'static,
    S: NotificationStore + 'static,
{
    let viewer = EmployeeId(employee_id);
    to_response(service.mark_all_read(&viewer), StatusCode::OK)
}

pub(crate) async fn remove_handler<W, S>(
    State(service): State<Arc<NotificationService<W, S>>>,
    Path((employee_id, notification_id)): Path<(String, String)>,
) -> Response
where
    W: WorkforceStore + 'static,
    S: NotificationStore + 'static,
{
    let viewer = EmployeeId(employee_id);
    to_response(service.remove(&viewer, &notification_id), StatusCode::OK)
}

pub(crate) async fn clear_handler<W, S>(
    State(service): State<Arc<NotificationService<W, S>>>,
    Path(employee_id): Path<String>,
) -> Response
where
    W: WorkforceStore + 'static,
    S: NotificationStore + 'static,
{
    let viewer = EmployeeId(employee_id);
    to_response(service.clear(&viewer), StatusCode::OK)
}

pub(crate) async fn add_custom_handler<W, S>(
    State(service): State<Arc<NotificationService<W, S>>>,
    Path(employee_id): Path<String>,
    axum::Json(draft): axum::Json<CustomNotification>,
) -> Response
where
    W: WorkforceStore + 'static,
    S: NotificationStore + 'static,
{
    let viewer = EmployeeId(employee_id);
    to_response(
        service.add_custom(&viewer, draft, Utc::now()),
        StatusCode::CREATED,
    )
}

fn to_response<T: serde::Serialize>(
    result: Result<T, NotificationServiceError>,
    success: StatusCode,
) -> Response {
    match result {
        Ok(snapshot) => (success, axum::Json(snapshot)).into_response(),
        Err(NotificationServiceError::UnknownEmployee(id)) => {
            let payload = json!({
                "error": format!("employee {id} not found"),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
