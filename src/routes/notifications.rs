use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch},
};
use uuid::Uuid;

use crate::{
    dto::notifications::NotificationList,
    error::AppResult,
    middleware::auth::AuthUser,
    models::Notification,
    response::ApiResponse,
    services::notification_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notifications))
        .route("/{id}/read", patch(mark_read))
}

#[utoipa::path(
    get,
    path = "/api/notifications",
    responses(
        (status = 200, description = "Notifications, newest first", body = ApiResponse<NotificationList>)
    ),
    security(("api_key" = [])),
    tag = "Notifications"
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<NotificationList>>> {
    let resp = notification_service::list_notifications(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/notifications/{id}/read",
    params(
        ("id" = Uuid, Path, description = "Notification ID")
    ),
    responses(
        (status = 200, description = "Marked as read", body = ApiResponse<Notification>),
        (status = 404, description = "Notification not found")
    ),
    security(("api_key" = [])),
    tag = "Notifications"
)]
pub async fn mark_read(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Notification>>> {
    let resp = notification_service::mark_read(&state, &user, id).await?;
    Ok(Json(resp))
}
