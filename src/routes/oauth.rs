use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::auth::{AuthResponse, GoogleSignInRequest},
    error::AppResult,
    response::ApiResponse,
    services::auth_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/google", post(google_sign_in))
}

#[utoipa::path(
    post,
    path = "/api/oauth/google",
    request_body = GoogleSignInRequest,
    responses(
        (status = 200, description = "Session token issued", body = ApiResponse<AuthResponse>),
        (status = 403, description = "Account is banned")
    ),
    tag = "Users"
)]
pub async fn google_sign_in(
    State(state): State<AppState>,
    Json(payload): Json<GoogleSignInRequest>,
) -> AppResult<Json<ApiResponse<AuthResponse>>> {
    let resp = auth_service::google_sign_in(&state, payload).await?;
    Ok(Json(resp))
}
