use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::payments::{PaymentResult, ProcessPaymentRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Payment,
    response::ApiResponse,
    services::payment_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/process", post(process_payment))
        .route("/order/{id}", get(get_payment_by_order))
}

#[utoipa::path(
    post,
    path = "/api/payment/process",
    request_body = ProcessPaymentRequest,
    responses(
        (status = 200, description = "Payment completed, order paid", body = ApiResponse<PaymentResult>),
        (status = 400, description = "Order already paid or invalid payment details"),
        (status = 402, description = "Payment declined; the failed payment is attached", body = ApiResponse<PaymentResult>),
        (status = 403, description = "Not your order"),
        (status = 404, description = "Order not found")
    ),
    security(("api_key" = [])),
    tag = "Payments"
)]
pub async fn process_payment(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ProcessPaymentRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<PaymentResult>>)> {
    let outcome = payment_service::process_payment(&state, &user, payload).await?;
    let status = if outcome.approved() {
        StatusCode::OK
    } else {
        StatusCode::PAYMENT_REQUIRED
    };
    Ok((status, Json(outcome.body)))
}

#[utoipa::path(
    get,
    path = "/api/payment/order/{id}",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Latest payment for the order", body = ApiResponse<Payment>),
        (status = 403, description = "Not your order"),
        (status = 404, description = "Order or payment not found")
    ),
    security(("api_key" = [])),
    tag = "Payments"
)]
pub async fn get_payment_by_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Payment>>> {
    let resp = payment_service::get_payment_by_order(&state, &user, id).await?;
    Ok(Json(resp))
}
