use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::orders::{CreateOrderRequest, OrderList, OrderWithItems, UpdateOrderRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Order,
    response::ApiResponse,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_order))
        .route("/my-orders", get(list_my_orders))
        .route("/{id}", get(get_order).patch(update_order))
}

#[utoipa::path(
    post,
    path = "/api/checkout",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = ApiResponse<OrderWithItems>),
        (status = 400, description = "Missing items, address, or inconsistent totals")
    ),
    security(("api_key" = [])),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<OrderWithItems>>)> {
    let resp = order_service::create_order(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/checkout/my-orders",
    responses(
        (status = 200, description = "Caller's orders, newest first", body = ApiResponse<OrderList>)
    ),
    security(("api_key" = [])),
    tag = "Orders"
)]
pub async fn list_my_orders(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::list_my_orders(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/checkout/{id}",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order with items", body = ApiResponse<OrderWithItems>),
        (status = 403, description = "Not your order"),
        (status = 404, description = "Order not found")
    ),
    security(("api_key" = [])),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderWithItems>>> {
    let resp = order_service::get_order(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/checkout/{id}",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Order cancelled", body = ApiResponse<Order>),
        (status = 400, description = "Transition not allowed"),
        (status = 403, description = "Not your order")
    ),
    security(("api_key" = [])),
    tag = "Orders"
)]
pub async fn update_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = order_service::update_order(&state, &user, id, payload).await?;
    Ok(Json(resp))
}
