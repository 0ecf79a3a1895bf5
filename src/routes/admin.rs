use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get, patch, put},
};
use uuid::Uuid;

use crate::{
    dto::{
        admin::{DashboardStats, SetFeaturedRequest, UpdateOrderStatusRequest, UserList},
        orders::{OrderList, OrderWithItems},
        products::{ProductList, UpdateProductRequest},
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Order, Product, User},
    response::{ApiResponse, Deleted},
    routes::params::{OrderListQuery, ProductQuery},
    services::admin_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/users", get(list_users))
        .route("/users/{id}", delete(delete_user))
        .route("/users/{id}/ban", patch(ban_user))
        .route("/users/{id}/unban", patch(unban_user))
        .route("/products", get(list_products))
        .route("/products/{id}", put(update_product).delete(delete_product))
        .route("/orders", get(list_all_orders))
        .route("/orders/{id}", get(get_order_admin))
        .route("/orders/{id}/status", patch(update_order_status))
        .route("/featured", get(get_featured).put(set_featured))
}

#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses(
        (status = 200, description = "Counts and paid revenue", body = ApiResponse<DashboardStats>),
        (status = 401, description = "Admin access required")
    ),
    security(("api_key" = [])),
    tag = "Admin"
)]
pub async fn dashboard(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<DashboardStats>>> {
    let resp = admin_service::dashboard(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/users",
    responses(
        (status = 200, description = "All users", body = ApiResponse<UserList>),
        (status = 401, description = "Admin access required")
    ),
    security(("api_key" = [])),
    tag = "Admin"
)]
pub async fn list_users(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<UserList>>> {
    let resp = admin_service::list_users(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/users/{id}/ban",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User banned", body = ApiResponse<User>),
        (status = 400, description = "Cannot ban yourself"),
        (status = 404, description = "User not found")
    ),
    security(("api_key" = [])),
    tag = "Admin"
)]
pub async fn ban_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = admin_service::ban_user(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/users/{id}/unban",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User unbanned", body = ApiResponse<User>),
        (status = 404, description = "User not found")
    ),
    security(("api_key" = [])),
    tag = "Admin"
)]
pub async fn unban_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = admin_service::unban_user(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = ApiResponse<Deleted>),
        (status = 400, description = "Cannot delete yourself"),
        (status = 404, description = "User not found")
    ),
    security(("api_key" = [])),
    tag = "Admin"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    let resp = admin_service::delete_user(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/products",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("q" = Option<String>, Query, description = "Search name and description"),
        ("category" = Option<String>, Query, description = "Filter by category")
    ),
    responses(
        (status = 200, description = "All products", body = ApiResponse<ProductList>)
    ),
    security(("api_key" = [])),
    tag = "Admin"
)]
pub async fn list_products(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = admin_service::list_products(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<Product>),
        (status = 404, description = "Product not found")
    ),
    security(("api_key" = [])),
    tag = "Admin"
)]
pub async fn update_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = admin_service::update_product(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted", body = ApiResponse<Deleted>),
        (status = 404, description = "Product not found")
    ),
    security(("api_key" = [])),
    tag = "Admin"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    let resp = admin_service::delete_product(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("sort_order" = Option<String>, Query, description = "Sort order: asc, desc")
    ),
    responses(
        (status = 200, description = "Get all orders (admin only)", body = ApiResponse<OrderList>),
        (status = 401, description = "Admin access required"),
        (status = 500, description = "Internal Server Error"),
    ),
    security(("api_key" = [])),
    tag = "Admin"
)]
pub async fn list_all_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = admin_service::list_all_orders(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order with items", body = ApiResponse<OrderWithItems>),
        (status = 404, description = "Order not found")
    ),
    security(("api_key" = [])),
    tag = "Admin"
)]
pub async fn get_order_admin(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderWithItems>>> {
    let resp = admin_service::get_order_admin(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/orders/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Order status set", body = ApiResponse<Order>),
        (status = 404, description = "Order not found")
    ),
    security(("api_key" = [])),
    tag = "Admin"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = admin_service::update_order_status(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/featured",
    responses(
        (status = 200, description = "Currently featured products", body = ApiResponse<ProductList>)
    ),
    security(("api_key" = [])),
    tag = "Admin"
)]
pub async fn get_featured(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = admin_service::get_featured(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/featured",
    request_body = SetFeaturedRequest,
    responses(
        (status = 200, description = "Featured set replaced", body = ApiResponse<ProductList>),
        (status = 400, description = "Too many or unknown products")
    ),
    security(("api_key" = [])),
    tag = "Admin"
)]
pub async fn set_featured(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<SetFeaturedRequest>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = admin_service::set_featured(&state, &user, payload).await?;
    Ok(Json(resp))
}
