use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::products::{CreateProductRequest, ProductDetail, ProductList, UpdateProductRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Product,
    response::ApiResponse,
    routes::params::ProductQuery,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/featured", get(list_featured))
        .route("/{id}", get(get_product).put(update_product))
}

#[utoipa::path(
    get,
    path = "/api/product",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1. Omit both page and per_page to get every listing"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20 when page is given, max 100"),
        ("q" = Option<String>, Query, description = "Search name and description"),
        ("category" = Option<String>, Query, description = "Filter by category"),
        ("min_price" = Option<f64>, Query, description = "Minimum base price"),
        ("max_price" = Option<f64>, Query, description = "Maximum base price"),
        ("sort_by" = Option<String>, Query, description = "Sort by: created_at, price, name"),
        ("sort_order" = Option<String>, Query, description = "Sort order: asc, desc")
    ),
    responses(
        (status = 200, description = "List products", body = ApiResponse<ProductList>)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::list_products(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/product/featured",
    responses(
        (status = 200, description = "Featured products", body = ApiResponse<ProductList>)
    ),
    tag = "Products"
)]
pub async fn list_featured(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::list_featured(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/product/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product with review summary", body = ApiResponse<ProductDetail>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ProductDetail>>> {
    let resp = product_service::get_product(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/product",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Create product", body = ApiResponse<Product>),
        (status = 400, description = "Validation failed")
    ),
    security(("api_key" = [])),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Product>>)> {
    let resp = product_service::create_product(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/product/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = ApiResponse<Product>),
        (status = 403, description = "Not the seller"),
        (status = 404, description = "Product not found")
    ),
    security(("api_key" = [])),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::update_product(&state, &user, id, payload).await?;
    Ok(Json(resp))
}
