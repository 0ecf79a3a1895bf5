use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::reviews::{CreateReviewRequest, ReviewList, UpdateReviewRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Review, ReviewStats},
    response::{ApiResponse, Deleted},
    services::review_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_review))
        .route("/{id}", put(update_review).delete(delete_review))
        .route("/product/{id}", get(list_product_reviews))
        .route("/stats/{id}", get(get_stats))
}

#[utoipa::path(
    post,
    path = "/api/review",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ApiResponse<Review>),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Product already reviewed")
    ),
    security(("api_key" = [])),
    tag = "Reviews"
)]
pub async fn create_review(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateReviewRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Review>>)> {
    let resp = review_service::create_review(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/review/{id}",
    params(
        ("id" = Uuid, Path, description = "Review ID")
    ),
    request_body = UpdateReviewRequest,
    responses(
        (status = 200, description = "Review updated", body = ApiResponse<Review>),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Review not found")
    ),
    security(("api_key" = [])),
    tag = "Reviews"
)]
pub async fn update_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateReviewRequest>,
) -> AppResult<Json<ApiResponse<Review>>> {
    let resp = review_service::update_review(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/review/{id}",
    params(
        ("id" = Uuid, Path, description = "Review ID")
    ),
    responses(
        (status = 200, description = "Review deleted", body = ApiResponse<Deleted>),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Review not found")
    ),
    security(("api_key" = [])),
    tag = "Reviews"
)]
pub async fn delete_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    let resp = review_service::delete_review(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/review/product/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Reviews, newest first", body = ApiResponse<ReviewList>)
    ),
    tag = "Reviews"
)]
pub async fn list_product_reviews(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ReviewList>>> {
    let resp = review_service::list_product_reviews(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/review/stats/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Rating summary", body = ApiResponse<ReviewStats>)
    ),
    tag = "Reviews"
)]
pub async fn get_stats(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ReviewStats>>> {
    let resp = review_service::get_stats(&state, id).await?;
    Ok(Json(resp))
}
