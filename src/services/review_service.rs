use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::reviews::{CreateReviewRequest, ReviewList, UpdateReviewRequest},
    entity::{
        products::Entity as Products,
        reviews::{ActiveModel as ReviewActive, Column as ReviewCol, Entity as Reviews, Model as ReviewModel},
        users::Entity as Users,
    },
    error::{AppError, AppResult, conflict_on_unique},
    middleware::auth::AuthUser,
    models::{Review, ReviewStats},
    response::{ApiResponse, Deleted, Meta},
    state::AppState,
};

const DUPLICATE_REVIEW: &str = "You have already reviewed this product";

pub async fn create_review(
    state: &AppState,
    user: &AuthUser,
    payload: CreateReviewRequest,
) -> AppResult<ApiResponse<Review>> {
    payload.validate()?;

    if Products::find_by_id(payload.product_id)
        .one(&state.orm)
        .await?
        .is_none()
    {
        return Err(AppError::not_found("Product"));
    }

    let author = Users::find_by_id(user.user_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;

    let existing = Reviews::find()
        .filter(
            Condition::all()
                .add(ReviewCol::UserId.eq(user.user_id))
                .add(ReviewCol::ProductId.eq(payload.product_id)),
        )
        .one(&state.orm)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(DUPLICATE_REVIEW.into()));
    }

    let now = Utc::now();
    // A concurrent duplicate slips past the pre-check and hits the unique index.
    let review = ReviewActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        product_id: Set(payload.product_id),
        user_name: Set(author.name),
        rating: Set(payload.rating),
        comment: Set(payload.comment.trim().to_string()),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.orm)
    .await
    .map_err(|err| conflict_on_unique(err, DUPLICATE_REVIEW))?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "review_create",
        "reviews",
        serde_json::json!({ "review_id": review.id, "product_id": review.product_id }),
    )
    .await;

    Ok(ApiResponse::success("Review created", review.into(), Some(Meta::empty())))
}

pub async fn update_review(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateReviewRequest,
) -> AppResult<ApiResponse<Review>> {
    payload.validate()?;
    let existing = owned_review(state, user, id).await?;

    let mut active: ReviewActive = existing.into();
    if let Some(rating) = payload.rating {
        active.rating = Set(rating);
    }
    if let Some(comment) = payload.comment {
        active.comment = Set(comment.trim().to_string());
    }
    active.updated_at = Set(Utc::now().into());
    let review = active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "review_update",
        "reviews",
        serde_json::json!({ "review_id": review.id }),
    )
    .await;

    Ok(ApiResponse::success("Review updated", review.into(), Some(Meta::empty())))
}

pub async fn delete_review(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Deleted>> {
    let existing = owned_review(state, user, id).await?;
    Reviews::delete_by_id(existing.id).exec(&state.orm).await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "review_delete",
        "reviews",
        serde_json::json!({ "review_id": id, "product_id": existing.product_id }),
    )
    .await;

    Ok(ApiResponse::success("Review deleted", Deleted { id }, Some(Meta::empty())))
}

pub async fn list_product_reviews(
    state: &AppState,
    product_id: Uuid,
) -> AppResult<ApiResponse<ReviewList>> {
    let items: Vec<Review> = Reviews::find()
        .filter(ReviewCol::ProductId.eq(product_id))
        .order_by_desc(ReviewCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Review::from)
        .collect();

    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Reviews",
        ReviewList { items },
        Some(Meta::unpaged(total)),
    ))
}

pub async fn get_stats(state: &AppState, product_id: Uuid) -> AppResult<ApiResponse<ReviewStats>> {
    let stats = stats_for(&state.orm, product_id).await?;
    Ok(ApiResponse::success("Review stats", stats, Some(Meta::empty())))
}

/// Aggregate computed from the stored ratings on every call.
pub async fn stats_for<C: ConnectionTrait>(conn: &C, product_id: Uuid) -> AppResult<ReviewStats> {
    let ratings: Vec<i32> = Reviews::find()
        .select_only()
        .column(ReviewCol::Rating)
        .filter(ReviewCol::ProductId.eq(product_id))
        .into_tuple::<i32>()
        .all(conn)
        .await?;
    Ok(ReviewStats::from_ratings(&ratings))
}

pub async fn recent_for<C: ConnectionTrait>(
    conn: &C,
    product_id: Uuid,
    limit: u64,
) -> AppResult<Vec<Review>> {
    let reviews = Reviews::find()
        .filter(ReviewCol::ProductId.eq(product_id))
        .order_by_desc(ReviewCol::CreatedAt)
        .limit(limit)
        .all(conn)
        .await?
        .into_iter()
        .map(Review::from)
        .collect();
    Ok(reviews)
}

async fn owned_review(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<ReviewModel> {
    let review = Reviews::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Review"))?;
    if review.user_id != user.user_id {
        return Err(AppError::Forbidden("You can only change your own reviews".into()));
    }
    Ok(review)
}
