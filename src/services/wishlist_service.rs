use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::{
    dto::wishlist::{AddWishlistRequest, WishlistProductList},
    entity::{
        products::Entity as Products,
        wishlist::{ActiveModel as WishlistActive, Column as WishlistCol, Entity as Wishlist},
    },
    error::{AppError, AppResult, conflict_on_unique},
    middleware::auth::AuthUser,
    models::WishlistEntry,
    response::{ApiResponse, Deleted, Meta},
    state::AppState,
};

pub async fn list_wishlist(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<WishlistProductList>> {
    let rows = Wishlist::find()
        .filter(WishlistCol::UserId.eq(user.user_id))
        .order_by_desc(WishlistCol::CreatedAt)
        .find_also_related(Products)
        .all(&state.orm)
        .await?;

    let items: Vec<_> = rows
        .into_iter()
        .filter_map(|(_, product)| product.map(Into::into))
        .collect();

    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "OK",
        WishlistProductList { items },
        Some(Meta::unpaged(total)),
    ))
}

pub async fn add_to_wishlist(
    state: &AppState,
    user: &AuthUser,
    payload: AddWishlistRequest,
) -> AppResult<ApiResponse<WishlistEntry>> {
    if Products::find_by_id(payload.product_id)
        .one(&state.orm)
        .await?
        .is_none()
    {
        return Err(AppError::not_found("Product"));
    }

    let existing = Wishlist::find()
        .filter(
            Condition::all()
                .add(WishlistCol::UserId.eq(user.user_id))
                .add(WishlistCol::ProductId.eq(payload.product_id)),
        )
        .one(&state.orm)
        .await?;

    let entry = match existing {
        Some(entry) => entry,
        None => WishlistActive {
            id: Set(Uuid::new_v4()),
            user_id: Set(user.user_id),
            product_id: Set(payload.product_id),
            created_at: Set(Utc::now().into()),
        }
        .insert(&state.orm)
        .await
        .map_err(|err| conflict_on_unique(err, "Product is already in the wishlist"))?,
    };

    Ok(ApiResponse::success(
        "Added to wishlist",
        entry.into(),
        Some(Meta::empty()),
    ))
}

pub async fn remove_from_wishlist(
    state: &AppState,
    user: &AuthUser,
    product_id: Uuid,
) -> AppResult<ApiResponse<Deleted>> {
    let result = Wishlist::delete_many()
        .filter(WishlistCol::UserId.eq(user.user_id))
        .filter(WishlistCol::ProductId.eq(product_id))
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::not_found("Wishlist entry"));
    }

    Ok(ApiResponse::success(
        "Removed from wishlist",
        Deleted { id: product_id },
        Some(Meta::empty()),
    ))
}
