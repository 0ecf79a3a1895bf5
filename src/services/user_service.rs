use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

use crate::{
    audit,
    dto::users::UpdateProfileRequest,
    entity::users::{ActiveModel as UserActive, Entity as Users},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::User,
    response::{ApiResponse, Deleted, Meta},
    state::AppState,
};

pub async fn get_profile(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<User>> {
    let model = Users::find_by_id(user.user_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;
    Ok(ApiResponse::success("Profile", model.into(), Some(Meta::empty())))
}

pub async fn update_profile(
    state: &AppState,
    user: &AuthUser,
    payload: UpdateProfileRequest,
) -> AppResult<ApiResponse<User>> {
    payload.validate()?;
    let existing = Users::find_by_id(user.user_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;

    let mut active: UserActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(phone) = payload.phone {
        let phone = phone.trim().to_string();
        active.phone = Set((!phone.is_empty()).then_some(phone));
    }
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(&state.orm).await?;

    Ok(ApiResponse::success("Profile updated", updated.into(), Some(Meta::empty())))
}

/// Self-service deletion. Reviews, wishlist and notifications go with the
/// account; orders and payments stay as history.
pub async fn delete_account(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Deleted>> {
    let result = Users::delete_by_id(user.user_id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found("User"));
    }

    tracing::info!(user_id = %user.user_id, "account deleted by owner");
    audit::record(
        &state.orm,
        Some(user.user_id),
        "user_self_delete",
        "users",
        serde_json::json!({ "user_id": user.user_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Account deleted",
        Deleted { id: user.user_id },
        Some(Meta::empty()),
    ))
}
