use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    dto::notifications::NotificationList,
    entity::notifications::{ActiveModel, Column, Entity as Notifications},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Notification,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_notifications(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<NotificationList>> {
    let items: Vec<Notification> = Notifications::find()
        .filter(Column::UserId.eq(user.user_id))
        .order_by_desc(Column::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Notification::from)
        .collect();

    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Notifications",
        NotificationList { items },
        Some(Meta::unpaged(total)),
    ))
}

pub async fn mark_read(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Notification>> {
    // Someone else's notification is reported as missing.
    let existing = Notifications::find_by_id(id)
        .filter(Column::UserId.eq(user.user_id))
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Notification"))?;

    let mut active: ActiveModel = existing.into();
    active.is_read = Set(true);
    let notification = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Notification marked as read",
        notification.into(),
        Some(Meta::empty()),
    ))
}
