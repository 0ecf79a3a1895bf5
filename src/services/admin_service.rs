use std::collections::BTreeSet;

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, FromQueryResult, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::{
        admin::{DashboardStats, SetFeaturedRequest, UpdateOrderStatusRequest, UserList},
        orders::{OrderList, OrderWithItems},
        products::{ProductList, UpdateProductRequest},
    },
    entity::{
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders},
        products::{Column as ProdCol, Entity as Products},
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Order, OrderStatus, Product, User, UserStatus},
    response::{ApiResponse, Deleted, Meta},
    routes::params::{OrderListQuery, ProductQuery, SortOrder},
    services::{order_service, product_service},
    state::AppState,
};

pub async fn dashboard(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<DashboardStats>> {
    ensure_admin(user)?;

    #[derive(Debug, FromQueryResult)]
    struct Revenue {
        total: Option<f64>,
    }

    let user_count = Users::find().count(&state.orm).await?;
    let product_count = Products::find().count(&state.orm).await?;
    let order_count = Orders::find().count(&state.orm).await?;
    let revenue = Orders::find()
        .select_only()
        .column_as(OrderCol::Total.sum(), "total")
        .filter(OrderCol::Status.eq(OrderStatus::Paid))
        .into_model::<Revenue>()
        .one(&state.orm)
        .await?;

    let stats = DashboardStats {
        user_count,
        product_count,
        order_count,
        total_revenue: revenue.and_then(|r| r.total).unwrap_or(0.0),
    };
    Ok(ApiResponse::success("Dashboard", stats, Some(Meta::empty())))
}

pub async fn list_users(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<UserList>> {
    ensure_admin(user)?;
    let items: Vec<User> = Users::find()
        .order_by_desc(UserCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(User::from)
        .collect();

    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Users",
        UserList { items },
        Some(Meta::unpaged(total)),
    ))
}

pub async fn ban_user(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<ApiResponse<User>> {
    set_user_status(state, user, id, UserStatus::Banned).await
}

pub async fn unban_user(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<ApiResponse<User>> {
    set_user_status(state, user, id, UserStatus::Active).await
}

async fn set_user_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    status: UserStatus,
) -> AppResult<ApiResponse<User>> {
    ensure_admin(user)?;
    reject_self(user, id)?;

    let existing = Users::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;

    let mut active: UserActive = existing.into();
    active.status = Set(status);
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(&state.orm).await?;

    let (action, message) = match status {
        UserStatus::Banned => ("user_ban", "User banned"),
        UserStatus::Active => ("user_unban", "User unbanned"),
    };
    tracing::info!(admin_id = %user.user_id, user_id = %id, action, "moderation");
    audit::record(
        &state.orm,
        Some(user.user_id),
        action,
        "users",
        serde_json::json!({ "user_id": id }),
    )
    .await;

    Ok(ApiResponse::success(message, updated.into(), Some(Meta::empty())))
}

pub async fn delete_user(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<ApiResponse<Deleted>> {
    ensure_admin(user)?;
    reject_self(user, id)?;

    let result = Users::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found("User"));
    }

    tracing::info!(admin_id = %user.user_id, user_id = %id, "user deleted");
    audit::record(
        &state.orm,
        Some(user.user_id),
        "user_delete",
        "users",
        serde_json::json!({ "user_id": id }),
    )
    .await;

    Ok(ApiResponse::success("User deleted", Deleted { id }, Some(Meta::empty())))
}

fn reject_self(user: &AuthUser, target: Uuid) -> AppResult<()> {
    if user.user_id == target {
        return Err(AppError::BadRequest(
            "Admins cannot moderate their own account".into(),
        ));
    }
    Ok(())
}

pub async fn list_products(
    state: &AppState,
    user: &AuthUser,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    ensure_admin(user)?;
    product_service::list_products(state, query).await
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    product_service::update_product(state, user, id, payload).await
}

pub async fn delete_product(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<ApiResponse<Deleted>> {
    ensure_admin(user)?;
    let result = Products::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::not_found("Product"));
    }

    audit::record(
        &state.orm,
        Some(user.user_id),
        "product_delete",
        "products",
        serde_json::json!({ "product_id": id }),
    )
    .await;

    Ok(ApiResponse::success("Deleted", Deleted { id }, Some(Meta::empty())))
}

pub async fn list_all_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(status) = query.status {
        condition = condition.add(OrderCol::Status.eq(status));
    }

    let mut finder = Orders::find().filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => finder.order_by_asc(OrderCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(OrderCol::CreatedAt),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let orders = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;
    let items = order_service::with_items(&state.orm, orders).await?;

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Orders", OrderList { items }, Some(meta)))
}

pub async fn get_order_admin(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderWithItems>> {
    ensure_admin(user)?;
    let order = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Order"))?;

    let items = order_service::items_for(&state.orm, order.id).await?;
    Ok(ApiResponse::success(
        "Order found",
        OrderWithItems {
            order: order.into(),
            items,
        },
        Some(Meta::empty()),
    ))
}

/// Admins may move an order to any status from any status.
pub async fn update_order_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    ensure_admin(user)?;

    let existing = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Order"))?;
    let previous = existing.status;

    let mut active: OrderActive = existing.into();
    active.status = Set(payload.status);
    active.updated_at = Set(Utc::now().into());
    let order = active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "order_status_update",
        "orders",
        serde_json::json!({ "order_id": order.id, "from": previous, "to": order.status }),
    )
    .await;

    Ok(ApiResponse::success("Order updated", order.into(), Some(Meta::empty())))
}

pub async fn get_featured(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<ProductList>> {
    ensure_admin(user)?;
    let items: Vec<Product> = Products::find()
        .filter(ProdCol::IsFeatured.eq(true))
        .order_by_asc(ProdCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Featured products",
        ProductList { items },
        Some(Meta::unpaged(total)),
    ))
}

/// Replace the featured set with exactly `product_ids`.
pub async fn set_featured(
    state: &AppState,
    user: &AuthUser,
    payload: SetFeaturedRequest,
) -> AppResult<ApiResponse<ProductList>> {
    ensure_admin(user)?;
    let ids = featured_selection(&payload.product_ids, state.config.featured_limit)?;

    let txn = state.orm.begin().await?;
    let known = Products::find()
        .filter(ProdCol::Id.is_in(ids.clone()))
        .count(&txn)
        .await?;
    if known != ids.len() as u64 {
        return Err(AppError::BadRequest("Unknown product in featured set".into()));
    }

    Products::update_many()
        .col_expr(ProdCol::IsFeatured, Expr::value(false))
        .filter(ProdCol::IsFeatured.eq(true))
        .exec(&txn)
        .await?;
    if !ids.is_empty() {
        Products::update_many()
            .col_expr(ProdCol::IsFeatured, Expr::value(true))
            .filter(ProdCol::Id.is_in(ids.clone()))
            .exec(&txn)
            .await?;
    }
    txn.commit().await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "featured_set",
        "products",
        serde_json::json!({ "product_ids": ids }),
    )
    .await;

    get_featured(state, user).await
}

/// Distinct ids in request order, capped at `limit`.
fn featured_selection(ids: &[Uuid], limit: usize) -> AppResult<Vec<Uuid>> {
    let mut seen = BTreeSet::new();
    let ids: Vec<Uuid> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();
    if ids.len() > limit {
        return Err(AppError::BadRequest(format!(
            "At most {limit} products can be featured"
        )));
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn admin() -> AuthUser {
        AuthUser {
            user_id: Uuid::new_v4(),
            role: Role::Admin,
            name: "Admin".into(),
        }
    }

    #[test]
    fn admins_cannot_target_themselves() {
        let me = admin();
        assert!(matches!(reject_self(&me, me.user_id), Err(AppError::BadRequest(_))));
        assert!(reject_self(&me, Uuid::new_v4()).is_ok());
    }

    #[test]
    fn featured_selection_dedupes_and_caps() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_eq!(featured_selection(&[a, b, a], 2).expect("within cap"), vec![a, b]);

        let many: Vec<Uuid> = (0..5).map(|_| Uuid::new_v4()).collect();
        assert!(matches!(featured_selection(&many, 4), Err(AppError::BadRequest(_))));
        assert!(featured_selection(&[], 4).expect("empty").is_empty());
    }
}
