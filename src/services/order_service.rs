use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::orders::{CreateOrderRequest, OrderList, OrderWithItems, UpdateOrderRequest},
    entity::{
        order_items::{ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Order, OrderItem, OrderStatus, PaymentMethod},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn create_order(
    state: &AppState,
    user: &AuthUser,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<OrderWithItems>> {
    payload.validate()?;

    let order_id = Uuid::new_v4();
    let now = Utc::now();
    let txn = state.orm.begin().await?;

    let order = OrderActive {
        id: Set(order_id),
        user_id: Set(user.user_id),
        delivery_address: Set(payload.delivery_address()),
        subtotal: Set(payload.subtotal),
        tax: Set(payload.tax),
        total: Set(payload.total),
        status: Set(OrderStatus::Pending),
        payment_method: Set(payload.payment_method.unwrap_or(PaymentMethod::Pending)),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&txn)
    .await?;

    let mut items = Vec::with_capacity(payload.items.len());
    for (position, line) in payload.items.iter().enumerate() {
        let product_id = line.parsed_product_id();
        if product_id.is_none() && line.product_id.is_some() {
            tracing::warn!(
                order_id = %order_id,
                raw = line.product_id.as_deref().unwrap_or_default(),
                "unparseable product id on line item stored as null"
            );
        }

        let item = OrderItemActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order_id),
            product_id: Set(product_id),
            name: Set(line.name.trim().to_string()),
            price: Set(line.price),
            rental_duration: Set(line.rental_duration()),
            rental_period: Set(line.rental_period()),
            quantity: Set(line.quantity()),
            position: Set(position as i32),
            created_at: Set(now.into()),
        }
        .insert(&txn)
        .await?;
        items.push(OrderItem::from(item));
    }

    txn.commit().await?;

    tracing::info!(order_id = %order.id, user_id = %user.user_id, total = order.total, "order placed");
    audit::record(
        &state.orm,
        Some(user.user_id),
        "order_create",
        "orders",
        serde_json::json!({ "order_id": order.id, "total": order.total }),
    )
    .await;

    Ok(ApiResponse::success(
        "Order created",
        OrderWithItems {
            order: order.into(),
            items,
        },
        Some(Meta::empty()),
    ))
}

pub async fn list_my_orders(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<OrderList>> {
    let orders = Orders::find()
        .filter(OrderCol::UserId.eq(user.user_id))
        .order_by_desc(OrderCol::CreatedAt)
        .all(&state.orm)
        .await?;

    let items = with_items(&state.orm, orders).await?;
    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Ok",
        OrderList { items },
        Some(Meta::unpaged(total)),
    ))
}

pub async fn get_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let order = owned_order(&state.orm, user, id).await?;
    let items = items_for(&state.orm, order.id).await?;
    Ok(ApiResponse::success(
        "OK",
        OrderWithItems {
            order: order.into(),
            items,
        },
        Some(Meta::empty()),
    ))
}

/// Buyers may only cancel, and only while the order is still open.
pub async fn update_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    let existing = owned_order(&state.orm, user, id).await?;
    check_buyer_transition(existing.status, payload.status)?;

    let mut active: OrderActive = existing.into();
    active.status = Set(payload.status);
    active.updated_at = Set(Utc::now().into());
    let order = active.update(&state.orm).await?;

    tracing::info!(order_id = %order.id, "order cancelled by buyer");
    audit::record(
        &state.orm,
        Some(user.user_id),
        "order_cancel",
        "orders",
        serde_json::json!({ "order_id": order.id }),
    )
    .await;

    Ok(ApiResponse::success("Order updated", order.into(), Some(Meta::empty())))
}

pub(crate) fn check_buyer_transition(from: OrderStatus, to: OrderStatus) -> AppResult<()> {
    if to != OrderStatus::Cancelled {
        return Err(AppError::BadRequest("Orders can only be cancelled".into()));
    }
    if from.is_terminal() {
        return Err(AppError::BadRequest(format!(
            "A {} order cannot be cancelled",
            from.to_value()
        )));
    }
    Ok(())
}

/// Load an order for `user`: missing is `NotFound`, someone else's is `Forbidden`.
pub(crate) async fn owned_order<C: ConnectionTrait>(
    conn: &C,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<OrderModel> {
    let order = Orders::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::not_found("Order"))?;
    if order.user_id != user.user_id {
        return Err(AppError::Forbidden("Not your order".into()));
    }
    Ok(order)
}

pub(crate) async fn items_for<C: ConnectionTrait>(conn: &C, order_id: Uuid) -> AppResult<Vec<OrderItem>> {
    let items = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order_id))
        .order_by_asc(OrderItemCol::Position)
        .all(conn)
        .await?
        .into_iter()
        .map(OrderItem::from)
        .collect();
    Ok(items)
}

/// Attach line items to each order with a single query.
pub(crate) async fn with_items<C: ConnectionTrait>(
    conn: &C,
    orders: Vec<OrderModel>,
) -> AppResult<Vec<OrderWithItems>> {
    if orders.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
    let mut grouped: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
    for item in OrderItems::find()
        .filter(OrderItemCol::OrderId.is_in(ids))
        .order_by_asc(OrderItemCol::Position)
        .all(conn)
        .await?
    {
        grouped.entry(item.order_id).or_default().push(item.into());
    }

    Ok(orders
        .into_iter()
        .map(|order| OrderWithItems {
            items: grouped.remove(&order.id).unwrap_or_default(),
            order: order.into(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buyer_can_cancel_open_orders() {
        for from in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Paid,
            OrderStatus::Shipped,
        ] {
            assert!(check_buyer_transition(from, OrderStatus::Cancelled).is_ok());
        }
    }

    #[test]
    fn buyer_cannot_cancel_closed_orders() {
        for from in [OrderStatus::Delivered, OrderStatus::Cancelled] {
            assert!(matches!(
                check_buyer_transition(from, OrderStatus::Cancelled),
                Err(AppError::BadRequest(_))
            ));
        }
    }

    #[test]
    fn buyer_cannot_pick_other_statuses() {
        for to in [OrderStatus::Paid, OrderStatus::Shipped, OrderStatus::Delivered] {
            assert!(matches!(
                check_buyer_transition(OrderStatus::Pending, to),
                Err(AppError::BadRequest(_))
            ));
        }
    }
}
