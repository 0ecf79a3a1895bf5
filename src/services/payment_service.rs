use chrono::Utc;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::payments::{PaymentResult, ProcessPaymentRequest},
    entity::{
        notifications::ActiveModel as NotificationActive,
        order_items::{Column as OrderItemCol, Entity as OrderItems},
        orders::{ActiveModel as OrderActive, Entity as Orders},
        payments::{ActiveModel as PaymentActive, Column as PaymentCol, Entity as Payments},
    },
    error::{AppError, AppResult},
    gateway::{Charge, Settlement},
    middleware::auth::AuthUser,
    models::{OrderStatus, Payment, PaymentStatus},
    response::{ApiResponse, Meta},
    services::order_service::owned_order,
    state::AppState,
};

/// Result of a payment attempt. A declined charge is still persisted and is
/// reported to the client with `success: false`.
pub struct PaymentOutcome {
    pub settlement: Settlement,
    pub body: ApiResponse<PaymentResult>,
}

impl PaymentOutcome {
    pub fn approved(&self) -> bool {
        self.settlement == Settlement::Approved
    }
}

/// Charge an order. The payment row, the order transition and the buyer
/// notification commit together while the order row is locked, so two
/// concurrent attempts cannot both mark it paid.
pub async fn process_payment(
    state: &AppState,
    user: &AuthUser,
    payload: ProcessPaymentRequest,
) -> AppResult<PaymentOutcome> {
    let txn = state.orm.begin().await?;

    let order = Orders::find_by_id(payload.order_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found("Order"))?;
    if order.user_id != user.user_id {
        return Err(AppError::Forbidden("Not your order".into()));
    }
    if order.status == OrderStatus::Paid {
        return Err(AppError::BadRequest("Order is already paid".into()));
    }

    let details = payload.details()?;
    let now = Utc::now();

    let pending = PaymentActive {
        id: Set(Uuid::new_v4()),
        order_id: Set(order.id),
        user_id: Set(user.user_id),
        amount: Set(order.total),
        method: Set(payload.payment_method),
        details: Set(details),
        status: Set(PaymentStatus::Pending),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&txn)
    .await?;

    let settlement = state.gateway.settle(&Charge {
        order_id: order.id,
        amount: order.total,
        method: payload.payment_method,
    });

    let mut payment: PaymentActive = pending.into();
    payment.updated_at = Set(Utc::now().into());

    let (payment, order) = match settlement {
        Settlement::Approved => {
            payment.status = Set(PaymentStatus::Completed);
            let payment = payment.update(&txn).await?;

            let mut active: OrderActive = order.into();
            active.status = Set(OrderStatus::Paid);
            active.payment_method = Set(payload.payment_method);
            active.updated_at = Set(Utc::now().into());
            let order = active.update(&txn).await?;

            let first_item = OrderItems::find()
                .filter(OrderItemCol::OrderId.eq(order.id))
                .order_by_asc(OrderItemCol::Position)
                .one(&txn)
                .await?
                .map(|item| item.name)
                .unwrap_or_else(|| "your order".to_string());

            NotificationActive {
                id: Set(Uuid::new_v4()),
                user_id: Set(user.user_id),
                message: Set(format!("Payment received for {first_item}. Your rental is confirmed.")),
                is_read: Set(false),
                created_at: Set(Utc::now().into()),
            }
            .insert(&txn)
            .await?;

            (payment, Some(order))
        }
        Settlement::Declined => {
            payment.status = Set(PaymentStatus::Failed);
            (payment.update(&txn).await?, None)
        }
    };

    txn.commit().await?;

    let action = match settlement {
        Settlement::Approved => {
            tracing::info!(payment_id = %payment.id, order_id = %payment.order_id, "payment completed");
            "payment_completed"
        }
        Settlement::Declined => {
            tracing::warn!(payment_id = %payment.id, order_id = %payment.order_id, "payment declined");
            "payment_failed"
        }
    };
    audit::record(
        &state.orm,
        Some(user.user_id),
        action,
        "payments",
        serde_json::json!({ "payment_id": payment.id, "order_id": payment.order_id }),
    )
    .await;

    let data = PaymentResult {
        payment: payment.into(),
        order: order.map(Into::into),
    };
    let body = match settlement {
        Settlement::Approved => {
            ApiResponse::success("Payment successful", data, Some(Meta::empty()))
        }
        Settlement::Declined => ApiResponse::failure("Payment failed", Some(data)),
    };

    Ok(PaymentOutcome { settlement, body })
}

/// Most recent payment attempt for one of the caller's orders.
pub async fn get_payment_by_order(
    state: &AppState,
    user: &AuthUser,
    order_id: Uuid,
) -> AppResult<ApiResponse<Payment>> {
    let order = owned_order(&state.orm, user, order_id).await?;

    let payment = Payments::find()
        .filter(PaymentCol::OrderId.eq(order.id))
        .order_by_desc(PaymentCol::CreatedAt)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Payment"))?;

    Ok(ApiResponse::success("Payment", payment.into(), Some(Meta::empty())))
}
