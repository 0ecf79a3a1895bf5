mod common;

use rental_marketplace_api::{
    dto::orders::{CreateOrderRequest, UpdateOrderRequest},
    error::AppError,
    gateway::Settlement,
    models::{OrderStatus, PaymentDetails, PaymentMethod, PaymentStatus, RentalUnit},
    services::{notification_service, order_service, payment_service},
};
use uuid::Uuid;

// Buyer places an order, pays with an approving gateway, then cannot pay twice.
#[tokio::test]
async fn order_then_approved_payment_flow() -> anyhow::Result<()> {
    let Some(state) = common::setup_state(Settlement::Approved).await? else {
        return Ok(());
    };
    let buyer = common::register(&state, "Buyer").await?;
    let seller = common::register(&state, "Seller").await?;

    let product_name = format!("Camping Tent {}", Uuid::new_v4());
    let product = common::list_product(&state, &seller.user, &product_name, 100.0).await?;
    assert_eq!(product.renting.price_for(RentalUnit::Days), Some(100.0));

    let resp = order_service::create_order(
        &state,
        &buyer.user,
        common::order_request(&product.id.to_string(), &product_name),
    )
    .await?;
    let created = resp.data.expect("order data");
    assert_eq!(created.order.status, OrderStatus::Pending);
    assert_eq!(created.order.total, 216.0);
    assert_eq!(created.order.payment_method, PaymentMethod::Pending);
    assert_eq!(created.order.delivery_address.full_address, "123 Main St");
    assert_eq!(created.items.len(), 1);
    assert_eq!(created.items[0].product_id, Some(product.id));
    assert_eq!(created.items[0].rental_duration, RentalUnit::Days);
    assert_eq!(created.items[0].rental_period, 2);
    assert_eq!(created.items[0].quantity, 1);

    let outcome = payment_service::process_payment(&state, &buyer.user, common::card_payment(created.order.id)).await?;
    assert!(outcome.approved());
    assert!(outcome.body.success);
    let result = outcome.body.data.expect("payment data");
    assert_eq!(result.payment.status, PaymentStatus::Completed);
    assert_eq!(result.payment.amount, 216.0);
    match &result.payment.details {
        PaymentDetails::Card { last4, .. } => assert_eq!(last4, "4242"),
        other => panic!("unexpected details {other:?}"),
    }
    let paid = result.order.expect("order after payment");
    assert_eq!(paid.status, OrderStatus::Paid);
    assert_eq!(paid.payment_method, PaymentMethod::Card);

    let notifications = notification_service::list_notifications(&state, &buyer.user)
        .await?
        .data
        .expect("notifications");
    assert_eq!(notifications.items.len(), 1);
    assert!(notifications.items[0].message.contains(&product_name));
    assert!(!notifications.items[0].is_read);

    let again = payment_service::process_payment(&state, &buyer.user, common::card_payment(created.order.id)).await;
    assert!(matches!(again, Err(AppError::BadRequest(_))));

    let latest = payment_service::get_payment_by_order(&state, &buyer.user, created.order.id)
        .await?
        .data
        .expect("latest payment");
    assert_eq!(latest.id, result.payment.id);

    let read = notification_service::mark_read(&state, &buyer.user, notifications.items[0].id)
        .await?
        .data
        .expect("notification");
    assert!(read.is_read);

    Ok(())
}

// A declined charge is stored as failed and leaves the order untouched.
#[tokio::test]
async fn declined_payment_leaves_order_pending() -> anyhow::Result<()> {
    let Some(state) = common::setup_state(Settlement::Declined).await? else {
        return Ok(());
    };
    let buyer = common::register(&state, "Buyer").await?;
    let seller = common::register(&state, "Seller").await?;
    let (order_id, _) = common::place_order(&state, &buyer.user, &seller.user).await?;

    let outcome = payment_service::process_payment(&state, &buyer.user, common::card_payment(order_id)).await?;
    assert!(!outcome.approved());
    assert!(!outcome.body.success);
    let result = outcome.body.data.expect("failed payment is attached");
    assert_eq!(result.payment.status, PaymentStatus::Failed);
    assert!(result.order.is_none());

    let order = order_service::get_order(&state, &buyer.user, order_id)
        .await?
        .data
        .expect("order");
    assert_eq!(order.order.status, OrderStatus::Pending);
    assert_eq!(order.order.payment_method, PaymentMethod::Pending);

    let notifications = notification_service::list_notifications(&state, &buyer.user)
        .await?
        .data
        .expect("notifications");
    assert!(notifications.items.is_empty());

    Ok(())
}

#[tokio::test]
async fn orders_are_private_to_their_buyer() -> anyhow::Result<()> {
    let Some(state) = common::setup_state(Settlement::Approved).await? else {
        return Ok(());
    };
    let buyer = common::register(&state, "Buyer").await?;
    let seller = common::register(&state, "Seller").await?;
    let stranger = common::register(&state, "Stranger").await?;
    let (order_id, _) = common::place_order(&state, &buyer.user, &seller.user).await?;

    let read = order_service::get_order(&state, &stranger.user, order_id).await;
    assert!(matches!(read, Err(AppError::Forbidden(_))));

    let pay = payment_service::process_payment(&state, &stranger.user, common::card_payment(order_id)).await;
    assert!(matches!(pay, Err(AppError::Forbidden(_))));

    let missing = order_service::get_order(&state, &buyer.user, Uuid::new_v4()).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    let mine = order_service::list_my_orders(&state, &buyer.user)
        .await?
        .data
        .expect("orders");
    assert_eq!(mine.items.len(), 1);
    assert_eq!(mine.items[0].items.len(), 1);

    Ok(())
}

#[tokio::test]
async fn buyer_cancel_rules() -> anyhow::Result<()> {
    let Some(state) = common::setup_state(Settlement::Approved).await? else {
        return Ok(());
    };
    let buyer = common::register(&state, "Buyer").await?;
    let seller = common::register(&state, "Seller").await?;
    let (order_id, _) = common::place_order(&state, &buyer.user, &seller.user).await?;

    let ship = order_service::update_order(
        &state,
        &buyer.user,
        order_id,
        UpdateOrderRequest {
            status: OrderStatus::Shipped,
        },
    )
    .await;
    assert!(matches!(ship, Err(AppError::BadRequest(_))));

    let cancelled = order_service::update_order(
        &state,
        &buyer.user,
        order_id,
        UpdateOrderRequest {
            status: OrderStatus::Cancelled,
        },
    )
    .await?
    .data
    .expect("order");
    assert_eq!(cancelled.status, OrderStatus::Cancelled);

    let twice = order_service::update_order(
        &state,
        &buyer.user,
        order_id,
        UpdateOrderRequest {
            status: OrderStatus::Cancelled,
        },
    )
    .await;
    assert!(matches!(twice, Err(AppError::BadRequest(_))));

    Ok(())
}

#[tokio::test]
async fn malformed_orders_are_rejected_and_bad_ids_stored_as_null() -> anyhow::Result<()> {
    let Some(state) = common::setup_state(Settlement::Approved).await? else {
        return Ok(());
    };
    let buyer = common::register(&state, "Buyer").await?;

    let mismatch = CreateOrderRequest {
        total: 10.0,
        ..common::order_request(&Uuid::new_v4().to_string(), "Drill")
    };
    let result = order_service::create_order(&state, &buyer.user, mismatch).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let created = order_service::create_order(&state, &buyer.user, common::order_request("not-a-uuid", "Drill"))
        .await?
        .data
        .expect("order");
    assert_eq!(created.items[0].product_id, None);
    assert_eq!(created.items[0].name, "Drill");

    Ok(())
}
