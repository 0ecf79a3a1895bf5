mod common;

use rental_marketplace_api::{
    dto::reviews::{CreateReviewRequest, UpdateReviewRequest},
    error::AppError,
    gateway::Settlement,
    services::{product_service, review_service},
};
use uuid::Uuid;

#[tokio::test]
async fn review_stats_and_conflicts() -> anyhow::Result<()> {
    let Some(state) = common::setup_state(Settlement::Approved).await? else {
        return Ok(());
    };
    let seller = common::register(&state, "Seller").await?;
    let reviewer = common::register(&state, "Reviewer").await?;
    let other = common::register(&state, "Other").await?;
    let product = common::list_product(&state, &seller.user, "Pressure Washer", 35.0).await?;

    let review = review_service::create_review(
        &state,
        &reviewer.user,
        CreateReviewRequest {
            product_id: product.id,
            rating: 5,
            comment: "Great washer".into(),
        },
    )
    .await?
    .data
    .expect("review");
    assert_eq!(review.user_name, "Reviewer");

    let stats = review_service::get_stats(&state, product.id)
        .await?
        .data
        .expect("stats");
    assert_eq!(stats.total_reviews, 1);
    assert_eq!(stats.average_rating, 5.0);
    assert_eq!(stats.rating_distribution.get(&5), Some(&1));
    for rating in 1..=4u8 {
        assert_eq!(stats.rating_distribution.get(&rating), Some(&0));
    }

    let duplicate = review_service::create_review(
        &state,
        &reviewer.user,
        CreateReviewRequest {
            product_id: product.id,
            rating: 3,
            comment: "Changed my mind".into(),
        },
    )
    .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    let hijack = review_service::update_review(
        &state,
        &other.user,
        review.id,
        UpdateReviewRequest {
            rating: Some(1),
            comment: None,
        },
    )
    .await;
    assert!(matches!(hijack, Err(AppError::Forbidden(_))));

    let delete = review_service::delete_review(&state, &other.user, review.id).await;
    assert!(matches!(delete, Err(AppError::Forbidden(_))));

    review_service::create_review(
        &state,
        &other.user,
        CreateReviewRequest {
            product_id: product.id,
            rating: 4,
            comment: "Solid".into(),
        },
    )
    .await?;

    let detail = product_service::get_product(&state, product.id)
        .await?
        .data
        .expect("detail");
    assert_eq!(detail.stats.total_reviews, 2);
    assert_eq!(detail.stats.average_rating, 4.5);
    assert_eq!(detail.recent_reviews.len(), 2);

    let updated = review_service::update_review(
        &state,
        &reviewer.user,
        review.id,
        UpdateReviewRequest {
            rating: Some(2),
            comment: None,
        },
    )
    .await?
    .data
    .expect("updated review");
    assert_eq!(updated.rating, 2);
    assert_eq!(updated.comment, "Great washer");
    assert!(updated.updated_at >= review.updated_at);

    review_service::delete_review(&state, &reviewer.user, review.id).await?;
    let listed = review_service::list_product_reviews(&state, product.id)
        .await?
        .data
        .expect("reviews");
    assert_eq!(listed.items.len(), 1);

    Ok(())
}

#[tokio::test]
async fn reviews_need_an_existing_product() -> anyhow::Result<()> {
    let Some(state) = common::setup_state(Settlement::Approved).await? else {
        return Ok(());
    };
    let reviewer = common::register(&state, "Reviewer").await?;

    let result = review_service::create_review(
        &state,
        &reviewer.user,
        CreateReviewRequest {
            product_id: Uuid::new_v4(),
            rating: 4,
            comment: "Never arrived".into(),
        },
    )
    .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
