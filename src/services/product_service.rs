use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::products::{CreateProductRequest, ProductDetail, ProductList, UpdateProductRequest},
    entity::products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{ImageList, Product},
    response::{ApiResponse, Meta},
    routes::params::{ProductQuery, ProductSortBy, SortOrder},
    services::review_service,
    state::AppState,
};

/// Number of reviews embedded in a product detail.
const RECENT_REVIEWS: u64 = 3;

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let window = query.pagination().requested();
    let mut condition = Condition::all();

    if let Some(search) = query.q.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = format!("%{search}%");
        condition = condition.add(
            Condition::any()
                .add(Expr::col(Column::Name).ilike(pattern.clone()))
                .add(Expr::col(Column::Description).ilike(pattern)),
        );
    }

    if let Some(category) = query.category.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        condition = condition.add(Expr::col(Column::Category).ilike(category.to_string()));
    }

    if let Some(min_price) = query.min_price {
        condition = condition.add(Column::Price.gte(min_price));
    }

    if let Some(max_price) = query.max_price {
        condition = condition.add(Column::Price.lte(max_price));
    }

    let sort_col = match query.sort_by.unwrap_or(ProductSortBy::CreatedAt) {
        ProductSortBy::CreatedAt => Column::CreatedAt,
        ProductSortBy::Price => Column::Price,
        ProductSortBy::Name => Column::Name,
    };

    let mut finder = Products::find().filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => finder.order_by_asc(sort_col),
        SortOrder::Desc => finder.order_by_desc(sort_col),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    if let Some((_, limit, offset)) = window {
        finder = finder.limit(limit as u64).offset(offset as u64);
    }

    let items = finder
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    let meta = match window {
        Some((page, limit, _)) => Meta::new(page, limit, total),
        None => Meta::unpaged(total),
    };
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<ProductDetail>> {
    let product = find_product(state, id).await?;
    let stats = review_service::stats_for(&state.orm, id).await?;
    let recent_reviews = review_service::recent_for(&state.orm, id, RECENT_REVIEWS).await?;

    Ok(ApiResponse::success(
        "Product",
        ProductDetail {
            product: product.into(),
            stats,
            recent_reviews,
        },
        Some(Meta::empty()),
    ))
}

/// Any signed-in user may list equipment; the caller becomes the seller.
pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    payload.validate()?;
    let renting = payload.renting_or_default();
    let images = payload.images_or_default();
    let now = Utc::now();

    let product = ActiveModel {
        id: Set(Uuid::new_v4()),
        seller_id: Set(user.user_id),
        name: Set(payload.name.trim().to_string()),
        description: Set(payload.description),
        price: Set(payload.price),
        category: Set(payload.category.trim().to_string()),
        images: Set(ImageList(images)),
        location: Set(payload.location),
        availability: Set(payload.availability),
        renting: Set(renting),
        is_featured: Set(false),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(product_id = %product.id, seller_id = %user.user_id, "product listed");
    audit::record(
        &state.orm,
        Some(user.user_id),
        "product_create",
        "products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Product created",
        product.into(),
        Some(Meta::empty()),
    ))
}

/// Partial update by the seller who listed it, or by an admin.
pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    payload.validate()?;
    let existing = find_product(state, id).await?;
    if existing.seller_id != user.user_id && !user.is_admin() {
        return Err(AppError::Forbidden(
            "Only the seller or an admin can edit this listing".into(),
        ));
    }

    let product = apply_update(existing, payload).update(&state.orm).await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "product_update",
        "products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success("Updated", product.into(), Some(Meta::empty())))
}

/// Featured listings, or the first few in storage order when none are marked.
pub async fn list_featured(state: &AppState) -> AppResult<ApiResponse<ProductList>> {
    let featured = Products::find()
        .filter(Column::IsFeatured.eq(true))
        .order_by_asc(Column::CreatedAt)
        .all(&state.orm)
        .await?;

    let models = if featured.is_empty() {
        Products::find()
            .order_by_asc(Column::CreatedAt)
            .limit(state.config.featured_limit as u64)
            .all(&state.orm)
            .await?
    } else {
        featured
    };

    let items: Vec<Product> = models.into_iter().map(Product::from).collect();
    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Featured products",
        ProductList { items },
        Some(Meta::unpaged(total)),
    ))
}

pub(crate) async fn find_product(state: &AppState, id: Uuid) -> AppResult<ProductModel> {
    Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::not_found("Product"))
}

pub(crate) fn apply_update(existing: ProductModel, payload: UpdateProductRequest) -> ActiveModel {
    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(category) = payload.category {
        active.category = Set(category.trim().to_string());
    }
    if let Some(images) = payload.images {
        active.images = Set(ImageList(images));
    }
    if let Some(location) = payload.location {
        active.location = Set(location);
    }
    if let Some(availability) = payload.availability {
        active.availability = Set(availability);
    }
    if let Some(renting) = payload.renting {
        active.renting = Set(renting);
    }
    active.updated_at = Set(Utc::now().into());
    active
}
