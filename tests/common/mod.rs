#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Context;
use rental_marketplace_api::{
    config::AppConfig,
    db,
    dto::{
        auth::{SignInRequest, SignUpRequest},
        orders::{AddressInput, CreateOrderRequest, LineItemInput},
        payments::{CardInput, ProcessPaymentRequest},
        products::CreateProductRequest,
    },
    entity::users::{ActiveModel as UserActive, Entity as Users},
    gateway::{FixedGateway, Settlement},
    middleware::auth::{AuthUser, authenticate},
    models::{PaymentMethod, Product, Role},
    services::{auth_service, order_service, product_service},
    state::AppState,
};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use uuid::Uuid;

pub const SECRET: &str = "integration-secret";
pub const PASSWORD: &str = "secret123";

/// State wired to a real database and a gateway that always answers
/// `settlement`. `None` when no database is configured.
pub async fn setup_state(settlement: Settlement) -> anyhow::Result<Option<AppState>> {
    let Ok(database_url) =
        std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL"))
    else {
        eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration tests.");
        return Ok(None);
    };

    let orm = db::connect(&database_url, 5).await?;
    let config = AppConfig::for_database(database_url, SECRET);
    Ok(Some(AppState::with_gateway(
        orm,
        config,
        Arc::new(FixedGateway(settlement)),
    )))
}

pub struct Session {
    pub user: AuthUser,
    pub email: String,
    pub token: String,
}

/// Sign up and sign in a fresh customer with a unique email.
pub async fn register(state: &AppState, name: &str) -> anyhow::Result<Session> {
    let email = format!("{}+{}@example.com", name.to_lowercase().replace(' ', "."), Uuid::new_v4());
    auth_service::sign_up(
        state,
        SignUpRequest {
            name: name.into(),
            email: email.clone(),
            password: PASSWORD.into(),
            phone: None,
            role: None,
        },
    )
    .await?;

    let resp = auth_service::sign_in(
        state,
        SignInRequest {
            email: email.clone(),
            password: PASSWORD.into(),
        },
    )
    .await?;
    let token = resp.data.context("session in sign-in response")?.token;
    let user = authenticate(&state.orm, SECRET, &token).await?;
    Ok(Session { user, email, token })
}

/// A customer promoted to admin directly in storage.
pub async fn register_admin(state: &AppState, name: &str) -> anyhow::Result<Session> {
    let session = register(state, name).await?;
    let model = Users::find_by_id(session.user.user_id)
        .one(&state.orm)
        .await?
        .context("registered user")?;
    let mut active: UserActive = model.into();
    active.role = Set(Role::Admin);
    active.update(&state.orm).await?;

    let user = authenticate(&state.orm, SECRET, &session.token).await?;
    Ok(Session { user, ..session })
}

pub async fn list_product(state: &AppState, seller: &AuthUser, name: &str, price: f64) -> anyhow::Result<Product> {
    let resp = product_service::create_product(
        state,
        seller,
        CreateProductRequest {
            name: name.into(),
            description: "Integration listing".into(),
            price,
            category: "tools".into(),
            images: None,
            location: "Lisbon".into(),
            availability: "Weekends".into(),
            renting: None,
        },
    )
    .await?;
    resp.data.context("created product")
}

pub fn order_request(product_id: &str, name: &str) -> CreateOrderRequest {
    CreateOrderRequest {
        items: vec![LineItemInput {
            product_id: Some(product_id.to_string()),
            name: name.to_string(),
            price: 100.0,
            rental_duration: None,
            rental_period: Some(2),
            quantity: None,
        }],
        address: AddressInput {
            label: "Home".into(),
            full_address: Some("123 Main St".into()),
            ..AddressInput::default()
        },
        subtotal: 200.0,
        tax: 16.0,
        total: 216.0,
        payment_method: None,
    }
}

pub fn card_payment(order_id: Uuid) -> ProcessPaymentRequest {
    ProcessPaymentRequest {
        order_id,
        payment_method: PaymentMethod::Card,
        card: Some(CardInput {
            card_number: "4242 4242 4242 4242".into(),
            expiry: "12/29".into(),
            cardholder: Some("Buyer".into()),
        }),
        paypal_email: None,
    }
}

/// Lists a fresh product for `seller` and orders it as `buyer` (total 216).
pub async fn place_order(state: &AppState, buyer: &AuthUser, seller: &AuthUser) -> anyhow::Result<(Uuid, String)> {
    let name = format!("Camping Tent {}", Uuid::new_v4());
    let product = list_product(state, seller, &name, 100.0).await?;
    let resp = order_service::create_order(state, buyer, order_request(&product.id.to_string(), &name)).await?;
    let created = resp.data.context("order data")?;
    Ok((created.order.id, name))
}
