use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod checkout;
pub mod doc;
pub mod health;
pub mod notifications;
pub mod oauth;
pub mod params;
pub mod payments;
pub mod products;
pub mod reviews;
pub mod users;
pub mod wishlist;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/user", users::router())
        .nest("/oauth", oauth::router())
        .nest("/product", products::router())
        .nest("/review", reviews::router())
        .nest("/checkout", checkout::router())
        .nest("/payment", payments::router())
        .nest("/wishlist", wishlist::router())
        .nest("/notifications", notifications::router())
        .nest("/admin", admin::router())
}
