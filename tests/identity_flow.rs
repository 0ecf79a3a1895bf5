mod common;

use rental_marketplace_api::{
    dto::auth::{GoogleSignInRequest, SignInRequest, SignUpRequest},
    error::AppError,
    gateway::Settlement,
    middleware::auth::authenticate,
    models::{AuthProvider, Role},
    services::{admin_service, auth_service},
    state::AppState,
};
use uuid::Uuid;

fn google(name: &str, email: &str) -> GoogleSignInRequest {
    GoogleSignInRequest {
        name: name.into(),
        email: email.into(),
        google_id: format!("google-{}", Uuid::new_v4()),
    }
}

async fn password_sign_in(state: &AppState, email: &str, password: &str) -> Result<(), AppError> {
    auth_service::sign_in(
        state,
        SignInRequest {
            email: email.into(),
            password: password.into(),
        },
    )
    .await
    .map(|_| ())
}

#[tokio::test]
async fn password_sign_up_and_sign_in_rules() -> anyhow::Result<()> {
    let Some(state) = common::setup_state(Settlement::Approved).await? else {
        return Ok(());
    };
    let renter = common::register(&state, "Renter").await?;

    // Emails are compared case-insensitively.
    let duplicate = auth_service::sign_up(
        &state,
        SignUpRequest {
            name: "Copycat".into(),
            email: renter.email.to_uppercase(),
            password: common::PASSWORD.into(),
            phone: None,
            role: None,
        },
    )
    .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    let self_admin = auth_service::sign_up(
        &state,
        SignUpRequest {
            name: "Climber".into(),
            email: format!("climber+{}@example.com", Uuid::new_v4()),
            password: common::PASSWORD.into(),
            phone: None,
            role: Some(Role::Admin),
        },
    )
    .await;
    assert!(matches!(self_admin, Err(AppError::Forbidden(_))));

    let wrong = password_sign_in(&state, &renter.email, "not-the-password").await;
    assert!(matches!(wrong, Err(AppError::Unauthorized(_))));

    let unknown = password_sign_in(&state, &format!("ghost+{}@example.com", Uuid::new_v4()), common::PASSWORD).await;
    assert!(matches!(unknown, Err(AppError::NotFound(_))));

    password_sign_in(&state, &renter.email, common::PASSWORD).await?;
    Ok(())
}

#[tokio::test]
async fn google_sign_in_creates_then_reuses_account() -> anyhow::Result<()> {
    let Some(state) = common::setup_state(Settlement::Approved).await? else {
        return Ok(());
    };
    let email = format!("hiker+{}@example.com", Uuid::new_v4());
    let request = google("Hiker", &email);
    let google_id = request.google_id.clone();

    let first = auth_service::google_sign_in(&state, request)
        .await?
        .data
        .expect("session");
    assert_eq!(first.user.auth_provider, AuthProvider::Google);
    assert_eq!(first.user.role, Role::Customer);
    let resolved = authenticate(&state.orm, common::SECRET, &first.token).await?;
    assert_eq!(resolved.user_id, first.user.id);

    let again = auth_service::google_sign_in(
        &state,
        GoogleSignInRequest {
            name: "Hiker".into(),
            email: email.clone(),
            google_id,
        },
    )
    .await?
    .data
    .expect("session");
    assert_eq!(again.user.id, first.user.id);

    // Google-only accounts have no password to check.
    let with_password = password_sign_in(&state, &email, common::PASSWORD).await;
    assert!(matches!(with_password, Err(AppError::Unauthorized(_))));

    Ok(())
}

#[tokio::test]
async fn google_sign_in_links_local_account() -> anyhow::Result<()> {
    let Some(state) = common::setup_state(Settlement::Approved).await? else {
        return Ok(());
    };
    let renter = common::register(&state, "Renter").await?;

    let linked = auth_service::google_sign_in(&state, google("Renter", &renter.email))
        .await?
        .data
        .expect("session");
    assert_eq!(linked.user.id, renter.user.user_id);
    assert_eq!(linked.user.auth_provider, AuthProvider::Local);

    // The local password keeps working after linking.
    password_sign_in(&state, &renter.email, common::PASSWORD).await?;
    Ok(())
}

#[tokio::test]
async fn banned_account_cannot_use_google() -> anyhow::Result<()> {
    let Some(state) = common::setup_state(Settlement::Approved).await? else {
        return Ok(());
    };
    let admin = common::register_admin(&state, "Moderator").await?;
    let renter = common::register(&state, "Renter").await?;
    admin_service::ban_user(&state, &admin.user, renter.user.user_id).await?;

    let blocked = auth_service::google_sign_in(&state, google("Renter", &renter.email)).await;
    assert!(matches!(blocked, Err(AppError::Forbidden(_))));

    admin_service::unban_user(&state, &admin.user, renter.user.user_id).await?;
    auth_service::google_sign_in(&state, google("Renter", &renter.email)).await?;
    Ok(())
}
