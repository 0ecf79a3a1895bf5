use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::Utc;
use password_hash::rand_core::OsRng;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::{
    audit,
    dto::auth::{AuthResponse, GoogleSignInRequest, SignInRequest, SignUpRequest},
    entity::users::{ActiveModel as UserActive, Column as UserCol, Entity as Users, Model as UserModel},
    error::{AppError, AppResult, conflict_on_unique},
    middleware::auth::issue_token,
    models::{AddressList, AuthProvider, Role, User, UserStatus},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

async fn find_by_email(state: &AppState, email: &str) -> AppResult<Option<UserModel>> {
    let user = Users::find()
        .filter(UserCol::Email.eq(email))
        .one(&state.orm)
        .await?;
    Ok(user)
}

fn session(state: &AppState, user: UserModel) -> AppResult<AuthResponse> {
    let token = issue_token(
        &state.config.jwt_secret,
        state.config.token_ttl_minutes,
        &user,
    )?;
    Ok(AuthResponse {
        token,
        user: user.into(),
    })
}

pub async fn sign_up(state: &AppState, payload: SignUpRequest) -> AppResult<ApiResponse<User>> {
    payload.validate()?;
    if payload.role == Some(Role::Admin) {
        return Err(AppError::Forbidden(
            "Admin accounts cannot be self-registered".into(),
        ));
    }

    let email = normalize_email(&payload.email);
    if find_by_email(state, &email).await?.is_some() {
        return Err(AppError::Conflict("Email is already registered".into()));
    }

    let password_hash = hash_password(&payload.password)?;
    let now = Utc::now();
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(email),
        password_hash: Set(Some(password_hash)),
        name: Set(payload.name.trim().to_string()),
        phone: Set(payload.phone.filter(|p| !p.trim().is_empty())),
        role: Set(Role::Customer),
        status: Set(UserStatus::Active),
        addresses: Set(AddressList::default()),
        default_address_id: Set(None),
        google_id: Set(None),
        auth_provider: Set(AuthProvider::Local),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.orm)
    .await
    .map_err(|err| conflict_on_unique(err, "Email is already registered"))?;

    tracing::info!(user_id = %user.id, "user signed up");
    audit::record(
        &state.orm,
        Some(user.id),
        "user_signup",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success("User created", user.into(), Some(Meta::empty())))
}

pub async fn sign_in(
    state: &AppState,
    payload: SignInRequest,
) -> AppResult<ApiResponse<AuthResponse>> {
    let email = normalize_email(&payload.email);
    let user = find_by_email(state, &email)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;

    if user.status == UserStatus::Banned {
        return Err(AppError::Forbidden("Account is banned".into()));
    }

    let Some(hash) = user.password_hash.as_deref() else {
        return Err(AppError::Unauthorized(
            "This account signs in with Google".into(),
        ));
    };
    if !verify_password(&payload.password, hash)? {
        return Err(AppError::Unauthorized("Invalid email or password".into()));
    }

    audit::record(
        &state.orm,
        Some(user.id),
        "user_signin",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Signed in",
        session(state, user)?,
        Some(Meta::empty()),
    ))
}

/// Sign in with an identity already verified by Google on the client.
pub async fn google_sign_in(
    state: &AppState,
    payload: GoogleSignInRequest,
) -> AppResult<ApiResponse<AuthResponse>> {
    payload.validate()?;
    let email = normalize_email(&payload.email);
    let google_id = payload.google_id.trim().to_string();

    let user = match find_by_email(state, &email).await? {
        Some(user) if user.status == UserStatus::Banned => {
            return Err(AppError::Forbidden("Account is banned".into()));
        }
        Some(user) if user.google_id.is_none() => {
            let mut active: UserActive = user.into();
            active.google_id = Set(Some(google_id));
            active.updated_at = Set(Utc::now().into());
            let linked = active.update(&state.orm).await?;
            tracing::info!(user_id = %linked.id, "linked google account");
            linked
        }
        Some(user) => user,
        None => {
            let now = Utc::now();
            let name = if payload.name.trim().is_empty() {
                email.split('@').next().unwrap_or_default().to_string()
            } else {
                payload.name.trim().to_string()
            };
            let created = UserActive {
                id: Set(Uuid::new_v4()),
                email: Set(email),
                password_hash: Set(None),
                name: Set(name),
                phone: Set(None),
                role: Set(Role::Customer),
                status: Set(UserStatus::Active),
                addresses: Set(AddressList::default()),
                default_address_id: Set(None),
                google_id: Set(Some(google_id)),
                auth_provider: Set(AuthProvider::Google),
                created_at: Set(now.into()),
                updated_at: Set(now.into()),
            }
            .insert(&state.orm)
            .await
            .map_err(|err| conflict_on_unique(err, "Email is already registered"))?;
            tracing::info!(user_id = %created.id, "user created from google sign-in");
            created
        }
    };

    audit::record(
        &state.orm,
        Some(user.id),
        "user_google_signin",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Signed in",
        session(state, user)?,
        Some(Meta::empty()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("hunter22").expect("hash");
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("hunter22", &hash).expect("verify"));
        assert!(!verify_password("hunter23", &hash).expect("verify"));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same").expect("hash");
        let b = hash_password("same").expect("hash");
        assert_ne!(a, b);
    }

    #[test]
    fn emails_are_normalized() {
        assert_eq!(normalize_email("  Renter@Example.COM "), "renter@example.com");
    }
}
