use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use sea_orm::{ConnectionTrait, EntityTrait};
use uuid::Uuid;

use crate::{
    dto::auth::Claims,
    entity::users::{Entity as Users, Model as UserModel},
    error::{AppError, AppResult},
    models::{Role, UserStatus},
    state::AppState,
};

/// Header carrying the session token on protected requests.
pub const TOKEN_HEADER: &str = "x-auth-token";

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: Role,
    pub name: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    if !user.is_admin() {
        return Err(AppError::Unauthorized("Admin access required".into()));
    }
    Ok(())
}

/// Sign a session token for `user`, valid for `ttl_minutes`.
pub fn issue_token(secret: &str, ttl_minutes: i64, user: &UserModel) -> AppResult<String> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::minutes(ttl_minutes))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user.id.to_string(),
        role: user.role,
        name: user.name.clone(),
        iat: now.timestamp() as usize,
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub fn decode_token(secret: &str, token: &str) -> AppResult<Claims> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;
    Ok(decoded.claims)
}

/// Resolve a token to the acting user. The stored account, not the token,
/// decides role and ban state, so a ban takes effect on the next request.
pub async fn authenticate<C: ConnectionTrait>(
    conn: &C,
    secret: &str,
    token: &str,
) -> AppResult<AuthUser> {
    let claims = decode_token(secret, token)?;
    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid user id in token".into()))?;

    let user = Users::find_by_id(user_id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;

    if user.status == UserStatus::Banned {
        tracing::info!(user_id = %user.id, "rejected request from banned account");
        return Err(AppError::Forbidden("Account is banned".into()));
    }

    Ok(AuthUser {
        user_id: user.id,
        role: user.role,
        name: user.name,
    })
}

pub async fn require_admin<C: ConnectionTrait>(
    conn: &C,
    secret: &str,
    token: &str,
) -> AppResult<AuthUser> {
    let user = authenticate(conn, secret, token).await?;
    ensure_admin(&user)?;
    Ok(user)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(TOKEN_HEADER)
            .ok_or_else(|| AppError::Forbidden("Access denied, no token provided".into()))?;

        let token = header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid token header".into()))?
            .trim();
        let token = token.strip_prefix("Bearer ").unwrap_or(token);

        authenticate(&state.orm, &state.config.jwt_secret, token).await
    }
}
