use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Validator, is_valid_email};
use crate::{
    error::AppError,
    models::{Role, User},
};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Deserialize, Debug, ToSchema)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub role: Option<Role>,
}

impl SignUpRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        Validator::new()
            .not_blank(&self.name, "name")
            .check(is_valid_email(&self.email), "email", "must be a valid email")
            .check(
                self.password.chars().count() >= MIN_PASSWORD_LEN,
                "password",
                "must be at least 6 characters",
            )
            .finish()
    }
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct GoogleSignInRequest {
    pub name: String,
    pub email: String,
    pub google_id: String,
}

impl GoogleSignInRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        Validator::new()
            .check(is_valid_email(&self.email), "email", "must be a valid email")
            .not_blank(&self.google_id, "google_id")
            .finish()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub name: String,
    pub iat: usize,
    pub exp: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_rejects_short_password_and_bad_email() {
        let req = SignUpRequest {
            name: "Ana".into(),
            email: "ana".into(),
            password: "123".into(),
            phone: None,
            role: None,
        };
        match req.validate() {
            Err(AppError::Validation(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn signup_accepts_complete_input() {
        let req = SignUpRequest {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password: "secret1".into(),
            phone: Some("555".into()),
            role: Some(Role::Customer),
        };
        assert!(req.validate().is_ok());
    }
}
