pub mod addresses;
pub mod admin;
pub mod auth;
pub mod notifications;
pub mod orders;
pub mod payments;
pub mod products;
pub mod reviews;
pub mod users;
pub mod wishlist;

use crate::error::{AppError, FieldError};

/// Collects field errors and turns them into a single `Validation` error.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, ok: bool, field: &str, message: &str) -> &mut Self {
        if !ok {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    pub fn not_blank(&mut self, value: &str, field: &str) -> &mut Self {
        self.check(!value.trim().is_empty(), field, "must not be empty")
    }

    pub fn finish(&mut self) -> Result<(), AppError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(std::mem::take(&mut self.errors)))
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email(" renter@example.com "));
        assert!(!is_valid_email("missing-at.example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("a@localhost"));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email("a@.com"));
    }

    #[test]
    fn validator_enumerates_every_failed_field() {
        let err = Validator::new()
            .not_blank("", "name")
            .not_blank("ok", "label")
            .check(false, "rating", "must be between 1 and 5")
            .finish()
            .unwrap_err();
        match err {
            AppError::Validation(errors) => {
                let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, ["name", "rating"]);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
