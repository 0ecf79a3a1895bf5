use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Validator, is_valid_email};
use crate::{
    error::AppError,
    models::{Order, Payment, PaymentDetails, PaymentMethod},
};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CardInput {
    pub card_number: String,
    pub expiry: String,
    pub cardholder: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProcessPaymentRequest {
    pub order_id: Uuid,
    pub payment_method: PaymentMethod,
    pub card: Option<CardInput>,
    pub paypal_email: Option<String>,
}

impl ProcessPaymentRequest {
    /// Validated, storable details. Only the last four card digits survive.
    pub fn details(&self) -> Result<PaymentDetails, AppError> {
        match self.payment_method {
            PaymentMethod::Card => {
                let Some(card) = &self.card else {
                    return Err(AppError::Validation(vec![crate::error::FieldError::new(
                        "card",
                        "card details are required",
                    )]));
                };
                let digits: String = card
                    .card_number
                    .chars()
                    .filter(|c| !c.is_whitespace() && *c != '-')
                    .collect();
                Validator::new()
                    .check(
                        (12..=19).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit()),
                        "card.card_number",
                        "must be 12 to 19 digits",
                    )
                    .not_blank(&card.expiry, "card.expiry")
                    .finish()?;
                let last4 = digits[digits.len() - 4..].to_string();
                Ok(PaymentDetails::Card {
                    last4,
                    expiry: card.expiry.trim().to_string(),
                    cardholder: card.cardholder.clone(),
                })
            }
            PaymentMethod::Paypal => {
                let email = self.paypal_email.as_deref().unwrap_or_default();
                Validator::new()
                    .check(is_valid_email(email), "paypal_email", "must be a valid email")
                    .finish()?;
                Ok(PaymentDetails::Paypal {
                    email: email.trim().to_string(),
                })
            }
            PaymentMethod::Pending => Err(AppError::BadRequest(
                "payment_method must be card or paypal".into(),
            )),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentResult {
    pub payment: Payment,
    /// Present when the charge went through.
    pub order: Option<Order>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_request(number: &str) -> ProcessPaymentRequest {
        ProcessPaymentRequest {
            order_id: Uuid::new_v4(),
            payment_method: PaymentMethod::Card,
            card: Some(CardInput {
                card_number: number.into(),
                expiry: "12/29".into(),
                cardholder: Some("A Renter".into()),
            }),
            paypal_email: None,
        }
    }

    #[test]
    fn card_number_is_masked_to_last_four() {
        let details = card_request("4242 4242 4242 4242").details().expect("valid");
        assert_eq!(
            details,
            PaymentDetails::Card {
                last4: "4242".into(),
                expiry: "12/29".into(),
                cardholder: Some("A Renter".into()),
            }
        );
    }

    #[test]
    fn malformed_card_is_rejected() {
        assert!(matches!(
            card_request("4242").details(),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            card_request("4242-4242-4242-abcd").details(),
            Err(AppError::Validation(_))
        ));
        let missing = ProcessPaymentRequest {
            card: None,
            ..card_request("4242424242424242")
        };
        assert!(matches!(missing.details(), Err(AppError::Validation(_))));
    }

    #[test]
    fn paypal_needs_email() {
        let req = ProcessPaymentRequest {
            order_id: Uuid::new_v4(),
            payment_method: PaymentMethod::Paypal,
            card: None,
            paypal_email: Some("buyer@example.com".into()),
        };
        assert_eq!(
            req.details().expect("valid"),
            PaymentDetails::Paypal {
                email: "buyer@example.com".into()
            }
        );

        let bad = ProcessPaymentRequest {
            paypal_email: None,
            ..req
        };
        assert!(bad.details().is_err());
    }

    #[test]
    fn pending_is_not_a_payment_method() {
        let req = ProcessPaymentRequest {
            payment_method: PaymentMethod::Pending,
            ..card_request("4242424242424242")
        };
        assert!(matches!(req.details(), Err(AppError::BadRequest(_))));
    }
}
