use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::Validator;
use crate::{error::AppError, models::Review};

fn rating_in_range(rating: i32) -> bool {
    (1..=5).contains(&rating)
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReviewRequest {
    pub product_id: Uuid,
    pub rating: i32,
    pub comment: String,
}

impl CreateReviewRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        Validator::new()
            .check(rating_in_range(self.rating), "rating", "must be between 1 and 5")
            .not_blank(&self.comment, "comment")
            .finish()
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateReviewRequest {
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

impl UpdateReviewRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut v = Validator::new();
        if let Some(rating) = self.rating {
            v.check(rating_in_range(rating), "rating", "must be between 1 and 5");
        }
        if let Some(comment) = &self.comment {
            v.not_blank(comment, "comment");
        }
        v.finish()
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ReviewList {
    #[schema(value_type = Vec<Review>)]
    pub items: Vec<Review>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds() {
        for rating in [0, 6, -1] {
            let req = CreateReviewRequest {
                product_id: Uuid::new_v4(),
                rating,
                comment: "fine".into(),
            };
            assert!(req.validate().is_err(), "rating {rating} accepted");
        }
        for rating in 1..=5 {
            let req = CreateReviewRequest {
                product_id: Uuid::new_v4(),
                rating,
                comment: "fine".into(),
            };
            assert!(req.validate().is_ok());
        }
    }

    #[test]
    fn partial_update_only_checks_supplied_fields() {
        assert!(UpdateReviewRequest::default().validate().is_ok());
        let req = UpdateReviewRequest {
            rating: Some(9),
            comment: None,
        };
        assert!(req.validate().is_err());
    }
}
