use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Validator;
use crate::{
    error::AppError,
    models::{Product, RentingTable, Review, ReviewStats},
};

pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/600x400?text=No+Image";

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub category: String,
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub availability: String,
    pub renting: Option<RentingTable>,
}

impl CreateProductRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let renting_ok = self
            .renting
            .as_ref()
            .is_none_or(|table| table.prices().all(|(_, p)| p.is_none_or(|p| p >= 0.0)));
        Validator::new()
            .not_blank(&self.name, "name")
            .check(self.price.is_finite() && self.price >= 0.0, "price", "must be zero or more")
            .check(renting_ok, "renting", "prices must be zero or more")
            .finish()
    }

    /// Daily pricing at the base price when no table was given.
    pub fn renting_or_default(&self) -> RentingTable {
        match &self.renting {
            Some(table) if !table.is_empty() => table.clone(),
            _ => RentingTable::daily(self.price),
        }
    }

    pub fn images_or_default(&self) -> Vec<String> {
        let images: Vec<String> = self
            .images
            .iter()
            .flatten()
            .filter(|url| !url.trim().is_empty())
            .cloned()
            .collect();
        if images.is_empty() {
            vec![PLACEHOLDER_IMAGE.to_string()]
        } else {
            images
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub images: Option<Vec<String>>,
    pub location: Option<String>,
    pub availability: Option<String>,
    pub renting: Option<RentingTable>,
}

impl UpdateProductRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut v = Validator::new();
        if let Some(name) = &self.name {
            v.not_blank(name, "name");
        }
        if let Some(price) = self.price {
            v.check(price.is_finite() && price >= 0.0, "price", "must be zero or more");
        }
        if let Some(images) = &self.images {
            v.check(!images.is_empty(), "images", "must contain at least one url");
        }
        v.finish()
    }
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDetail {
    pub product: Product,
    pub stats: ReviewStats,
    pub recent_reviews: Vec<Review>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateProductRequest {
        CreateProductRequest {
            name: "Cordless drill".into(),
            description: "18V".into(),
            price: 100.0,
            category: "tools".into(),
            images: None,
            location: "Lisbon".into(),
            availability: "weekends".into(),
            renting: None,
        }
    }

    #[test]
    fn renting_defaults_to_daily_base_price() {
        let req = request();
        assert_eq!(req.renting_or_default(), RentingTable::daily(100.0));

        let empty = CreateProductRequest {
            renting: Some(RentingTable::default()),
            ..request()
        };
        assert_eq!(empty.renting_or_default(), RentingTable::daily(100.0));
    }

    #[test]
    fn explicit_renting_table_is_kept() {
        let table = RentingTable {
            hours: Some(15.0),
            weeks: Some(400.0),
            ..RentingTable::default()
        };
        let req = CreateProductRequest {
            renting: Some(table.clone()),
            ..request()
        };
        assert_eq!(req.renting_or_default(), table);
    }

    #[test]
    fn images_fall_back_to_placeholder() {
        assert_eq!(request().images_or_default(), vec![PLACEHOLDER_IMAGE.to_string()]);
        let blank = CreateProductRequest {
            images: Some(vec!["  ".into()]),
            ..request()
        };
        assert_eq!(blank.images_or_default(), vec![PLACEHOLDER_IMAGE.to_string()]);
        let given = CreateProductRequest {
            images: Some(vec!["https://img/1.jpg".into()]),
            ..request()
        };
        assert_eq!(given.images_or_default(), vec!["https://img/1.jpg".to_string()]);
    }

    #[test]
    fn negative_prices_are_rejected() {
        let req = CreateProductRequest {
            price: -1.0,
            renting: Some(RentingTable {
                days: Some(-5.0),
                ..RentingTable::default()
            }),
            ..request()
        };
        match req.validate() {
            Err(AppError::Validation(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected {other:?}"),
        }
    }
}
