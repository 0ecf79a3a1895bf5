use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{AddressType, DeliveryAddress, Order, OrderItem, OrderStatus, PaymentMethod, RentalUnit},
};

/// Largest accepted gap between `total` and `subtotal + tax`.
pub const TOTAL_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LineItemInput {
    /// Kept as text: an id that does not parse is stored as null.
    pub product_id: Option<String>,
    pub name: String,
    pub price: f64,
    pub rental_duration: Option<RentalUnit>,
    pub rental_period: Option<i32>,
    pub quantity: Option<i32>,
}

impl LineItemInput {
    pub fn parsed_product_id(&self) -> Option<Uuid> {
        self.product_id
            .as_deref()
            .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
    }

    pub fn rental_duration(&self) -> RentalUnit {
        self.rental_duration.unwrap_or(RentalUnit::Days)
    }

    pub fn rental_period(&self) -> i32 {
        self.rental_period.unwrap_or(1)
    }

    pub fn quantity(&self) -> i32 {
        self.quantity.unwrap_or(1)
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct AddressInput {
    #[serde(default)]
    pub label: String,
    pub address_type: Option<AddressType>,
    pub full_address: Option<String>,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub items: Vec<LineItemInput>,
    pub address: AddressInput,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub payment_method: Option<PaymentMethod>,
}

impl CreateOrderRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.items.is_empty() {
            return Err(AppError::BadRequest("Order must contain at least one item".into()));
        }
        let full_address = self.address.full_address.as_deref().unwrap_or_default();
        if full_address.trim().is_empty() {
            return Err(AppError::BadRequest("Delivery address is required".into()));
        }
        for (index, item) in self.items.iter().enumerate() {
            if item.rental_period() < 1 || item.quantity() < 1 {
                return Err(AppError::BadRequest(format!(
                    "Item {index} must have a positive rental period and quantity"
                )));
            }
            if !item.price.is_finite() || item.price < 0.0 {
                return Err(AppError::BadRequest(format!("Item {index} has an invalid price")));
            }
        }
        let amounts = [self.subtotal, self.tax, self.total];
        if amounts.iter().any(|a| !a.is_finite() || *a < 0.0) {
            return Err(AppError::BadRequest("Order amounts must be zero or more".into()));
        }
        if (self.subtotal + self.tax - self.total).abs() > TOTAL_TOLERANCE {
            return Err(AppError::BadRequest(
                "Order total must equal subtotal plus tax".into(),
            ));
        }
        Ok(())
    }

    pub fn delivery_address(&self) -> DeliveryAddress {
        DeliveryAddress {
            label: self.address.label.clone(),
            address_type: self.address.address_type.unwrap_or_default(),
            full_address: self
                .address
                .full_address
                .clone()
                .unwrap_or_default()
                .trim()
                .to_string(),
            phone: self.address.phone.clone(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<OrderWithItems>,
}
