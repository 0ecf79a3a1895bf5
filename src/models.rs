use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{notifications, order_items, orders, payments, products, reviews, users, wishlist};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[sea_orm(string_value = "customer")]
    Customer,
    #[sea_orm(string_value = "admin")]
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "banned")]
    Banned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    #[sea_orm(string_value = "local")]
    Local,
    #[sea_orm(string_value = "google")]
    Google,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "processing")]
    Processing,
    #[sea_orm(string_value = "paid")]
    Paid,
    #[sea_orm(string_value = "shipped")]
    Shipped,
    #[sea_orm(string_value = "delivered")]
    Delivered,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl OrderStatus {
    /// Delivered and cancelled orders never move again on a buyer's request.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[sea_orm(string_value = "card")]
    Card,
    #[sea_orm(string_value = "paypal")]
    Paypal,
    #[sea_orm(string_value = "pending")]
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "failed")]
    Failed,
    #[sea_orm(string_value = "refunded")]
    Refunded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum RentalUnit {
    #[sea_orm(string_value = "hours")]
    Hours,
    #[sea_orm(string_value = "days")]
    Days,
    #[sea_orm(string_value = "weeks")]
    Weeks,
    #[sea_orm(string_value = "months")]
    Months,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum AddressType {
    #[default]
    Home,
    Office,
    Other,
}

/// Rental price per duration unit. Units without a price are not offered.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromJsonQueryResult, ToSchema)]
pub struct RentingTable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weeks: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub months: Option<f64>,
}

impl RentingTable {
    pub fn daily(price: f64) -> Self {
        Self {
            days: Some(price),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.prices().all(|(_, price)| price.is_none())
    }

    pub fn price_for(&self, unit: RentalUnit) -> Option<f64> {
        match unit {
            RentalUnit::Hours => self.hours,
            RentalUnit::Days => self.days,
            RentalUnit::Weeks => self.weeks,
            RentalUnit::Months => self.months,
        }
    }

    pub fn prices(&self) -> impl Iterator<Item = (RentalUnit, Option<f64>)> {
        [
            (RentalUnit::Hours, self.hours),
            (RentalUnit::Days, self.days),
            (RentalUnit::Weeks, self.weeks),
            (RentalUnit::Months, self.months),
        ]
        .into_iter()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromJsonQueryResult, ToSchema)]
pub struct ImageList(pub Vec<String>);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Address {
    pub id: Uuid,
    pub label: String,
    pub address_type: AddressType,
    pub full_address: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromJsonQueryResult, ToSchema)]
pub struct AddressList(pub Vec<Address>);

/// Address copied onto an order at checkout. Later edits to the address
/// book never reach it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromJsonQueryResult, ToSchema)]
pub struct DeliveryAddress {
    pub label: String,
    pub address_type: AddressType,
    pub full_address: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromJsonQueryResult, ToSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PaymentDetails {
    Card {
        last4: String,
        expiry: String,
        cardholder: Option<String>,
    },
    Paypal {
        email: String,
    },
}

/// A user's addresses together with the designated default.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AddressBook {
    pub addresses: Vec<Address>,
    pub default_address_id: Option<Uuid>,
}

impl AddressBook {
    pub fn new(addresses: Vec<Address>, default_address_id: Option<Uuid>) -> Self {
        let mut book = Self {
            addresses,
            default_address_id,
        };
        // Drop a dangling default left behind by an earlier writer.
        if let Some(id) = book.default_address_id {
            if book.find(id).is_none() {
                book.default_address_id = book.addresses.first().map(|a| a.id);
            }
        }
        book
    }

    pub fn find(&self, id: Uuid) -> Option<&Address> {
        self.addresses.iter().find(|a| a.id == id)
    }

    pub fn default_address(&self) -> Option<&Address> {
        self.default_address_id.and_then(|id| self.find(id))
    }

    /// The first address added always becomes the default.
    pub fn add(&mut self, address: Address, make_default: bool) -> Uuid {
        let id = address.id;
        let first = self.addresses.is_empty();
        self.addresses.push(address);
        if first || make_default {
            self.default_address_id = Some(id);
        }
        id
    }

    pub fn update<F>(&mut self, id: Uuid, apply: F) -> Option<&Address>
    where
        F: FnOnce(&mut Address),
    {
        let address = self.addresses.iter_mut().find(|a| a.id == id)?;
        apply(address);
        Some(address)
    }

    /// Removing the default hands it to the first remaining address.
    pub fn remove(&mut self, id: Uuid) -> Option<Address> {
        let index = self.addresses.iter().position(|a| a.id == id)?;
        let removed = self.addresses.remove(index);
        if self.default_address_id == Some(id) {
            self.default_address_id = self.addresses.first().map(|a| a.id);
        }
        Some(removed)
    }

    pub fn set_default(&mut self, id: Uuid) -> bool {
        if self.find(id).is_none() {
            return false;
        }
        self.default_address_id = Some(id);
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ReviewStats {
    pub total_reviews: u64,
    pub average_rating: f64,
    pub rating_distribution: BTreeMap<u8, u64>,
}

impl ReviewStats {
    pub fn from_ratings(ratings: &[i32]) -> Self {
        let mut rating_distribution: BTreeMap<u8, u64> = (1..=5).map(|r| (r, 0)).collect();
        for rating in ratings {
            if let Ok(key) = u8::try_from(*rating) {
                if let Some(count) = rating_distribution.get_mut(&key) {
                    *count += 1;
                }
            }
        }

        let total_reviews = ratings.len() as u64;
        let average_rating = if ratings.is_empty() {
            0.0
        } else {
            let sum: i64 = ratings.iter().map(|r| i64::from(*r)).sum();
            let mean = sum as f64 / ratings.len() as f64;
            (mean * 10.0).round() / 10.0
        };

        Self {
            total_reviews,
            average_rating,
            rating_distribution,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub role: Role,
    pub status: UserStatus,
    pub auth_provider: AuthProvider,
    pub addresses: Vec<Address>,
    pub default_address_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            name: model.name,
            phone: model.phone,
            role: model.role,
            status: model.status,
            auth_provider: model.auth_provider,
            addresses: model.addresses.0,
            default_address_id: model.default_address_id,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub images: Vec<String>,
    pub location: String,
    pub availability: String,
    pub renting: RentingTable,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Self {
            id: model.id,
            seller_id: model.seller_id,
            name: model.name,
            description: model.description,
            price: model.price,
            category: model.category,
            images: model.images.0,
            location: model.location,
            availability: model.availability,
            renting: model.renting,
            is_featured: model.is_featured,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub delivery_address: DeliveryAddress,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<orders::Model> for Order {
    fn from(model: orders::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            delivery_address: model.delivery_address,
            subtotal: model.subtotal,
            tax: model.tax,
            total: model.total,
            status: model.status,
            payment_method: model.payment_method,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    /// `None` when the submitted id could not be parsed.
    pub product_id: Option<Uuid>,
    pub name: String,
    pub price: f64,
    pub rental_duration: RentalUnit,
    pub rental_period: i32,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

impl From<order_items::Model> for OrderItem {
    fn from(model: order_items::Model) -> Self {
        Self {
            id: model.id,
            order_id: model.order_id,
            product_id: model.product_id,
            name: model.name,
            price: model.price,
            rental_duration: model.rental_duration,
            rental_period: model.rental_period,
            quantity: model.quantity,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Payment {
    pub id: Uuid,
    pub order_id: Uuid,
    pub user_id: Uuid,
    pub amount: f64,
    pub method: PaymentMethod,
    pub details: PaymentDetails,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<payments::Model> for Payment {
    fn from(model: payments::Model) -> Self {
        Self {
            id: model.id,
            order_id: model.order_id,
            user_id: model.user_id,
            amount: model.amount,
            method: model.method,
            details: model.details,
            status: model.status,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Review {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    /// Author name as it was when the review was posted.
    pub user_name: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<reviews::Model> for Review {
    fn from(model: reviews::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            product_id: model.product_id,
            user_name: model.user_name,
            rating: model.rating,
            comment: model.comment,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WishlistEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<wishlist::Model> for WishlistEntry {
    fn from(model: wishlist::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            product_id: model.product_id,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<notifications::Model> for Notification {
    fn from(model: notifications::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            message: model.message,
            is_read: model.is_read,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(label: &str) -> Address {
        Address {
            id: Uuid::new_v4(),
            label: label.into(),
            address_type: AddressType::Home,
            full_address: format!("{label} street"),
            phone: "555-0100".into(),
        }
    }

    #[test]
    fn first_address_becomes_default() {
        let mut book = AddressBook::default();
        let id = book.add(address("home"), false);
        assert_eq!(book.default_address_id, Some(id));

        let second = book.add(address("office"), false);
        assert_eq!(book.default_address_id, Some(id));
        assert_ne!(second, id);
    }

    #[test]
    fn make_default_flag_moves_default() {
        let mut book = AddressBook::default();
        book.add(address("home"), false);
        let office = book.add(address("office"), true);
        assert_eq!(book.default_address_id, Some(office));
    }

    #[test]
    fn removing_default_reassigns_to_first_remaining() {
        let mut book = AddressBook::default();
        let home = book.add(address("home"), false);
        let office = book.add(address("office"), false);
        let other = book.add(address("other"), false);

        book.remove(home).expect("home removed");
        assert_eq!(book.default_address_id, Some(office));
        assert!(book.find(other).is_some());
    }

    #[test]
    fn removing_non_default_keeps_default() {
        let mut book = AddressBook::default();
        let home = book.add(address("home"), false);
        let office = book.add(address("office"), false);

        book.remove(office).expect("office removed");
        assert_eq!(book.default_address_id, Some(home));
    }

    #[test]
    fn removing_last_address_clears_default() {
        let mut book = AddressBook::default();
        let home = book.add(address("home"), false);
        book.remove(home).expect("home removed");
        assert!(book.addresses.is_empty());
        assert_eq!(book.default_address_id, None);
    }

    #[test]
    fn set_default_requires_known_id() {
        let mut book = AddressBook::default();
        let home = book.add(address("home"), false);
        let office = book.add(address("office"), false);

        assert!(!book.set_default(Uuid::new_v4()));
        assert_eq!(book.default_address_id, Some(home));
        assert!(book.set_default(office));
        assert_eq!(book.default_address().map(|a| a.id), Some(office));
    }

    #[test]
    fn update_touches_only_target() {
        let mut book = AddressBook::default();
        let home = book.add(address("home"), false);
        let office = book.add(address("office"), false);

        let updated = book
            .update(office, |a| a.label = "work".into())
            .expect("office exists");
        assert_eq!(updated.label, "work");
        assert_eq!(book.find(home).map(|a| a.label.as_str()), Some("home"));
        assert!(book.update(Uuid::new_v4(), |a| a.label.clear()).is_none());
    }

    #[test]
    fn dangling_default_is_repaired_on_load() {
        let home = address("home");
        let home_id = home.id;
        let book = AddressBook::new(vec![home], Some(Uuid::new_v4()));
        assert_eq!(book.default_address_id, Some(home_id));

        let empty = AddressBook::new(Vec::new(), Some(Uuid::new_v4()));
        assert_eq!(empty.default_address_id, None);
    }

    #[test]
    fn stats_for_single_five_star_review() {
        let stats = ReviewStats::from_ratings(&[5]);
        assert_eq!(stats.total_reviews, 1);
        assert_eq!(stats.average_rating, 5.0);
        assert_eq!(stats.rating_distribution.get(&5), Some(&1));
        for rating in 1..=4u8 {
            assert_eq!(stats.rating_distribution.get(&rating), Some(&0));
        }
    }

    #[test]
    fn stats_round_average_to_one_decimal() {
        let stats = ReviewStats::from_ratings(&[5, 4, 4]);
        assert_eq!(stats.average_rating, 4.3);

        let stats = ReviewStats::from_ratings(&[1, 2]);
        assert_eq!(stats.average_rating, 1.5);

        let stats = ReviewStats::from_ratings(&[5, 5, 4]);
        assert_eq!(stats.average_rating, 4.7);
    }

    #[test]
    fn stats_distribution_sums_to_total() {
        let ratings = [1, 2, 2, 3, 5, 5, 5, 4];
        let stats = ReviewStats::from_ratings(&ratings);
        let sum: u64 = stats.rating_distribution.values().sum();
        assert_eq!(sum, stats.total_reviews);
        assert_eq!(stats.rating_distribution.len(), 5);
    }

    #[test]
    fn stats_for_no_reviews() {
        let stats = ReviewStats::from_ratings(&[]);
        assert_eq!(stats.total_reviews, 0);
        assert_eq!(stats.average_rating, 0.0);
        assert!(stats.rating_distribution.values().all(|c| *c == 0));
    }

    #[test]
    fn renting_table_defaults_and_lookup() {
        let table = RentingTable::daily(100.0);
        assert_eq!(table.price_for(RentalUnit::Days), Some(100.0));
        assert_eq!(table.price_for(RentalUnit::Hours), None);
        assert!(!table.is_empty());
        assert!(RentingTable::default().is_empty());
    }

    #[test]
    fn renting_table_serializes_offered_units_only() {
        let json = serde_json::to_value(RentingTable::daily(40.0)).expect("serialize");
        assert_eq!(json, serde_json::json!({ "days": 40.0 }));
    }

    #[test]
    fn payment_details_are_tagged() {
        let details = PaymentDetails::Paypal {
            email: "buyer@example.com".into(),
        };
        let json = serde_json::to_value(&details).expect("serialize");
        assert_eq!(json["kind"], "paypal");
    }

    #[test]
    fn terminal_statuses() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Paid.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
    }
}
