pub mod audit_logs;
pub mod notifications;
pub mod order_items;
pub mod orders;
pub mod payments;
pub mod products;
pub mod reviews;
pub mod users;
pub mod wishlist;

pub use audit_logs::Entity as AuditLogs;
pub use notifications::Entity as Notifications;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use payments::Entity as Payments;
pub use products::Entity as Products;
pub use reviews::Entity as Reviews;
pub use users::Entity as Users;
pub use wishlist::Entity as Wishlist;
