use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{OrderStatus, User};

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    pub user_count: u64,
    pub product_count: u64,
    pub order_count: u64,
    pub total_revenue: f64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct UserList {
    #[schema(value_type = Vec<User>)]
    pub items: Vec<User>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetFeaturedRequest {
    pub product_ids: Vec<Uuid>,
}
