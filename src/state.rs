use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    config::AppConfig,
    gateway::{PaymentGateway, SimulatedGateway},
};

#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
    pub config: Arc<AppConfig>,
    pub gateway: Arc<dyn PaymentGateway>,
}

impl AppState {
    pub fn new(orm: DatabaseConnection, config: AppConfig) -> Self {
        let gateway = SimulatedGateway::new(config.payment_success_rate, config.payment_seed);
        Self::with_gateway(orm, config, Arc::new(gateway))
    }

    pub fn with_gateway(
        orm: DatabaseConnection,
        config: AppConfig,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            orm,
            config: Arc::new(config),
            gateway,
        }
    }
}
