use std::env;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub payment_success_rate: f64,
    pub payment_seed: Option<u64>,
    pub featured_limit: usize,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET is not set")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parse_env("APP_PORT").unwrap_or(3000);
        let max_connections = parse_env("DB_MAX_CONNECTIONS").unwrap_or(10);
        let token_ttl_minutes = parse_env("TOKEN_TTL_MINUTES").unwrap_or(60);
        let payment_success_rate = parse_env::<f64>("PAYMENT_SUCCESS_RATE")
            .unwrap_or(0.9)
            .clamp(0.0, 1.0);
        let payment_seed = parse_env("PAYMENT_SEED");
        let featured_limit = parse_env("FEATURED_LIMIT").unwrap_or(4);
        Ok(Self {
            port,
            database_url,
            host,
            max_connections,
            jwt_secret,
            token_ttl_minutes,
            payment_success_rate,
            payment_seed,
            featured_limit,
        })
    }

    /// Settings for tests and tools that build state by hand.
    pub fn for_database(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            max_connections: 5,
            jwt_secret: jwt_secret.into(),
            token_ttl_minutes: 60,
            payment_success_rate: 0.9,
            payment_seed: None,
            featured_limit: 4,
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse::<T>().ok())
}
