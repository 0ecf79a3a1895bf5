use anyhow::Result;
use sea_orm::{DatabaseConnection, SqlxPostgresConnector};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

pub type DbPool = PgPool;

/// Create the sqlx pool backing every connection in the service.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Apply the SQL files in `migrations/`, embedded at compile time.
pub async fn run_migrations(pool: &DbPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Wrap an existing pool in a SeaORM connection.
pub fn create_orm_conn(pool: DbPool) -> DatabaseConnection {
    SqlxPostgresConnector::from_sqlx_postgres_pool(pool)
}

/// Pool, migrations and ORM connection in one step.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<DatabaseConnection> {
    let pool = create_pool(database_url, max_connections).await?;
    run_migrations(&pool).await?;
    Ok(create_orm_conn(pool))
}
