use rental_marketplace_api::{
    config::AppConfig,
    db::{create_pool, run_migrations},
    dto::products::PLACEHOLDER_IMAGE,
    services::auth_service::hash_password,
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, config.max_connections).await?;
    run_migrations(&pool).await?;

    let admin_password =
        std::env::var("SEED_ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());
    let admin_id = ensure_user(&pool, "Admin", "admin@example.com", &admin_password, "admin").await?;
    let user_id = ensure_user(&pool, "Demo Renter", "user@example.com", "user123", "customer").await?;
    seed_products(&pool, user_id).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    name: &str,
    email: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    let password_hash = hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let (user_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, password_hash, name, role, status, auth_provider)
        VALUES ($1, $2, $3, $4, $5, 'active', 'local')
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role, status = 'active'
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .bind(name)
    .bind(role)
    .fetch_one(pool)
    .await?;

    println!("Ensured user {email} (role={role})");
    Ok(user_id)
}

async fn seed_products(pool: &sqlx::PgPool, seller_id: Uuid) -> anyhow::Result<()> {
    let products = [
        ("Cordless Drill", "18V drill with two batteries", 25.0, "tools", r#"{"hours":6,"days":25,"weeks":120}"#, true),
        ("Camping Tent", "Four-person dome tent", 40.0, "outdoor", r#"{"days":40,"weeks":200}"#, true),
        ("DSLR Camera", "24MP body with kit lens", 60.0, "electronics", r#"{"days":60}"#, false),
        ("Pressure Washer", "2000 PSI electric washer", 35.0, "tools", r#"{"hours":10,"days":35}"#, false),
        ("Stand-up Paddle Board", "Inflatable board with pump and paddle", 45.0, "outdoor", r#"{"days":45,"months":600}"#, false),
    ];

    let images = serde_json::json!([PLACEHOLDER_IMAGE]).to_string();
    for (name, description, price, category, renting, featured) in products {
        sqlx::query(
            r#"
            INSERT INTO products
                (id, seller_id, name, description, price, category, images, location, availability, renting, is_featured)
            SELECT $1, $2, $3, $4, $5, $6, $9::jsonb, 'Lisbon', 'Available', $7::jsonb, $8
            WHERE NOT EXISTS (SELECT 1 FROM products WHERE name = $3)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(seller_id)
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(category)
        .bind(renting)
        .bind(featured)
        .bind(&images)
        .execute(pool)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}
