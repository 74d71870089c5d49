use argon2::{
    Argon2, PasswordHasher,
    password_hash::{rand_core::OsRng, SaltString},
};
use axum_pos_api::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let pool = create_pool(&config.database_url).await?;

    let tenant_id = ensure_tenant(&pool, "Demo Coffee", "demo-coffee").await?;
    let admin_id = ensure_user(&pool, tenant_id, "admin", "admin123", "admin").await?;
    let cashier_id = ensure_user(&pool, tenant_id, "cashier", "cashier123", "cashier").await?;
    seed_catalog(&pool, tenant_id).await?;

    println!(
        "Seed completed. Tenant: {tenant_id}, Admin: {admin_id}, Cashier: {cashier_id}"
    );
    Ok(())
}

async fn ensure_tenant(pool: &sqlx::PgPool, name: &str, slug: &str) -> anyhow::Result<Uuid> {
    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        INSERT INTO tenants (id, name, slug)
        VALUES ($1, $2, $3)
        ON CONFLICT (slug) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(slug)
    .fetch_optional(pool)
    .await?;

    let tenant_id = match row {
        Some((id,)) => id,
        None => {
            let existing: (Uuid,) = sqlx::query_as("SELECT id FROM tenants WHERE slug = $1")
                .bind(slug)
                .fetch_one(pool)
                .await?;
            existing.0
        }
    };

    println!("Ensured tenant {slug}");
    Ok(tenant_id)
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    tenant_id: Uuid,
    username: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        INSERT INTO users (id, tenant_id, username, password_hash, role)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (tenant_id, username) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(tenant_id)
    .bind(username)
    .bind(password_hash)
    .bind(role)
    .fetch_optional(pool)
    .await?;

    let user_id = match row {
        Some((id,)) => id,
        None => {
            let existing: (Uuid,) =
                sqlx::query_as("SELECT id FROM users WHERE tenant_id = $1 AND username = $2")
                    .bind(tenant_id)
                    .bind(username)
                    .fetch_one(pool)
                    .await?;
            existing.0
        }
    };

    println!("Ensured user {username} (role={role})");
    Ok(user_id)
}

async fn seed_catalog(pool: &sqlx::PgPool, tenant_id: Uuid) -> anyhow::Result<()> {
    let category_id = Uuid::new_v4();
    let existing: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM categories WHERE tenant_id = $1 AND name = $2")
            .bind(tenant_id)
            .bind("Coffee")
            .fetch_optional(pool)
            .await?;
    let category_id = match existing {
        Some((id,)) => id,
        None => {
            sqlx::query("INSERT INTO categories (id, tenant_id, name, sequence) VALUES ($1, $2, $3, 1)")
                .bind(category_id)
                .bind(tenant_id)
                .bind("Coffee")
                .execute(pool)
                .await?;
            category_id
        }
    };

    let products = vec![
        ("Americano", 18000_i64),
        ("Cafe Latte", 22000_i64),
        ("Cappuccino", 23000_i64),
        ("Es Kopi Susu", 20000_i64),
    ];

    for (name, price) in products {
        let exists: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM products WHERE tenant_id = $1 AND name = $2")
                .bind(tenant_id)
                .bind(name)
                .fetch_optional(pool)
                .await?;
        if exists.is_none() {
            sqlx::query(
                "INSERT INTO products (id, tenant_id, category_id, name, price) VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(Uuid::new_v4())
            .bind(tenant_id)
            .bind(category_id)
            .bind(name)
            .bind(price)
            .execute(pool)
            .await?;
        }
    }

    println!("Seeded catalog");
    Ok(())
}
