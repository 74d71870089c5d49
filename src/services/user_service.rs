use argon2::{
    Argon2, PasswordHasher,
    password_hash::SaltString,
};
use password_hash::rand_core::OsRng;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    db::DbPool,
    dto::auth::{CreateUserRequest, UserList},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::User,
    policy::{Action, Resource, ROLE_ADMIN, ROLE_CASHIER, ensure_allowed},
    response::{ApiResponse, Meta},
    services::auth_service::UserRow,
};

pub async fn create_user(
    pool: &DbPool,
    user: &AuthUser,
    payload: CreateUserRequest,
) -> AppResult<ApiResponse<User>> {
    ensure_allowed(user, Resource::Users, Action::Create)?;

    let CreateUserRequest {
        username,
        password,
        role,
    } = payload;

    if role != ROLE_ADMIN && role != ROLE_CASHIER {
        return Err(AppError::BadRequest("Invalid role".into()));
    }
    if username.trim().is_empty() {
        return Err(AppError::BadRequest("Username must not be empty".into()));
    }

    let exist: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM users WHERE tenant_id = $1 AND username = $2")
            .bind(user.tenant_id)
            .bind(username.as_str())
            .fetch_optional(pool)
            .await?;

    if exist.is_some() {
        return Err(AppError::Conflict("Username is already taken".into()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();

    let id = Uuid::new_v4();

    let row: UserRow = sqlx::query_as(
        "INSERT INTO users (id, tenant_id, username, password_hash, role) VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(id)
    .bind(user.tenant_id)
    .bind(username.as_str())
    .bind(password_hash)
    .bind(role.as_str())
    .fetch_one(pool)
    .await?;

    let created = row.into_user();

    if let Err(err) = log_audit(
        pool,
        Some(user.tenant_id),
        Some(user.user_id),
        "user_create",
        Some("users"),
        Some(serde_json::json!({ "created_user_id": created.id, "role": created.role })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success("User created", created, None))
}

pub async fn list_users(pool: &DbPool, user: &AuthUser) -> AppResult<ApiResponse<UserList>> {
    ensure_allowed(user, Resource::Users, Action::Read)?;

    let rows: Vec<UserRow> =
        sqlx::query_as("SELECT * FROM users WHERE tenant_id = $1 ORDER BY created_at")
            .bind(user.tenant_id)
            .fetch_all(pool)
            .await?;

    let items = rows.into_iter().map(UserRow::into_user).collect();

    Ok(ApiResponse::success(
        "Users",
        UserList { items },
        Some(Meta::empty()),
    ))
}
