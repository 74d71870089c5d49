use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    entity::categories::{ActiveModel, Column, Entity as Categories, Model as CategoryModel},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Category,
    policy::{Action, Resource, ensure_allowed},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};
use crate::dto::catalog::{CategoryList, CreateCategoryRequest, UpdateCategoryRequest};

pub async fn list_categories(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<CategoryList>> {
    ensure_allowed(user, Resource::Categories, Action::Read)?;
    let (page, limit, offset) = pagination.normalize();

    let finder = Categories::find()
        .filter(Column::TenantId.eq(user.tenant_id))
        .order_by_asc(Column::Sequence)
        .order_by_asc(Column::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(category_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Categories", CategoryList { items }, Some(meta)))
}

pub async fn get_category(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Category>> {
    ensure_allowed(user, Resource::Categories, Action::Read)?;
    let category = find_scoped(state, user, id).await?;
    Ok(ApiResponse::success("Category", category_from_entity(category), None))
}

pub async fn create_category(
    state: &AppState,
    user: &AuthUser,
    payload: CreateCategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    ensure_allowed(user, Resource::Categories, Action::Create)?;

    let id = match payload.id {
        Some(id) => {
            let exist = Categories::find_by_id(id).one(&state.orm).await?;
            if exist.is_some() {
                return Err(AppError::Conflict("Category id already exists".into()));
            }
            id
        }
        None => Uuid::new_v4(),
    };

    let active = ActiveModel {
        id: Set(id),
        tenant_id: Set(user.tenant_id),
        name: Set(payload.name),
        sequence: Set(payload.sequence.unwrap_or(0)),
        created_at: NotSet,
    };
    let category = active.insert(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.tenant_id),
        Some(user.user_id),
        "category_create",
        Some("categories"),
        Some(serde_json::json!({ "category_id": category.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Category created",
        category_from_entity(category),
        Some(Meta::empty()),
    ))
}

pub async fn update_category(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateCategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    ensure_allowed(user, Resource::Categories, Action::Update)?;
    let existing = find_scoped(state, user, id).await?;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(sequence) = payload.sequence {
        active.sequence = Set(sequence);
    }
    let category = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.tenant_id),
        Some(user.user_id),
        "category_update",
        Some("categories"),
        Some(serde_json::json!({ "category_id": category.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Updated",
        category_from_entity(category),
        Some(Meta::empty()),
    ))
}

pub async fn delete_category(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_allowed(user, Resource::Categories, Action::Delete)?;

    let result = Categories::delete_many()
        .filter(Column::Id.eq(id))
        .filter(Column::TenantId.eq(user.tenant_id))
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.tenant_id),
        Some(user.user_id),
        "category_delete",
        Some("categories"),
        Some(serde_json::json!({ "category_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

async fn find_scoped(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<CategoryModel> {
    let category = Categories::find()
        .filter(Column::Id.eq(id))
        .filter(Column::TenantId.eq(user.tenant_id))
        .one(&state.orm)
        .await?;
    match category {
        Some(c) => Ok(c),
        None => Err(AppError::NotFound),
    }
}

fn category_from_entity(model: CategoryModel) -> Category {
    Category {
        id: model.id,
        tenant_id: model.tenant_id,
        name: model.name,
        sequence: model.sequence,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
