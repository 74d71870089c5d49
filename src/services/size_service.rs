use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    entity::sizes::{ActiveModel, Column, Entity as Sizes, Model as SizeModel},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Size,
    policy::{Action, Resource, ensure_allowed},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};
use crate::dto::catalog::{CreateSizeRequest, SizeList, UpdateSizeRequest};

pub async fn list_sizes(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<SizeList>> {
    ensure_allowed(user, Resource::Sizes, Action::Read)?;
    let (page, limit, offset) = pagination.normalize();

    let finder = Sizes::find()
        .filter(Column::TenantId.eq(user.tenant_id))
        .order_by_asc(Column::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(size_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Sizes", SizeList { items }, Some(meta)))
}

pub async fn get_size(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<ApiResponse<Size>> {
    ensure_allowed(user, Resource::Sizes, Action::Read)?;
    let size = find_scoped(state, user, id).await?;
    Ok(ApiResponse::success("Size", size_from_entity(size), None))
}

pub async fn create_size(
    state: &AppState,
    user: &AuthUser,
    payload: CreateSizeRequest,
) -> AppResult<ApiResponse<Size>> {
    ensure_allowed(user, Resource::Sizes, Action::Create)?;

    let id = match payload.id {
        Some(id) => {
            let exist = Sizes::find_by_id(id).one(&state.orm).await?;
            if exist.is_some() {
                return Err(AppError::Conflict("Size id already exists".into()));
            }
            id
        }
        None => Uuid::new_v4(),
    };

    let active = ActiveModel {
        id: Set(id),
        tenant_id: Set(user.tenant_id),
        name: Set(payload.name),
        price_modifier: Set(payload.price_modifier.unwrap_or(0)),
        created_at: NotSet,
    };
    let size = active.insert(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.tenant_id),
        Some(user.user_id),
        "size_create",
        Some("sizes"),
        Some(serde_json::json!({ "size_id": size.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Size created",
        size_from_entity(size),
        Some(Meta::empty()),
    ))
}

pub async fn update_size(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateSizeRequest,
) -> AppResult<ApiResponse<Size>> {
    ensure_allowed(user, Resource::Sizes, Action::Update)?;
    let existing = find_scoped(state, user, id).await?;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(price_modifier) = payload.price_modifier {
        active.price_modifier = Set(price_modifier);
    }
    let size = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.tenant_id),
        Some(user.user_id),
        "size_update",
        Some("sizes"),
        Some(serde_json::json!({ "size_id": size.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Updated",
        size_from_entity(size),
        Some(Meta::empty()),
    ))
}

pub async fn delete_size(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_allowed(user, Resource::Sizes, Action::Delete)?;

    let result = Sizes::delete_many()
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
        "size_delete",
        Some("sizes"),
        Some(serde_json::json!({ "size_id": id })),
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

async fn find_scoped(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<SizeModel> {
    let size = Sizes::find()
        .filter(Column::Id.eq(id))
        .filter(Column::TenantId.eq(user.tenant_id))
        .one(&state.orm)
        .await?;
    match size {
        Some(s) => Ok(s),
        None => Err(AppError::NotFound),
    }
}

fn size_from_entity(model: SizeModel) -> Size {
    Size {
        id: model.id,
        tenant_id: model.tenant_id,
        name: model.name,
        price_modifier: model.price_modifier,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
