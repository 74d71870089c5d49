use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    entity::addons::{ActiveModel, Column, Entity as Addons, Model as AddonModel},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Addon,
    policy::{Action, Resource, ensure_allowed},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};
use crate::dto::catalog::{AddonList, CreateAddonRequest, UpdateAddonRequest};

pub async fn list_addons(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<AddonList>> {
    ensure_allowed(user, Resource::Addons, Action::Read)?;
    let (page, limit, offset) = pagination.normalize();

    let finder = Addons::find()
        .filter(Column::TenantId.eq(user.tenant_id))
        .order_by_asc(Column::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(addon_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Addons", AddonList { items }, Some(meta)))
}

pub async fn get_addon(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Addon>> {
    ensure_allowed(user, Resource::Addons, Action::Read)?;
    let addon = find_scoped(state, user, id).await?;
    Ok(ApiResponse::success("Addon", addon_from_entity(addon), None))
}

pub async fn create_addon(
    state: &AppState,
    user: &AuthUser,
    payload: CreateAddonRequest,
) -> AppResult<ApiResponse<Addon>> {
    ensure_allowed(user, Resource::Addons, Action::Create)?;

    let id = match payload.id {
        Some(id) => {
            let exist = Addons::find_by_id(id).one(&state.orm).await?;
            if exist.is_some() {
                return Err(AppError::Conflict("Addon id already exists".into()));
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
    let addon = active.insert(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.tenant_id),
        Some(user.user_id),
        "addon_create",
        Some("addons"),
        Some(serde_json::json!({ "addon_id": addon.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Addon created",
        addon_from_entity(addon),
        Some(Meta::empty()),
    ))
}

pub async fn update_addon(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateAddonRequest,
) -> AppResult<ApiResponse<Addon>> {
    ensure_allowed(user, Resource::Addons, Action::Update)?;
    let existing = find_scoped(state, user, id).await?;

    let mut active: ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(price_modifier) = payload.price_modifier {
        active.price_modifier = Set(price_modifier);
    }
    let addon = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.tenant_id),
        Some(user.user_id),
        "addon_update",
        Some("addons"),
        Some(serde_json::json!({ "addon_id": addon.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Updated",
        addon_from_entity(addon),
        Some(Meta::empty()),
    ))
}

pub async fn delete_addon(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_allowed(user, Resource::Addons, Action::Delete)?;

    let result = Addons::delete_many()
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
        "addon_delete",
        Some("addons"),
        Some(serde_json::json!({ "addon_id": id })),
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

async fn find_scoped(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<AddonModel> {
    let addon = Addons::find()
        .filter(Column::Id.eq(id))
        .filter(Column::TenantId.eq(user.tenant_id))
        .one(&state.orm)
        .await?;
    match addon {
        Some(a) => Ok(a),
        None => Err(AppError::NotFound),
    }
}

fn addon_from_entity(model: AddonModel) -> Addon {
    Addon {
        id: model.id,
        tenant_id: model.tenant_id,
        name: model.name,
        price_modifier: model.price_modifier,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
