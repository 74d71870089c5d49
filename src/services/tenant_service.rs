use chrono::Utc;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use crate::{
    entity::tenants::{Column, Entity as Tenants, Model as TenantModel},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Tenant,
    policy::{Action, Resource, ensure_allowed},
    response::ApiResponse,
    state::AppState,
};

/// Public slug resolution used by clients before login. Inactive stores
/// resolve the same as missing ones.
pub async fn get_by_slug(state: &AppState, slug: &str) -> AppResult<ApiResponse<Tenant>> {
    let tenant = Tenants::find()
        .filter(Column::Slug.eq(slug))
        .filter(Column::Active.eq(true))
        .one(&state.orm)
        .await?;
    let tenant = match tenant {
        Some(t) => t,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Tenant", tenant_from_entity(tenant), None))
}

pub async fn get_me(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Tenant>> {
    ensure_allowed(user, Resource::Tenants, Action::Read)?;
    let tenant = Tenants::find_by_id(user.tenant_id).one(&state.orm).await?;
    let tenant = match tenant {
        Some(t) => t,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Tenant", tenant_from_entity(tenant), None))
}

fn tenant_from_entity(model: TenantModel) -> Tenant {
    Tenant {
        id: model.id,
        name: model.name,
        slug: model.slug,
        primary_color: model.primary_color,
        secondary_color: model.secondary_color,
        active: model.active,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
