use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    entity::{
        addons::{Column as AddonCol, Entity as Addons},
        categories::{Column as CategoryCol, Entity as Categories},
        product_addons::{
            ActiveModel as ProductAddonActive, Column as ProductAddonCol, Entity as ProductAddons,
        },
        product_sizes::{
            ActiveModel as ProductSizeActive, Column as ProductSizeCol, Entity as ProductSizes,
        },
        products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
        sizes::{Column as SizeCol, Entity as Sizes},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Product,
    policy::{Action, Resource, ensure_allowed},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};
use crate::dto::products::{CreateProductRequest, ProductList, UpdateProductRequest};

pub async fn list_products(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductList>> {
    ensure_allowed(user, Resource::Products, Action::Read)?;
    let (page, limit, offset) = pagination.normalize();

    let finder = Products::find()
        .filter(Column::TenantId.eq(user.tenant_id))
        .order_by_asc(Column::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let products = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let ids: Vec<Uuid> = products.iter().map(|p| p.id).collect();
    let (mut sizes_by_product, mut addons_by_product) =
        load_associations(&state.orm, &ids).await?;

    let items = products
        .into_iter()
        .map(|p| {
            let size_ids = sizes_by_product.remove(&p.id).unwrap_or_default();
            let addon_ids = addons_by_product.remove(&p.id).unwrap_or_default();
            product_from_entity(p, size_ids, addon_ids)
        })
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn get_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Product>> {
    ensure_allowed(user, Resource::Products, Action::Read)?;
    let product = find_scoped(&state.orm, user, id).await?;
    let (mut sizes_by_product, mut addons_by_product) =
        load_associations(&state.orm, &[product.id]).await?;
    let size_ids = sizes_by_product.remove(&product.id).unwrap_or_default();
    let addon_ids = addons_by_product.remove(&product.id).unwrap_or_default();
    Ok(ApiResponse::success(
        "Product",
        product_from_entity(product, size_ids, addon_ids),
        None,
    ))
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_allowed(user, Resource::Products, Action::Create)?;

    let id = match payload.id {
        Some(id) => {
            let exist = Products::find_by_id(id).one(&state.orm).await?;
            if exist.is_some() {
                return Err(AppError::Conflict("Product id already exists".into()));
            }
            id
        }
        None => Uuid::new_v4(),
    };

    let txn = state.orm.begin().await?;

    ensure_category_owned(&txn, user, payload.category_id).await?;

    let active = ActiveModel {
        id: Set(id),
        tenant_id: Set(user.tenant_id),
        category_id: Set(payload.category_id),
        name: Set(payload.name),
        price: Set(payload.price),
        image_url: Set(payload.image_url),
        created_at: NotSet,
    };
    let product = active.insert(&txn).await?;

    let size_ids = match payload.size_ids {
        Some(ids) => {
            reconcile_sizes(&txn, user, product.id, &ids).await?;
            dedup(ids)
        }
        None => Vec::new(),
    };
    let addon_ids = match payload.addon_ids {
        Some(ids) => {
            reconcile_addons(&txn, user, product.id, &ids).await?;
            dedup(ids)
        }
        None => Vec::new(),
    };

    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.tenant_id),
        Some(user.user_id),
        "product_create",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Product created",
        product_from_entity(product, size_ids, addon_ids),
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_allowed(user, Resource::Products, Action::Update)?;

    let txn = state.orm.begin().await?;

    let existing = find_scoped(&txn, user, id).await?;

    if let Some(category_id) = payload.category_id {
        ensure_category_owned(&txn, user, category_id).await?;
    }

    let mut active: ActiveModel = existing.into();
    if let Some(category_id) = payload.category_id {
        active.category_id = Set(category_id);
    }
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(image_url) = payload.image_url {
        active.image_url = Set(Some(image_url));
    }
    let product = active.update(&txn).await?;

    if let Some(ids) = payload.size_ids.as_ref() {
        reconcile_sizes(&txn, user, product.id, ids).await?;
    }
    if let Some(ids) = payload.addon_ids.as_ref() {
        reconcile_addons(&txn, user, product.id, ids).await?;
    }

    let (mut sizes_by_product, mut addons_by_product) =
        load_associations(&txn, &[product.id]).await?;

    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.tenant_id),
        Some(user.user_id),
        "product_update",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    let size_ids = sizes_by_product.remove(&product.id).unwrap_or_default();
    let addon_ids = addons_by_product.remove(&product.id).unwrap_or_default();
    Ok(ApiResponse::success(
        "Updated",
        product_from_entity(product, size_ids, addon_ids),
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_allowed(user, Resource::Products, Action::Delete)?;

    let result = Products::delete_many()
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
        "product_delete",
        Some("products"),
        Some(serde_json::json!({ "product_id": id })),
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

/// Bring the product's stored size set in line with the desired set.
/// Only the difference is written: an empty desired set clears everything.
async fn reconcile_sizes<C: ConnectionTrait>(
    conn: &C,
    user: &AuthUser,
    product_id: Uuid,
    desired: &[Uuid],
) -> AppResult<()> {
    let desired: HashSet<Uuid> = desired.iter().copied().collect();

    if !desired.is_empty() {
        let owned = Sizes::find()
            .filter(SizeCol::TenantId.eq(user.tenant_id))
            .filter(SizeCol::Id.is_in(desired.iter().copied().collect::<Vec<_>>()))
            .all(conn)
            .await?;
        if owned.len() != desired.len() {
            return Err(AppError::BadRequest("Unknown size id in list".into()));
        }
    }

    let current: HashSet<Uuid> = ProductSizes::find()
        .filter(ProductSizeCol::ProductId.eq(product_id))
        .all(conn)
        .await?
        .into_iter()
        .map(|row| row.size_id)
        .collect();

    let to_add: Vec<Uuid> = desired.difference(&current).copied().collect();
    let to_remove: Vec<Uuid> = current.difference(&desired).copied().collect();

    if !to_add.is_empty() {
        let rows = to_add.into_iter().map(|size_id| ProductSizeActive {
            product_id: Set(product_id),
            size_id: Set(size_id),
        });
        ProductSizes::insert_many(rows).exec(conn).await?;
    }
    if !to_remove.is_empty() {
        ProductSizes::delete_many()
            .filter(ProductSizeCol::ProductId.eq(product_id))
            .filter(ProductSizeCol::SizeId.is_in(to_remove))
            .exec(conn)
            .await?;
    }

    Ok(())
}

async fn reconcile_addons<C: ConnectionTrait>(
    conn: &C,
    user: &AuthUser,
    product_id: Uuid,
    desired: &[Uuid],
) -> AppResult<()> {
    let desired: HashSet<Uuid> = desired.iter().copied().collect();

    if !desired.is_empty() {
        let owned = Addons::find()
            .filter(AddonCol::TenantId.eq(user.tenant_id))
            .filter(AddonCol::Id.is_in(desired.iter().copied().collect::<Vec<_>>()))
            .all(conn)
            .await?;
        if owned.len() != desired.len() {
            return Err(AppError::BadRequest("Unknown addon id in list".into()));
        }
    }

    let current: HashSet<Uuid> = ProductAddons::find()
        .filter(ProductAddonCol::ProductId.eq(product_id))
        .all(conn)
        .await?
        .into_iter()
        .map(|row| row.addon_id)
        .collect();

    let to_add: Vec<Uuid> = desired.difference(&current).copied().collect();
    let to_remove: Vec<Uuid> = current.difference(&desired).copied().collect();

    if !to_add.is_empty() {
        let rows = to_add.into_iter().map(|addon_id| ProductAddonActive {
            product_id: Set(product_id),
            addon_id: Set(addon_id),
        });
        ProductAddons::insert_many(rows).exec(conn).await?;
    }
    if !to_remove.is_empty() {
        ProductAddons::delete_many()
            .filter(ProductAddonCol::ProductId.eq(product_id))
            .filter(ProductAddonCol::AddonId.is_in(to_remove))
            .exec(conn)
            .await?;
    }

    Ok(())
}

async fn load_associations<C: ConnectionTrait>(
    conn: &C,
    product_ids: &[Uuid],
) -> AppResult<(HashMap<Uuid, Vec<Uuid>>, HashMap<Uuid, Vec<Uuid>>)> {
    let mut sizes_by_product: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    let mut addons_by_product: HashMap<Uuid, Vec<Uuid>> = HashMap::new();

    if product_ids.is_empty() {
        return Ok((sizes_by_product, addons_by_product));
    }

    let size_rows = ProductSizes::find()
        .filter(ProductSizeCol::ProductId.is_in(product_ids.to_vec()))
        .all(conn)
        .await?;
    for row in size_rows {
        sizes_by_product.entry(row.product_id).or_default().push(row.size_id);
    }

    let addon_rows = ProductAddons::find()
        .filter(ProductAddonCol::ProductId.is_in(product_ids.to_vec()))
        .all(conn)
        .await?;
    for row in addon_rows {
        addons_by_product.entry(row.product_id).or_default().push(row.addon_id);
    }

    Ok((sizes_by_product, addons_by_product))
}

async fn ensure_category_owned<C: ConnectionTrait>(
    conn: &C,
    user: &AuthUser,
    category_id: Uuid,
) -> AppResult<()> {
    let category = Categories::find()
        .filter(CategoryCol::Id.eq(category_id))
        .filter(CategoryCol::TenantId.eq(user.tenant_id))
        .one(conn)
        .await?;
    if category.is_none() {
        return Err(AppError::BadRequest("Unknown category id".into()));
    }
    Ok(())
}

async fn find_scoped<C: ConnectionTrait>(
    conn: &C,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ProductModel> {
    let product = Products::find()
        .filter(Column::Id.eq(id))
        .filter(Column::TenantId.eq(user.tenant_id))
        .one(conn)
        .await?;
    match product {
        Some(p) => Ok(p),
        None => Err(AppError::NotFound),
    }
}

fn dedup(ids: Vec<Uuid>) -> Vec<Uuid> {
    let set: HashSet<Uuid> = ids.into_iter().collect();
    set.into_iter().collect()
}

fn product_from_entity(model: ProductModel, size_ids: Vec<Uuid>, addon_ids: Vec<Uuid>) -> Product {
    Product {
        id: model.id,
        tenant_id: model.tenant_id,
        category_id: model.category_id,
        name: model.name,
        price: model.price,
        image_url: model.image_url,
        size_ids,
        addon_ids,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
