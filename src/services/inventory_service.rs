use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    entity::{
        inventory_items::{
            ActiveModel as ItemActive, Column as ItemCol, Entity as InventoryItems,
            Model as ItemModel,
        },
        inventory_records::{
            ActiveModel as RecordActive, Column as RecordCol, Entity as InventoryRecords,
            Model as RecordModel,
        },
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{InventoryItem, InventoryRecord},
    policy::{Action, Resource, ensure_allowed},
    response::{ApiResponse, Meta},
    routes::params::{InventoryLatestQuery, InventoryRecordQuery, Pagination},
    state::AppState,
};
use crate::dto::inventory::{
    BulkInventoryRecordsRequest, CreateInventoryItemRequest, CreateInventoryRecordRequest,
    InventoryItemList, InventoryLatestList, InventoryRecordList, InventoryStats, ItemLatest,
    UpdateInventoryItemRequest,
};

pub async fn list_items(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<InventoryItemList>> {
    ensure_allowed(user, Resource::InventoryItems, Action::Read)?;
    let (page, limit, offset) = pagination.normalize();

    let finder = InventoryItems::find()
        .filter(ItemCol::TenantId.eq(user.tenant_id))
        .order_by_asc(ItemCol::Name);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(item_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Inventory items",
        InventoryItemList { items },
        Some(meta),
    ))
}

pub async fn get_item(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<InventoryItem>> {
    ensure_allowed(user, Resource::InventoryItems, Action::Read)?;
    let item = find_item_scoped(state, user, id).await?;
    Ok(ApiResponse::success("Inventory item", item_from_entity(item), None))
}

pub async fn create_item(
    state: &AppState,
    user: &AuthUser,
    payload: CreateInventoryItemRequest,
) -> AppResult<ApiResponse<InventoryItem>> {
    ensure_allowed(user, Resource::InventoryItems, Action::Create)?;

    let id = match payload.id {
        Some(id) => {
            let exist = InventoryItems::find_by_id(id).one(&state.orm).await?;
            if exist.is_some() {
                return Err(AppError::Conflict("Inventory item id already exists".into()));
            }
            id
        }
        None => Uuid::new_v4(),
    };

    let active = ItemActive {
        id: Set(id),
        tenant_id: Set(user.tenant_id),
        name: Set(payload.name),
        category: Set(payload.category),
        unit: Set(payload.unit),
        min_stock: Set(payload.min_stock),
        created_at: NotSet,
    };
    let item = active.insert(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.tenant_id),
        Some(user.user_id),
        "inventory_item_create",
        Some("inventory_items"),
        Some(serde_json::json!({ "inventory_item_id": item.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Inventory item created",
        item_from_entity(item),
        Some(Meta::empty()),
    ))
}

pub async fn update_item(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateInventoryItemRequest,
) -> AppResult<ApiResponse<InventoryItem>> {
    ensure_allowed(user, Resource::InventoryItems, Action::Update)?;
    let existing = find_item_scoped(state, user, id).await?;

    let mut active: ItemActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(category) = payload.category {
        active.category = Set(category);
    }
    if let Some(unit) = payload.unit {
        active.unit = Set(unit);
    }
    if let Some(min_stock) = payload.min_stock {
        active.min_stock = Set(Some(min_stock));
    }
    let item = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.tenant_id),
        Some(user.user_id),
        "inventory_item_update",
        Some("inventory_items"),
        Some(serde_json::json!({ "inventory_item_id": item.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Updated",
        item_from_entity(item),
        Some(Meta::empty()),
    ))
}

pub async fn create_record(
    state: &AppState,
    user: &AuthUser,
    payload: CreateInventoryRecordRequest,
) -> AppResult<ApiResponse<InventoryRecord>> {
    ensure_allowed(user, Resource::InventoryRecords, Action::Create)?;

    if payload.quantity < 0 {
        return Err(AppError::BadRequest("Quantity must not be negative".into()));
    }
    find_item_scoped(state, user, payload.inventory_item_id).await?;

    let active = RecordActive {
        id: Set(Uuid::new_v4()),
        tenant_id: Set(user.tenant_id),
        inventory_item_id: Set(payload.inventory_item_id),
        user_id: Set(user.user_id),
        quantity: Set(payload.quantity),
        recorded_on: Set(payload.recorded_on),
        created_at: NotSet,
    };
    let record = active.insert(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.tenant_id),
        Some(user.user_id),
        "inventory_record_create",
        Some("inventory_records"),
        Some(serde_json::json!({ "inventory_record_id": record.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Inventory record added",
        record_from_entity(record),
        Some(Meta::empty()),
    ))
}

/// Append a batch of records in one storage transaction. Every entry is
/// validated before anything is written, so a bad entry leaves zero rows.
pub async fn create_records_bulk(
    state: &AppState,
    user: &AuthUser,
    payload: BulkInventoryRecordsRequest,
) -> AppResult<ApiResponse<InventoryRecordList>> {
    ensure_allowed(user, Resource::InventoryRecords, Action::Create)?;

    if payload.records.is_empty() {
        return Err(AppError::BadRequest("Batch has no records".into()));
    }
    for entry in &payload.records {
        if entry.quantity < 0 {
            return Err(AppError::BadRequest("Quantity must not be negative".into()));
        }
    }

    let item_ids: HashSet<Uuid> = payload
        .records
        .iter()
        .map(|r| r.inventory_item_id)
        .collect();
    let owned = InventoryItems::find()
        .filter(ItemCol::TenantId.eq(user.tenant_id))
        .filter(ItemCol::Id.is_in(item_ids.iter().copied().collect::<Vec<_>>()))
        .all(&state.orm)
        .await?;
    if owned.len() != item_ids.len() {
        return Err(AppError::BadRequest("Unknown inventory item in batch".into()));
    }

    let txn = state.orm.begin().await?;

    let mut items: Vec<InventoryRecord> = Vec::with_capacity(payload.records.len());
    for entry in &payload.records {
        let record = RecordActive {
            id: Set(Uuid::new_v4()),
            tenant_id: Set(user.tenant_id),
            inventory_item_id: Set(entry.inventory_item_id),
            user_id: Set(user.user_id),
            quantity: Set(entry.quantity),
            recorded_on: Set(entry.recorded_on),
            created_at: NotSet,
        }
        .insert(&txn)
        .await?;
        items.push(record_from_entity(record));
    }

    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.tenant_id),
        Some(user.user_id),
        "inventory_records_bulk",
        Some("inventory_records"),
        Some(serde_json::json!({ "count": items.len() })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Inventory records added",
        InventoryRecordList { items },
        Some(Meta::empty()),
    ))
}

pub async fn list_records(
    state: &AppState,
    user: &AuthUser,
    query: InventoryRecordQuery,
) -> AppResult<ApiResponse<InventoryRecordList>> {
    ensure_allowed(user, Resource::InventoryRecords, Action::Read)?;
    let (page, limit, offset) = query.pagination.normalize();

    let mut condition = Condition::all().add(RecordCol::TenantId.eq(user.tenant_id));
    if let Some(item_id) = query.inventory_item_id {
        condition = condition.add(RecordCol::InventoryItemId.eq(item_id));
    }
    if let Some(start) = query.start_date {
        condition = condition.add(RecordCol::RecordedOn.gte(start));
    }
    if let Some(end) = query.end_date {
        condition = condition.add(RecordCol::RecordedOn.lte(end));
    }

    let finder = InventoryRecords::find()
        .filter(condition)
        .order_by_desc(RecordCol::RecordedOn)
        .order_by_desc(RecordCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(record_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Inventory records",
        InventoryRecordList { items },
        Some(meta),
    ))
}

pub async fn latest_view(
    state: &AppState,
    user: &AuthUser,
    query: InventoryLatestQuery,
) -> AppResult<ApiResponse<InventoryLatestList>> {
    ensure_allowed(user, Resource::InventoryRecords, Action::Read)?;

    let items = InventoryItems::find()
        .filter(ItemCol::TenantId.eq(user.tenant_id))
        .order_by_asc(ItemCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(item_from_entity)
        .collect::<Vec<_>>();

    let records = InventoryRecords::find()
        .filter(RecordCol::TenantId.eq(user.tenant_id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(record_from_entity)
        .collect::<Vec<_>>();

    let items = latest_per_item(items, &records, query.date);

    Ok(ApiResponse::success(
        "Latest inventory",
        InventoryLatestList { items },
        Some(Meta::empty()),
    ))
}

pub async fn inventory_stats(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<InventoryStats>> {
    ensure_allowed(user, Resource::InventoryRecords, Action::Read)?;

    let items = InventoryItems::find()
        .filter(ItemCol::TenantId.eq(user.tenant_id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(item_from_entity)
        .collect::<Vec<_>>();

    let records = InventoryRecords::find()
        .filter(RecordCol::TenantId.eq(user.tenant_id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(record_from_entity)
        .collect::<Vec<_>>();

    let item_count = items.len() as i64;
    let record_count = records.len() as i64;
    let last_recorded_on = records.iter().map(|r| r.recorded_on).max();

    let latest = latest_per_item(items, &records, None);
    let low_stock_count = latest
        .iter()
        .filter(|row| {
            match (row.item.min_stock, row.latest_quantity) {
                (Some(min), Some(qty)) => qty < min,
                _ => false,
            }
        })
        .count() as i64;

    Ok(ApiResponse::success(
        "Inventory stats",
        InventoryStats {
            item_count,
            record_count,
            low_stock_count,
            last_recorded_on,
        },
        Some(Meta::empty()),
    ))
}

/// The latest-value view: for each item, the record with the greatest
/// `recorded_on` on or before `as_of` (overall greatest when `as_of` is
/// None), ties broken by `created_at`. Items without a qualifying record
/// still appear, with no quantity.
pub fn latest_per_item(
    items: Vec<InventoryItem>,
    records: &[InventoryRecord],
    as_of: Option<NaiveDate>,
) -> Vec<ItemLatest> {
    let mut latest: HashMap<Uuid, &InventoryRecord> = HashMap::new();
    for record in records {
        if let Some(cutoff) = as_of {
            if record.recorded_on > cutoff {
                continue;
            }
        }
        latest
            .entry(record.inventory_item_id)
            .and_modify(|current| {
                if (record.recorded_on, record.created_at)
                    > (current.recorded_on, current.created_at)
                {
                    *current = record;
                }
            })
            .or_insert(record);
    }

    items
        .into_iter()
        .map(|item| {
            let found = latest.get(&item.id);
            ItemLatest {
                latest_quantity: found.map(|r| r.quantity),
                latest_recorded_on: found.map(|r| r.recorded_on),
                item,
            }
        })
        .collect()
}

async fn find_item_scoped(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<ItemModel> {
    let item = InventoryItems::find()
        .filter(ItemCol::Id.eq(id))
        .filter(ItemCol::TenantId.eq(user.tenant_id))
        .one(&state.orm)
        .await?;
    match item {
        Some(i) => Ok(i),
        None => Err(AppError::NotFound),
    }
}

fn item_from_entity(model: ItemModel) -> InventoryItem {
    InventoryItem {
        id: model.id,
        tenant_id: model.tenant_id,
        name: model.name,
        category: model.category,
        unit: model.unit,
        min_stock: model.min_stock,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn record_from_entity(model: RecordModel) -> InventoryRecord {
    InventoryRecord {
        id: model.id,
        tenant_id: model.tenant_id,
        inventory_item_id: model.inventory_item_id,
        user_id: model.user_id,
        quantity: model.quantity,
        recorded_on: model.recorded_on,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
