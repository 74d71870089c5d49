use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    entity::{
        addons::{Column as AddonCol, Entity as Addons},
        products::{Column as ProductCol, Entity as Products},
        sizes::{Column as SizeCol, Entity as Sizes},
        transaction_items::{
            ActiveModel as ItemActive, Column as ItemCol, Entity as TransactionItems,
            Model as ItemModel,
        },
        transactions::{
            ActiveModel as TransactionActive, Column, Entity as Transactions,
            Model as TransactionModel,
        },
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{AppliedAddon, Transaction, TransactionItem},
    policy::{Action, Resource, ensure_allowed},
    response::{ApiResponse, Meta},
    routes::params::TransactionListQuery,
    state::AppState,
};
use crate::dto::transactions::{
    CreateTransactionRequest, TransactionList, TransactionStats, TransactionWithItems,
    UpdateVoidStatusRequest,
};

pub const PAYMENT_METHODS: [&str; 3] = ["cash", "card", "ewallet"];
pub const PAYMENT_STATUSES: [&str; 3] = ["completed", "pending", "refunded"];

pub const VOID_NONE: &str = "none";
pub const VOID_REQUESTED: &str = "requested";
pub const VOID_APPROVED: &str = "approved";
pub const VOID_REJECTED: &str = "rejected";

pub async fn create_transaction(
    state: &AppState,
    user: &AuthUser,
    payload: CreateTransactionRequest,
) -> AppResult<ApiResponse<TransactionWithItems>> {
    ensure_allowed(user, Resource::Transactions, Action::Create)?;

    if payload.items.is_empty() {
        return Err(AppError::BadRequest("Transaction has no items".into()));
    }
    if !PAYMENT_METHODS.contains(&payload.payment_method.as_str()) {
        return Err(AppError::BadRequest("Invalid payment method".into()));
    }
    let payment_status = payload
        .payment_status
        .unwrap_or_else(|| "completed".to_string());
    if !PAYMENT_STATUSES.contains(&payment_status.as_str()) {
        return Err(AppError::BadRequest("Invalid payment status".into()));
    }

    let txn = state.orm.begin().await?;

    let transaction_id = Uuid::new_v4();
    let mut subtotal: i64 = 0;
    let mut item_rows: Vec<ItemActive> = Vec::with_capacity(payload.items.len());
    let mut items: Vec<TransactionItem> = Vec::with_capacity(payload.items.len());

    for line in &payload.items {
        if line.quantity < 1 {
            return Err(AppError::BadRequest("Quantity must be at least 1".into()));
        }

        let product = Products::find()
            .filter(ProductCol::Id.eq(line.product_id))
            .filter(ProductCol::TenantId.eq(user.tenant_id))
            .one(&txn)
            .await?;
        let product = match product {
            Some(p) => p,
            None => return Err(AppError::BadRequest("Unknown product in items".into())),
        };

        let size = match line.size_id {
            Some(size_id) => {
                let size = Sizes::find()
                    .filter(SizeCol::Id.eq(size_id))
                    .filter(SizeCol::TenantId.eq(user.tenant_id))
                    .one(&txn)
                    .await?;
                match size {
                    Some(s) => Some(s),
                    None => return Err(AppError::BadRequest("Unknown size in items".into())),
                }
            }
            None => None,
        };

        let addon_ids = line.addon_ids.clone().unwrap_or_default();
        let mut applied_addons: Vec<AppliedAddon> = Vec::new();
        if !addon_ids.is_empty() {
            let addons = Addons::find()
                .filter(AddonCol::TenantId.eq(user.tenant_id))
                .filter(AddonCol::Id.is_in(addon_ids.clone()))
                .all(&txn)
                .await?;
            if addons.len() != addon_ids.len() {
                return Err(AppError::BadRequest("Unknown addon in items".into()));
            }
            applied_addons = addons
                .into_iter()
                .map(|a| AppliedAddon {
                    addon_id: a.id,
                    name: a.name,
                    price_modifier: a.price_modifier,
                })
                .collect();
        }

        // Names and prices are frozen here so later catalog edits never
        // rewrite sale history.
        let unit_price = product.price
            + size.as_ref().map(|s| s.price_modifier).unwrap_or(0);
        let addon_total: i64 = applied_addons.iter().map(|a| a.price_modifier).sum();
        let line_subtotal = (unit_price + addon_total) * line.quantity as i64;

        let addons_json = serde_json::to_value(&applied_addons)
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;

        let item_id = Uuid::new_v4();
        item_rows.push(ItemActive {
            id: Set(item_id),
            transaction_id: Set(transaction_id),
            product_id: Set(product.id),
            product_name: Set(product.name.clone()),
            size_id: Set(line.size_id),
            size_name: Set(size.as_ref().map(|s| s.name.clone())),
            unit_price: Set(unit_price),
            quantity: Set(line.quantity),
            addons: Set(addons_json),
            subtotal: Set(line_subtotal),
        });
        items.push(TransactionItem {
            id: item_id,
            transaction_id,
            product_id: product.id,
            product_name: product.name,
            size_id: line.size_id,
            size_name: size.map(|s| s.name),
            unit_price,
            quantity: line.quantity,
            addons: applied_addons,
            subtotal: line_subtotal,
        });

        subtotal += line_subtotal;
    }

    let total = subtotal;

    let change_due = match (payload.payment_method.as_str(), payload.cash_received) {
        ("cash", Some(cash)) => {
            if cash < total {
                return Err(AppError::BadRequest("Cash received is below total".into()));
            }
            Some(cash - total)
        }
        _ => None,
    };

    let transaction = TransactionActive {
        id: Set(transaction_id),
        tenant_id: Set(user.tenant_id),
        user_id: Set(user.user_id),
        subtotal: Set(subtotal),
        total: Set(total),
        payment_method: Set(payload.payment_method.clone()),
        payment_status: Set(payment_status),
        cash_received: Set(payload.cash_received),
        change_due: Set(change_due),
        reference_number: Set(payload.reference_number.clone()),
        void_status: Set(VOID_NONE.into()),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    for row in item_rows {
        row.insert(&txn).await?;
    }

    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.tenant_id),
        Some(user.user_id),
        "transaction_create",
        Some("transactions"),
        Some(serde_json::json!({ "transaction_id": transaction.id, "total": transaction.total })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Transaction recorded",
        TransactionWithItems {
            transaction: transaction_from_entity(transaction),
            items,
        },
        Some(Meta::empty()),
    ))
}

pub async fn list_transactions(
    state: &AppState,
    user: &AuthUser,
    query: TransactionListQuery,
) -> AppResult<ApiResponse<TransactionList>> {
    ensure_allowed(user, Resource::Transactions, Action::Read)?;
    let (page, limit, offset) = query.pagination.normalize();

    let mut condition = Condition::all().add(Column::TenantId.eq(user.tenant_id));
    if let Some(start) = query.start_date {
        condition = condition.add(Column::CreatedAt.gte(start.and_time(chrono::NaiveTime::MIN).and_utc()));
    }
    if let Some(end) = query.end_date {
        let exclusive = end.succ_opt().unwrap_or(end);
        condition = condition.add(Column::CreatedAt.lt(exclusive.and_time(chrono::NaiveTime::MIN).and_utc()));
    }
    if let Some(method) = query.payment_method.as_ref().filter(|m| !m.is_empty()) {
        condition = condition.add(Column::PaymentMethod.eq(method.clone()));
    }
    if let Some(status) = query.payment_status.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(Column::PaymentStatus.eq(status.clone()));
    }

    let finder = Transactions::find()
        .filter(condition)
        .order_by_desc(Column::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(transaction_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Transactions", TransactionList { items }, Some(meta)))
}

pub async fn get_transaction(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<TransactionWithItems>> {
    ensure_allowed(user, Resource::Transactions, Action::Read)?;

    let transaction = find_scoped(state, user, id).await?;

    let items = TransactionItems::find()
        .filter(ItemCol::TransactionId.eq(transaction.id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(item_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Transaction",
        TransactionWithItems {
            transaction: transaction_from_entity(transaction),
            items,
        },
        Some(Meta::empty()),
    ))
}

pub async fn transaction_stats(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<TransactionStats>> {
    ensure_allowed(user, Resource::Transactions, Action::Read)?;

    // Completed, non-voided sales only; raw SQL keeps the aggregates in
    // one round trip each.
    let (total_count, total_sales): (i64, i64) = sqlx::query_as(
        r#"
        SELECT COUNT(*), COALESCE(SUM(total), 0)::BIGINT
        FROM transactions
        WHERE tenant_id = $1 AND payment_status = 'completed' AND void_status <> 'approved'
        "#,
    )
    .bind(user.tenant_id)
    .fetch_one(&state.pool)
    .await?;

    let (today_count, today_sales): (i64, i64) = sqlx::query_as(
        r#"
        SELECT COUNT(*), COALESCE(SUM(total), 0)::BIGINT
        FROM transactions
        WHERE tenant_id = $1 AND payment_status = 'completed' AND void_status <> 'approved'
          AND created_at >= date_trunc('day', now())
        "#,
    )
    .bind(user.tenant_id)
    .fetch_one(&state.pool)
    .await?;

    Ok(ApiResponse::success(
        "Transaction stats",
        TransactionStats {
            today_count,
            today_sales,
            total_count,
            total_sales,
        },
        Some(Meta::empty()),
    ))
}

pub async fn update_void_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateVoidStatusRequest,
) -> AppResult<ApiResponse<Transaction>> {
    ensure_allowed(user, Resource::Transactions, Action::Update)?;

    let existing = find_scoped(state, user, id).await?;

    let allowed = matches!(
        (existing.void_status.as_str(), payload.void_status.as_str()),
        (VOID_NONE, VOID_REQUESTED) | (VOID_REQUESTED, VOID_APPROVED) | (VOID_REQUESTED, VOID_REJECTED)
    );
    if !allowed {
        return Err(AppError::BadRequest(format!(
            "Cannot move void status from '{}' to '{}'",
            existing.void_status, payload.void_status
        )));
    }

    let mut active: TransactionActive = existing.into();
    active.void_status = Set(payload.void_status.clone());
    let transaction = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.tenant_id),
        Some(user.user_id),
        "transaction_void_status",
        Some("transactions"),
        Some(serde_json::json!({ "transaction_id": transaction.id, "void_status": transaction.void_status })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Void status updated",
        transaction_from_entity(transaction),
        Some(Meta::empty()),
    ))
}

async fn find_scoped(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<TransactionModel> {
    let transaction = Transactions::find()
        .filter(Column::Id.eq(id))
        .filter(Column::TenantId.eq(user.tenant_id))
        .one(&state.orm)
        .await?;
    match transaction {
        Some(t) => Ok(t),
        None => Err(AppError::NotFound),
    }
}

pub(crate) fn transaction_from_entity(model: TransactionModel) -> Transaction {
    Transaction {
        id: model.id,
        tenant_id: model.tenant_id,
        user_id: model.user_id,
        subtotal: model.subtotal,
        total: model.total,
        payment_method: model.payment_method,
        payment_status: model.payment_status,
        cash_received: model.cash_received,
        change_due: model.change_due,
        reference_number: model.reference_number,
        void_status: model.void_status,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn item_from_entity(model: ItemModel) -> TransactionItem {
    let addons: Vec<AppliedAddon> =
        serde_json::from_value(model.addons).unwrap_or_default();
    TransactionItem {
        id: model.id,
        transaction_id: model.transaction_id,
        product_id: model.product_id,
        product_name: model.product_name,
        size_id: model.size_id,
        size_name: model.size_name,
        unit_price: model.unit_price,
        quantity: model.quantity,
        addons,
        subtotal: model.subtotal,
    }
}
