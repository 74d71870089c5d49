use axum_pos_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::{
        catalog::{CreateAddonRequest, CreateCategoryRequest, CreateSizeRequest},
        inventory::{
            BulkInventoryRecordsRequest, CreateInventoryItemRequest,
            CreateInventoryRecordRequest,
        },
        products::{CreateProductRequest, UpdateProductRequest},
        submitted_reports::CreateSubmittedReportRequest,
        transactions::{CreateTransactionItemRequest, CreateTransactionRequest, UpdateVoidStatusRequest},
    },
    entity::{tenants::ActiveModel as TenantActive, users::ActiveModel as UserActive},
    error::AppError,
    middleware::auth::AuthUser,
    routes::params::{InventoryLatestQuery, InventoryRecordQuery, Pagination},
    services::{
        addon_service, category_service, inventory_service, product_service,
        submitted_report_service, transaction_service,
    },
    state::AppState,
};
use chrono::NaiveDate;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set, Statement};
use uuid::Uuid;

// End-to-end flow against a real database: catalog setup, sale capture,
// bulk inventory write atomicity, and submitted-report void reconciliation,
// with tenant isolation checked along the way.
#[tokio::test]
async fn catalog_sale_inventory_and_report_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;

    let tenant_a = create_tenant(&state, "Store A", "store-a").await?;
    let tenant_b = create_tenant(&state, "Store B", "store-b").await?;

    let admin_a = AuthUser {
        user_id: create_user(&state, tenant_a, "admin-a", "admin").await?,
        tenant_id: tenant_a,
        role: "admin".into(),
    };
    let cashier_a = AuthUser {
        user_id: create_user(&state, tenant_a, "cashier-a", "cashier").await?,
        tenant_id: tenant_a,
        role: "cashier".into(),
    };
    let admin_b = AuthUser {
        user_id: create_user(&state, tenant_b, "admin-b", "admin").await?,
        tenant_id: tenant_b,
        role: "admin".into(),
    };

    // Catalog setup with a caller-supplied id; re-creating the same id
    // must conflict and a cashier must not be able to create at all.
    let category_id = Uuid::new_v4();
    category_service::create_category(
        &state,
        &admin_a,
        CreateCategoryRequest {
            id: Some(category_id),
            name: "Coffee".into(),
            sequence: Some(1),
        },
    )
    .await?;

    let duplicate = category_service::create_category(
        &state,
        &admin_a,
        CreateCategoryRequest {
            id: Some(category_id),
            name: "Coffee again".into(),
            sequence: None,
        },
    )
    .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    let forbidden = category_service::create_category(
        &state,
        &cashier_a,
        CreateCategoryRequest {
            id: None,
            name: "Tea".into(),
            sequence: None,
        },
    )
    .await;
    assert!(matches!(forbidden, Err(AppError::Forbidden)));

    // The other tenant must not see this category.
    let cross_tenant = category_service::get_category(&state, &admin_b, category_id).await;
    assert!(matches!(cross_tenant, Err(AppError::NotFound)));

    let size = size_create(&state, &admin_a, "Large", 3000).await?;
    let addon = addon_service::create_addon(
        &state,
        &admin_a,
        CreateAddonRequest {
            id: None,
            name: "Extra shot".into(),
            price_modifier: Some(5000),
        },
    )
    .await?
    .data
    .expect("addon data");

    let product = product_service::create_product(
        &state,
        &admin_a,
        CreateProductRequest {
            id: None,
            category_id,
            name: "Cafe Latte".into(),
            price: 22000,
            image_url: None,
            size_ids: Some(vec![size]),
            addon_ids: Some(vec![addon.id]),
        },
    )
    .await?
    .data
    .expect("product data");
    assert_eq!(product.size_ids, vec![size]);
    assert_eq!(product.addon_ids, vec![addon.id]);

    // An omitted list leaves associations untouched; an empty list clears.
    let untouched = product_service::update_product(
        &state,
        &admin_a,
        product.id,
        UpdateProductRequest {
            category_id: None,
            name: None,
            price: Some(23000),
            image_url: None,
            size_ids: None,
            addon_ids: None,
        },
    )
    .await?
    .data
    .expect("product data");
    assert_eq!(untouched.size_ids, vec![size]);
    assert_eq!(untouched.addon_ids, vec![addon.id]);

    let cleared = product_service::update_product(
        &state,
        &admin_a,
        product.id,
        UpdateProductRequest {
            category_id: None,
            name: None,
            price: None,
            image_url: None,
            size_ids: Some(vec![]),
            addon_ids: None,
        },
    )
    .await?
    .data
    .expect("product data");
    assert!(cleared.size_ids.is_empty());
    assert_eq!(cleared.addon_ids, vec![addon.id]);

    // Restore the size so the sale below exercises the size modifier.
    product_service::update_product(
        &state,
        &admin_a,
        product.id,
        UpdateProductRequest {
            category_id: None,
            name: None,
            price: None,
            image_url: None,
            size_ids: Some(vec![size]),
            addon_ids: None,
        },
    )
    .await?;

    // Cashier rings up a sale: (23000 base + 3000 size + 5000 addon) * 2.
    let sale = transaction_service::create_transaction(
        &state,
        &cashier_a,
        CreateTransactionRequest {
            items: vec![CreateTransactionItemRequest {
                product_id: product.id,
                size_id: Some(size),
                addon_ids: Some(vec![addon.id]),
                quantity: 2,
            }],
            payment_method: "cash".into(),
            payment_status: None,
            cash_received: Some(100000),
            reference_number: None,
        },
    )
    .await?
    .data
    .expect("sale data");
    assert_eq!(sale.transaction.total, 62000);
    assert_eq!(sale.transaction.change_due, Some(38000));
    assert_eq!(sale.items.len(), 1);
    assert_eq!(sale.items[0].product_name, "Cafe Latte");

    // Bulk inventory write must be all-or-nothing.
    let item = inventory_service::create_item(
        &state,
        &admin_a,
        CreateInventoryItemRequest {
            id: None,
            name: "Beans".into(),
            category: "ingredients".into(),
            unit: "kg".into(),
            min_stock: Some(5),
        },
    )
    .await?
    .data
    .expect("item data");

    let day1 = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
    let day5 = NaiveDate::from_ymd_opt(2024, 1, 5).expect("valid date");

    let bad_batch = inventory_service::create_records_bulk(
        &state,
        &cashier_a,
        BulkInventoryRecordsRequest {
            records: vec![
                CreateInventoryRecordRequest {
                    inventory_item_id: item.id,
                    quantity: 10,
                    recorded_on: day1,
                },
                CreateInventoryRecordRequest {
                    inventory_item_id: item.id,
                    quantity: -3,
                    recorded_on: day1,
                },
                CreateInventoryRecordRequest {
                    inventory_item_id: item.id,
                    quantity: 4,
                    recorded_on: day1,
                },
            ],
        },
    )
    .await;
    assert!(matches!(bad_batch, Err(AppError::BadRequest(_))));

    let records = inventory_service::list_records(
        &state,
        &cashier_a,
        InventoryRecordQuery {
            pagination: Pagination::default(),
            inventory_item_id: Some(item.id),
            start_date: None,
            end_date: None,
        },
    )
    .await?
    .data
    .expect("records data");
    assert!(records.items.is_empty(), "failed batch must persist nothing");

    inventory_service::create_records_bulk(
        &state,
        &cashier_a,
        BulkInventoryRecordsRequest {
            records: vec![
                CreateInventoryRecordRequest {
                    inventory_item_id: item.id,
                    quantity: 10,
                    recorded_on: day1,
                },
                CreateInventoryRecordRequest {
                    inventory_item_id: item.id,
                    quantity: 7,
                    recorded_on: day5,
                },
            ],
        },
    )
    .await?;

    let as_of = NaiveDate::from_ymd_opt(2024, 1, 3).expect("valid date");
    let latest = inventory_service::latest_view(
        &state,
        &cashier_a,
        InventoryLatestQuery { date: Some(as_of) },
    )
    .await?
    .data
    .expect("latest data");
    let row = latest
        .items
        .iter()
        .find(|row| row.item.id == item.id)
        .expect("item row");
    assert_eq!(row.latest_quantity, Some(10));

    // Submit a report snapshot, then void the referenced sale; the flag
    // flips while the stored snapshot stays frozen.
    let report = submitted_report_service::create_report(
        &state,
        &cashier_a,
        CreateSubmittedReportRequest {
            report_date: day5,
            period_start: day1,
            period_end: day5,
            sales_snapshot: serde_json::json!({ "totalAmount": 62000 }),
            expenses_snapshot: serde_json::json!({ "totalAmount": 0 }),
            summary_snapshot: serde_json::json!({ "grossProfit": 62000 }),
            transaction_ids: vec![sale.transaction.id],
            expense_ids: vec![],
            notes: None,
        },
    )
    .await?
    .data
    .expect("report data");

    transaction_service::update_void_status(
        &state,
        &admin_a,
        sale.transaction.id,
        UpdateVoidStatusRequest {
            void_status: "requested".into(),
        },
    )
    .await?;
    transaction_service::update_void_status(
        &state,
        &admin_a,
        sale.transaction.id,
        UpdateVoidStatusRequest {
            void_status: "approved".into(),
        },
    )
    .await?;

    let detail = submitted_report_service::get_report(&state, &cashier_a, report.id)
        .await?
        .data
        .expect("report detail");
    assert!(detail.has_voided_transactions);
    assert_eq!(
        detail.report.sales_snapshot,
        serde_json::json!({ "totalAmount": 62000 })
    );

    // The other tenant cannot read the report either.
    let cross_report = submitted_report_service::get_report(&state, &admin_b, report.id).await;
    assert!(matches!(cross_report, Err(AppError::NotFound)));

    Ok(())
}

async fn size_create(
    state: &AppState,
    user: &AuthUser,
    name: &str,
    price_modifier: i64,
) -> anyhow::Result<Uuid> {
    use axum_pos_api::services::size_service;
    let size = size_service::create_size(
        state,
        user,
        CreateSizeRequest {
            id: None,
            name: name.into(),
            price_modifier: Some(price_modifier),
        },
    )
    .await?
    .data
    .expect("size data");
    Ok(size.id)
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE transaction_items, transactions, product_sizes, product_addons, products, sizes, addons, categories, inventory_records, inventory_items, submitted_reports, expenses, audit_logs, users, tenants RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(AppState { pool, orm })
}

async fn create_tenant(state: &AppState, name: &str, slug: &str) -> anyhow::Result<Uuid> {
    let tenant = TenantActive {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        slug: Set(slug.to_string()),
        primary_color: Set("#1f2937".into()),
        secondary_color: Set("#f59e0b".into()),
        active: Set(true),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(tenant.id)
}

async fn create_user(
    state: &AppState,
    tenant_id: Uuid,
    username: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        tenant_id: Set(tenant_id),
        username: Set(username.to_string()),
        password_hash: Set("dummy".into()),
        role: Set(role.into()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(user.id)
}
