use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{CreateUserRequest, LoginRequest, LoginResponse, UserList},
        catalog::{
            AddonList, CategoryList, CreateAddonRequest, CreateCategoryRequest,
            CreateSizeRequest, SizeList, UpdateAddonRequest, UpdateCategoryRequest,
            UpdateSizeRequest,
        },
        expenses::{CreateExpenseRequest, ExpenseList, UpdateExpenseRequest},
        inventory::{
            BulkInventoryRecordsRequest, CreateInventoryItemRequest,
            CreateInventoryRecordRequest, InventoryItemList, InventoryLatestList,
            InventoryRecordList, InventoryStats, ItemLatest, UpdateInventoryItemRequest,
        },
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
        reports::{
            AnalyticsReport, ExpenseCategoryBreakdown, ExpenseSummary,
            PaymentMethodBreakdown, SalesSummary,
        },
        submitted_reports::{
            CreateSubmittedReportRequest, SubmittedReportDetail, SubmittedReportList,
            SubmittedReportStats,
        },
        transactions::{
            CreateTransactionItemRequest, CreateTransactionRequest, TransactionList,
            TransactionStats, TransactionWithItems, UpdateVoidStatusRequest,
        },
    },
    models::{
        Addon, AppliedAddon, Category, Expense, InventoryItem, InventoryRecord, Product, Size,
        SubmittedReport, Tenant, Transaction, TransactionItem, User,
    },
    response::{ApiResponse, Meta},
    routes::{
        addons, auth, categories, expenses, health, inventory, params, products, reports,
        sizes, submitted_reports, tenants, transactions, users,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        users::list_users,
        users::create_user,
        tenants::get_by_slug,
        tenants::get_me,
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        sizes::list_sizes,
        sizes::get_size,
        sizes::create_size,
        sizes::update_size,
        sizes::delete_size,
        addons::list_addons,
        addons::get_addon,
        addons::create_addon,
        addons::update_addon,
        addons::delete_addon,
        transactions::list_transactions,
        transactions::transaction_stats,
        transactions::get_transaction,
        transactions::create_transaction,
        transactions::update_void_status,
        expenses::list_expenses,
        expenses::get_expense,
        expenses::create_expense,
        expenses::update_expense,
        expenses::delete_expense,
        inventory::list_items,
        inventory::get_item,
        inventory::create_item,
        inventory::update_item,
        inventory::list_records,
        inventory::create_record,
        inventory::create_records_bulk,
        inventory::latest_view,
        inventory::inventory_stats,
        reports::analytics,
        submitted_reports::list_reports,
        submitted_reports::create_report,
        submitted_reports::report_stats,
        submitted_reports::get_report
    ),
    components(
        schemas(
            Tenant,
            User,
            Category,
            Product,
            Size,
            Addon,
            Transaction,
            TransactionItem,
            AppliedAddon,
            Expense,
            InventoryItem,
            InventoryRecord,
            SubmittedReport,
            LoginRequest,
            LoginResponse,
            CreateUserRequest,
            UserList,
            CreateCategoryRequest,
            UpdateCategoryRequest,
            CategoryList,
            CreateSizeRequest,
            UpdateSizeRequest,
            SizeList,
            CreateAddonRequest,
            UpdateAddonRequest,
            AddonList,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            CreateTransactionRequest,
            CreateTransactionItemRequest,
            UpdateVoidStatusRequest,
            TransactionWithItems,
            TransactionList,
            TransactionStats,
            CreateExpenseRequest,
            UpdateExpenseRequest,
            ExpenseList,
            CreateInventoryItemRequest,
            UpdateInventoryItemRequest,
            InventoryItemList,
            CreateInventoryRecordRequest,
            BulkInventoryRecordsRequest,
            InventoryRecordList,
            ItemLatest,
            InventoryLatestList,
            InventoryStats,
            AnalyticsReport,
            SalesSummary,
            ExpenseSummary,
            PaymentMethodBreakdown,
            ExpenseCategoryBreakdown,
            CreateSubmittedReportRequest,
            SubmittedReportList,
            SubmittedReportDetail,
            SubmittedReportStats,
            params::Pagination,
            Meta,
            ApiResponse<Tenant>,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<TransactionWithItems>,
            ApiResponse<TransactionList>,
            ApiResponse<AnalyticsReport>,
            ApiResponse<SubmittedReportDetail>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Users", description = "Tenant user provisioning"),
        (name = "Tenants", description = "Store resolution endpoints"),
        (name = "Categories", description = "Category endpoints"),
        (name = "Products", description = "Product endpoints"),
        (name = "Sizes", description = "Size endpoints"),
        (name = "Addons", description = "Addon endpoints"),
        (name = "Transactions", description = "Sales capture endpoints"),
        (name = "Expenses", description = "Expense endpoints"),
        (name = "Inventory", description = "Inventory tracking endpoints"),
        (name = "Reports", description = "Analytics endpoints"),
        (name = "SubmittedReports", description = "End-of-day report snapshots"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
