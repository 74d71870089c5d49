pub mod addons;
pub mod audit_logs;
pub mod categories;
pub mod expenses;
pub mod inventory_items;
pub mod inventory_records;
pub mod product_addons;
pub mod product_sizes;
pub mod products;
pub mod sizes;
pub mod submitted_reports;
pub mod tenants;
pub mod transaction_items;
pub mod transactions;
pub mod users;

pub use addons::Entity as Addons;
pub use audit_logs::Entity as AuditLogs;
pub use categories::Entity as Categories;
pub use expenses::Entity as Expenses;
pub use inventory_items::Entity as InventoryItems;
pub use inventory_records::Entity as InventoryRecords;
pub use product_addons::Entity as ProductAddons;
pub use product_sizes::Entity as ProductSizes;
pub use products::Entity as Products;
pub use sizes::Entity as Sizes;
pub use submitted_reports::Entity as SubmittedReports;
pub use tenants::Entity as Tenants;
pub use transaction_items::Entity as TransactionItems;
pub use transactions::Entity as Transactions;
pub use users::Entity as Users;
