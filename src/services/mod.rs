pub mod addon_service;
pub mod auth_service;
pub mod category_service;
pub mod expense_service;
pub mod inventory_service;
pub mod product_service;
pub mod report_service;
pub mod size_service;
pub mod submitted_report_service;
pub mod tenant_service;
pub mod transaction_service;
pub mod user_service;
