//! Role-based access control as a single declarative table.
//!
//! Every service consults `ensure_allowed` before touching storage, so the
//! rules live in one place instead of ad-hoc role comparisons per endpoint.

use crate::{error::AppError, middleware::auth::AuthUser};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_CASHIER: &str = "cashier";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Tenants,
    Users,
    Categories,
    Products,
    Sizes,
    Addons,
    Transactions,
    Expenses,
    InventoryItems,
    InventoryRecords,
    Reports,
    SubmittedReports,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

/// What a cashier may do. Admin is allowed everything within its tenant,
/// so only the cashier rows need to be spelled out.
const CASHIER_ALLOW: &[(Resource, Action)] = &[
    (Resource::Tenants, Action::Read),
    (Resource::Categories, Action::Read),
    (Resource::Products, Action::Read),
    (Resource::Sizes, Action::Read),
    (Resource::Addons, Action::Read),
    (Resource::Transactions, Action::Read),
    (Resource::Transactions, Action::Create),
    (Resource::Expenses, Action::Read),
    (Resource::Expenses, Action::Create),
    (Resource::InventoryItems, Action::Read),
    (Resource::InventoryRecords, Action::Read),
    (Resource::InventoryRecords, Action::Create),
    (Resource::Reports, Action::Read),
    (Resource::SubmittedReports, Action::Read),
    (Resource::SubmittedReports, Action::Create),
];

pub fn is_allowed(role: &str, resource: Resource, action: Action) -> bool {
    match role {
        ROLE_ADMIN => true,
        ROLE_CASHIER => CASHIER_ALLOW.contains(&(resource, action)),
        _ => false,
    }
}

pub fn ensure_allowed(user: &AuthUser, resource: Resource, action: Action) -> Result<(), AppError> {
    if is_allowed(&user.role, resource, action) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
