use axum_pos_api::policy::{Action, Resource, is_allowed, ROLE_ADMIN, ROLE_CASHIER};

#[test]
fn admin_is_allowed_everything() {
    for resource in [
        Resource::Tenants,
        Resource::Users,
        Resource::Categories,
        Resource::Products,
        Resource::Sizes,
        Resource::Addons,
        Resource::Transactions,
        Resource::Expenses,
        Resource::InventoryItems,
        Resource::InventoryRecords,
        Resource::Reports,
        Resource::SubmittedReports,
    ] {
        for action in [Action::Read, Action::Create, Action::Update, Action::Delete] {
            assert!(is_allowed(ROLE_ADMIN, resource, action));
        }
    }
}

#[test]
fn cashier_can_sell_but_not_manage_the_catalog() {
    assert!(is_allowed(ROLE_CASHIER, Resource::Products, Action::Read));
    assert!(is_allowed(ROLE_CASHIER, Resource::Transactions, Action::Create));
    assert!(is_allowed(ROLE_CASHIER, Resource::Expenses, Action::Create));
    assert!(is_allowed(ROLE_CASHIER, Resource::InventoryRecords, Action::Create));
    assert!(is_allowed(ROLE_CASHIER, Resource::SubmittedReports, Action::Create));

    assert!(!is_allowed(ROLE_CASHIER, Resource::Products, Action::Create));
    assert!(!is_allowed(ROLE_CASHIER, Resource::Categories, Action::Delete));
    assert!(!is_allowed(ROLE_CASHIER, Resource::Users, Action::Create));
    assert!(!is_allowed(ROLE_CASHIER, Resource::Transactions, Action::Update));
    assert!(!is_allowed(ROLE_CASHIER, Resource::InventoryItems, Action::Create));
}

#[test]
fn unknown_roles_are_denied() {
    assert!(!is_allowed("manager", Resource::Products, Action::Read));
    assert!(!is_allowed("", Resource::Products, Action::Read));
}
