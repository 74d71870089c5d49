use axum::Router;

use crate::state::AppState;

pub mod addons;
pub mod auth;
pub mod categories;
pub mod doc;
pub mod expenses;
pub mod health;
pub mod inventory;
pub mod params;
pub mod products;
pub mod reports;
pub mod sizes;
pub mod submitted_reports;
pub mod tenants;
pub mod transactions;
pub mod users;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/tenants", tenants::router())
        .nest("/categories", categories::router())
        .nest("/products", products::router())
        .nest("/sizes", sizes::router())
        .nest("/addons", addons::router())
        .nest("/transactions", transactions::router())
        .nest("/expenses", expenses::router())
        .nest("/inventory", inventory::router())
        .nest("/reports", reports::router())
        .nest("/submitted-reports", submitted_reports::router())
}
