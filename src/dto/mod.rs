pub mod auth;
pub mod catalog;
pub mod expenses;
pub mod inventory;
pub mod products;
pub mod reports;
pub mod submitted_reports;
pub mod transactions;
