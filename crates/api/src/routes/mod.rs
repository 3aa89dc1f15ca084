//! HTTP route handlers.

pub mod audit;
pub mod auth;
pub mod backup;
pub mod banks;
pub mod employees;
pub mod favorites;
pub mod health;
pub mod partners;
pub mod payment_methods;
pub mod payment_terms;
pub mod price_tables;
pub mod reconciliation_rules;
