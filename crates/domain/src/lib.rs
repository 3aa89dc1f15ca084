//! Domain layer for the Gestor ERP backend.
//!
//! This crate contains:
//! - Entity models (Bank, Employee, PaymentTerm, ...)
//! - Audit log model and gating rules
//! - Business-code generation rules

pub mod models;
pub mod services;
