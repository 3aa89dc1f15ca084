//! Shared utilities and common types for the Gestor ERP backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Text normalization (uppercase, diacritic-free canonical form)
//! - JSON-safe serialization of wide-integer row values
//! - Password hashing with Argon2id (plus legacy hash verification)
//! - JWT issuance and validation
//! - Common validation logic

pub mod crypto;
pub mod jwt;
pub mod normalize;
pub mod password;
pub mod rows;
pub mod validation;
