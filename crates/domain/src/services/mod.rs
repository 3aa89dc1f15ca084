//! Domain services for the Gestor ERP backend.
//!
//! Services contain business logic that operates on domain models.

pub mod codes;

pub use codes::{format_code, next_code, parse_sequence, partner_code};
