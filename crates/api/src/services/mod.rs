//! Application services behind the route handlers.

pub mod audit;
pub mod auth;
pub mod partner_store;

#[allow(unused_imports)] // Re-exports for downstream use
pub use audit::AuditLogger;
#[allow(unused_imports)] // Re-exports for downstream use
pub use auth::{AuthError, AuthService, LoginSuccess};
#[allow(unused_imports)] // Re-exports for downstream use
pub use partner_store::{HostedPartnerStore, PartnerRecord, PartnerStore, PartnerStoreError};
