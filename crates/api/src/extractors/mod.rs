//! Custom Axum extractors.

pub mod client_meta;
pub mod user_auth;

#[allow(unused_imports)] // Re-exports for downstream use
pub use client_meta::ClientMeta;
#[allow(unused_imports)] // Re-exports for downstream use
pub use user_auth::UserAuth;
