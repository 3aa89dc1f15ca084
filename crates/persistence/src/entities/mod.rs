//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod audit_log;
pub mod backup;
pub mod bank;
pub mod employee;
pub mod favorite;
pub mod payment_method;
pub mod payment_term;
pub mod price_table;
pub mod reconciliation_rule;
pub mod user;

pub use audit_log::{AuditLogConfigEntity, AuditLogEntity};
pub use backup::{BackupConfigEntity, BackupRunEntity};
pub use bank::BankEntity;
pub use employee::EmployeeEntity;
pub use favorite::FavoriteEntity;
pub use payment_method::PaymentMethodEntity;
pub use payment_term::PaymentTermEntity;
pub use price_table::PriceTableEntity;
pub use reconciliation_rule::ReconciliationRuleEntity;
pub use user::{PermissionEntity, UserEntity};
