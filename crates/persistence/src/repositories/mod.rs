//! Repository implementations for database operations.

pub mod audit_config;
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

pub use audit_config::{AuditConfigRepository, AuditConfigUpsert};
pub use audit_log::{AuditLogFilter, AuditLogRepository};
pub use backup::BackupRepository;
pub use bank::BankRepository;
pub use employee::EmployeeRepository;
pub use favorite::FavoriteRepository;
pub use payment_method::PaymentMethodRepository;
pub use payment_term::PaymentTermRepository;
pub use price_table::PriceTableRepository;
pub use reconciliation_rule::ReconciliationRuleRepository;
pub use user::UserRepository;
