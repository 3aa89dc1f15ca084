//! Domain models for the Gestor ERP backend.

pub mod audit;
pub mod backup;
pub mod bank;
pub mod employee;
pub mod favorite;
pub mod partner;
pub mod payment_method;
pub mod payment_term;
pub mod price_table;
pub mod reconciliation_rule;
pub mod user;

pub use audit::{audit_allowed, AuditAction, AuditEvent, AuditLogConfig, AuditLogEntry};
pub use backup::{BackupConfig, BackupConfigInput, BackupRun, BackupRunInput};
pub use bank::{Bank, BankInput};
pub use employee::{Employee, EmployeeInput};
pub use favorite::{Favorite, FavoriteInput};
pub use partner::{normalize_partner_record, PartnerInput};
pub use payment_method::{PaymentMethod, PaymentMethodInput};
pub use payment_term::{PaymentTerm, PaymentTermInput};
pub use price_table::{PriceTable, PriceTableInput};
pub use reconciliation_rule::{ReconciliationRule, ReconciliationRuleInput};
pub use user::{admin_permissions, PermissionFlags, PermissionMap, User, PERFIL_ADMIN};
