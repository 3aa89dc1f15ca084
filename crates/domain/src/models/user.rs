//! User account and permission models.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A login account. The password hash never leaves the persistence
/// layer, so it is not part of this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub nome: Option<String>,
    pub email: Option<String>,
    pub perfil: String,
    pub status: String,
    pub ultimo_acesso: Option<DateTime<Utc>>,
    pub criado_em: DateTime<Utc>,
}

/// Profile that bypasses the per-module permission table.
pub const PERFIL_ADMIN: &str = "ADMIN";

/// The modules an administrator is granted across.
pub const MODULES: [&str; 4] = ["ADMINISTRATIVO", "FINANCEIRO", "COMERCIAL", "SISTEMA"];

/// What a user may do inside one module.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PermissionFlags {
    pub leitura: bool,
    pub escrita: bool,
    pub exclusao: bool,
}

impl PermissionFlags {
    /// Full access, granted to administrators.
    pub fn all() -> Self {
        Self {
            leitura: true,
            escrita: true,
            exclusao: true,
        }
    }
}

/// Permissions keyed by module name, ordered for stable JSON output.
pub type PermissionMap = BTreeMap<String, PermissionFlags>;

/// The full-access map an `ADMIN` profile receives without consulting
/// the permission table.
pub fn admin_permissions() -> PermissionMap {
    MODULES
        .iter()
        .map(|m| (m.to_string(), PermissionFlags::all()))
        .collect()
}
