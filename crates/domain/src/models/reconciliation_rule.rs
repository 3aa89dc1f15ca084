//! Bank reconciliation rule domain model.
//!
//! Rules match free text from bank statements against a ledger account,
//! so the match pattern is stored verbatim apart from case folding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::normalize::{normalize, normalize_opt};
use shared::validation::{validate_codigo, validate_status, validate_texto_permitido};
use validator::Validate;

/// A rule that classifies statement lines during reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationRule {
    pub id: i64,
    pub codigo: String,
    pub descricao: String,
    pub padrao_texto: String,
    pub conta_contabil: Option<String>,
    pub prioridade: i32,
    pub status: String,
    pub criado_em: DateTime<Utc>,
    pub atualizado_em: DateTime<Utc>,
}

/// Payload accepted when creating or replacing a reconciliation rule.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReconciliationRuleInput {
    #[validate(custom(function = "validate_codigo"))]
    pub codigo: Option<String>,
    #[validate(length(min = 1, max = 120, message = "Descrição é obrigatória"))]
    pub descricao: String,
    #[validate(length(min = 1, max = 200, message = "Padrão de texto é obrigatório"))]
    pub padrao_texto: String,
    #[validate(
        length(max = 20, message = "Conta contábil deve ter no máximo 20 caracteres"),
        custom(function = "validate_texto_permitido")
    )]
    pub conta_contabil: Option<String>,
    #[serde(default = "default_prioridade")]
    #[validate(range(min = 1, max = 999, message = "Prioridade deve estar entre 1 e 999"))]
    pub prioridade: i32,
    #[serde(default = "default_status")]
    #[validate(custom(function = "validate_status"))]
    pub status: String,
}

impl ReconciliationRuleInput {
    /// Canonical form as persisted. The match pattern keeps its punctuation
    /// so statement text such as `PIX*LOJA` still matches.
    pub fn normalized(mut self) -> Self {
        self.codigo = self.codigo.map(|c| normalize(c.trim()));
        self.descricao = normalize(self.descricao.trim());
        self.padrao_texto = normalize(self.padrao_texto.trim());
        self.conta_contabil = normalize_opt(self.conta_contabil.as_deref());
        self.status = normalize(self.status.trim());
        self
    }
}

fn default_prioridade() -> i32 {
    100
}

fn default_status() -> String {
    "ATIVO".to_string()
}
