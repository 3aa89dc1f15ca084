//! Bank account domain model for the financial module.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::normalize::normalize;
use shared::validation::{validate_codigo, validate_status, validate_texto_permitido};
use validator::Validate;

/// A bank account referenced by financial movements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bank {
    pub id: i64,
    pub codigo: String,
    pub nome_banco: String,
    pub agencia: String,
    pub conta: String,
    pub status: String,
    pub criado_em: DateTime<Utc>,
    pub atualizado_em: DateTime<Utc>,
}

/// Payload accepted when creating or replacing a bank account.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BankInput {
    #[validate(custom(function = "validate_codigo"))]
    pub codigo: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Nome do banco é obrigatório"))]
    pub nome_banco: String,
    #[validate(
        length(min = 1, max = 20, message = "Agência é obrigatória"),
        custom(function = "validate_texto_permitido")
    )]
    pub agencia: String,
    #[validate(
        length(min = 1, max = 20, message = "Conta é obrigatória"),
        custom(function = "validate_texto_permitido")
    )]
    pub conta: String,
    #[serde(default = "default_status")]
    #[validate(custom(function = "validate_status"))]
    pub status: String,
}

impl BankInput {
    /// Canonical form as persisted.
    pub fn normalized(mut self) -> Self {
        self.codigo = self.codigo.map(|c| normalize(c.trim()));
        self.nome_banco = normalize(self.nome_banco.trim());
        self.agencia = normalize(self.agencia.trim());
        self.conta = normalize(self.conta.trim());
        self.status = normalize(self.status.trim());
        self
    }
}

fn default_status() -> String {
    "ATIVO".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> BankInput {
        BankInput {
            codigo: Some("BCO0007".to_string()),
            nome_banco: "Banco Itaú".to_string(),
            agencia: "1234-5".to_string(),
            conta: "98765-0".to_string(),
            status: "ATIVO".to_string(),
        }
    }

    #[test]
    fn valid_input_passes_validation() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn code_with_whitespace_is_rejected() {
        let mut payload = input();
        payload.codigo = Some("BCO 7".to_string());
        assert!(payload.validate().is_err());
    }

    #[test]
    fn account_with_forbidden_characters_is_rejected() {
        let mut payload = input();
        payload.conta = "98765*0".to_string();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn unknown_status_is_rejected() {
        let mut payload = input();
        payload.status = "PENDENTE".to_string();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn normalized_strips_accents_from_name() {
        let normalized = input().normalized();
        assert_eq!(normalized.nome_banco, "BANCO ITAU");
        assert_eq!(normalized.agencia, "1234-5");
    }
}
