//! Payment term domain model (installment schedules).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::normalize::normalize;
use shared::validation::{validate_codigo, validate_status};
use validator::Validate;

/// A payment term: how many installments and how far apart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentTerm {
    pub id: i64,
    pub codigo: String,
    pub descricao: String,
    pub parcelas: i32,
    pub intervalo_dias: i32,
    pub status: String,
    pub criado_em: DateTime<Utc>,
    pub atualizado_em: DateTime<Utc>,
}

/// Payload accepted when creating or replacing a payment term.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PaymentTermInput {
    #[validate(custom(function = "validate_codigo"))]
    pub codigo: Option<String>,
    #[validate(length(min = 1, max = 120, message = "Descrição é obrigatória"))]
    pub descricao: String,
    #[validate(range(min = 1, max = 120, message = "Parcelas deve estar entre 1 e 120"))]
    pub parcelas: i32,
    #[serde(default = "default_intervalo")]
    #[validate(range(min = 0, max = 365, message = "Intervalo deve estar entre 0 e 365 dias"))]
    pub intervalo_dias: i32,
    #[serde(default = "default_status")]
    #[validate(custom(function = "validate_status"))]
    pub status: String,
}

impl PaymentTermInput {
    /// Canonical form as persisted.
    pub fn normalized(mut self) -> Self {
        self.codigo = self.codigo.map(|c| normalize(c.trim()));
        self.descricao = normalize(self.descricao.trim());
        self.status = normalize(self.status.trim());
        self
    }
}

fn default_intervalo() -> i32 {
    30
}

fn default_status() -> String {
    "ATIVO".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> PaymentTermInput {
        PaymentTermInput {
            codigo: None,
            descricao: "Entrada + 2x 30/60".to_string(),
            parcelas: 3,
            intervalo_dias: 30,
            status: "ATIVO".to_string(),
        }
    }

    #[test]
    fn valid_input_passes_validation() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn zero_installments_is_rejected() {
        let mut payload = input();
        payload.parcelas = 0;
        assert!(payload.validate().is_err());
    }

    #[test]
    fn negative_interval_is_rejected() {
        let mut payload = input();
        payload.intervalo_dias = -1;
        assert!(payload.validate().is_err());
    }

    #[test]
    fn interval_defaults_to_thirty_days() {
        let payload: PaymentTermInput =
            serde_json::from_str(r#"{"descricao": "À vista", "parcelas": 1}"#).unwrap();
        assert_eq!(payload.intervalo_dias, 30);
        assert_eq!(payload.status, "ATIVO");
    }

    #[test]
    fn normalized_uppercases_description() {
        let normalized = input().normalized();
        assert_eq!(normalized.descricao, "ENTRADA + 2X 30/60");
    }
}
