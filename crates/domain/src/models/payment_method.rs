//! Payment method domain model (cash, card, transfer and the like).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::normalize::normalize;
use shared::validation::{validate_codigo, validate_status};
use validator::Validate;

/// A way of paying or receiving money.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: i64,
    pub codigo: String,
    pub descricao: String,
    pub tipo: String,
    pub taxa_percentual: f64,
    pub status: String,
    pub criado_em: DateTime<Utc>,
    pub atualizado_em: DateTime<Utc>,
}

/// Payload accepted when creating or replacing a payment method.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PaymentMethodInput {
    #[validate(custom(function = "validate_codigo"))]
    pub codigo: Option<String>,
    #[validate(length(min = 1, max = 120, message = "Descrição é obrigatória"))]
    pub descricao: String,
    #[validate(length(min = 1, max = 40, message = "Tipo é obrigatório"))]
    pub tipo: String,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0, message = "Taxa deve estar entre 0 e 100"))]
    pub taxa_percentual: f64,
    #[serde(default = "default_status")]
    #[validate(custom(function = "validate_status"))]
    pub status: String,
}

impl PaymentMethodInput {
    /// Canonical form as persisted.
    pub fn normalized(mut self) -> Self {
        self.codigo = self.codigo.map(|c| normalize(c.trim()));
        self.descricao = normalize(self.descricao.trim());
        self.tipo = normalize(self.tipo.trim());
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

    fn input() -> PaymentMethodInput {
        PaymentMethodInput {
            codigo: None,
            descricao: "Cartão de Crédito".to_string(),
            tipo: "cartao".to_string(),
            taxa_percentual: 2.5,
            status: "ATIVO".to_string(),
        }
    }

    #[test]
    fn valid_input_passes_validation() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn missing_type_is_rejected() {
        let mut payload = input();
        payload.tipo = String::new();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn fee_above_hundred_percent_is_rejected() {
        let mut payload = input();
        payload.taxa_percentual = 120.0;
        assert!(payload.validate().is_err());
    }

    #[test]
    fn fee_defaults_to_zero() {
        let payload: PaymentMethodInput =
            serde_json::from_str(r#"{"descricao": "Dinheiro", "tipo": "dinheiro"}"#).unwrap();
        assert_eq!(payload.taxa_percentual, 0.0);
    }

    #[test]
    fn normalized_uppercases_type() {
        let normalized = input().normalized();
        assert_eq!(normalized.descricao, "CARTAO DE CREDITO");
        assert_eq!(normalized.tipo, "CARTAO");
    }
}
