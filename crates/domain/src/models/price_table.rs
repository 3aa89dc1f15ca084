//! Price table domain model for the commercial module.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::normalize::normalize;
use shared::validation::{validate_codigo, validate_status};
use validator::Validate;

/// A price table applying a percentage adjustment over the base price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceTable {
    pub id: i64,
    pub codigo: String,
    pub descricao: String,
    pub percentual_ajuste: f64,
    pub status: String,
    pub criado_em: DateTime<Utc>,
    pub atualizado_em: DateTime<Utc>,
}

/// Payload accepted when creating or replacing a price table.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PriceTableInput {
    #[validate(custom(function = "validate_codigo"))]
    pub codigo: Option<String>,
    #[validate(length(min = 1, max = 120, message = "Descrição é obrigatória"))]
    pub descricao: String,
    #[serde(default)]
    #[validate(range(
        min = -100.0,
        max = 1000.0,
        message = "Percentual de ajuste deve estar entre -100 e 1000"
    ))]
    pub percentual_ajuste: f64,
    #[serde(default = "default_status")]
    #[validate(custom(function = "validate_status"))]
    pub status: String,
}

impl PriceTableInput {
    /// Canonical form as persisted.
    pub fn normalized(mut self) -> Self {
        self.codigo = self.codigo.map(|c| normalize(c.trim()));
        self.descricao = normalize(self.descricao.trim());
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

    fn input() -> PriceTableInput {
        PriceTableInput {
            codigo: None,
            descricao: "Tabela Atacado".to_string(),
            percentual_ajuste: -12.5,
            status: "ATIVO".to_string(),
        }
    }

    #[test]
    fn valid_input_passes_validation() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn discount_below_minus_hundred_is_rejected() {
        let mut payload = input();
        payload.percentual_ajuste = -150.0;
        assert!(payload.validate().is_err());
    }

    #[test]
    fn adjustment_defaults_to_zero() {
        let payload: PriceTableInput =
            serde_json::from_str(r#"{"descricao": "Varejo"}"#).unwrap();
        assert_eq!(payload.percentual_ajuste, 0.0);
    }

    #[test]
    fn normalized_uppercases_description() {
        let normalized = input().normalized();
        assert_eq!(normalized.descricao, "TABELA ATACADO");
    }
}
