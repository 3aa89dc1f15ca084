//! Payment method entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::PaymentMethod;

/// Database row mapping for the formas_pagamento table.
#[derive(Debug, Clone, FromRow)]
pub struct PaymentMethodEntity {
    pub id: i64,
    pub codigo: String,
    pub descricao: String,
    pub tipo: String,
    pub taxa_percentual: f64,
    pub status: String,
    pub criado_em: DateTime<Utc>,
    pub atualizado_em: DateTime<Utc>,
}

impl From<PaymentMethodEntity> for PaymentMethod {
    fn from(entity: PaymentMethodEntity) -> Self {
        Self {
            id: entity.id,
            codigo: entity.codigo,
            descricao: entity.descricao,
            tipo: entity.tipo,
            taxa_percentual: entity.taxa_percentual,
            status: entity.status,
            criado_em: entity.criado_em,
            atualizado_em: entity.atualizado_em,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_entity_to_domain() {
        let entity = PaymentMethodEntity {
            id: 1,
            codigo: "FPG0001".to_string(),
            descricao: "CARTAO DE CREDITO".to_string(),
            tipo: "CARTAO".to_string(),
            taxa_percentual: 2.49,
            status: "ATIVO".to_string(),
            criado_em: Utc::now(),
            atualizado_em: Utc::now(),
        };
        let method: PaymentMethod = entity.into();

        assert_eq!(method.codigo, "FPG0001");
        assert_eq!(method.tipo, "CARTAO");
        assert_eq!(method.taxa_percentual, 2.49);
    }
}
