//! Payment term entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::PaymentTerm;

/// Database row mapping for the condicoes_pagamento table.
#[derive(Debug, Clone, FromRow)]
pub struct PaymentTermEntity {
    pub id: i64,
    pub codigo: String,
    pub descricao: String,
    pub parcelas: i32,
    pub intervalo_dias: i32,
    pub status: String,
    pub criado_em: DateTime<Utc>,
    pub atualizado_em: DateTime<Utc>,
}

impl From<PaymentTermEntity> for PaymentTerm {
    fn from(entity: PaymentTermEntity) -> Self {
        Self {
            id: entity.id,
            codigo: entity.codigo,
            descricao: entity.descricao,
            parcelas: entity.parcelas,
            intervalo_dias: entity.intervalo_dias,
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
    fn test_payment_term_entity_to_domain() {
        let entity = PaymentTermEntity {
            id: 2,
            codigo: "CPG0002".to_string(),
            descricao: "30/60/90".to_string(),
            parcelas: 3,
            intervalo_dias: 30,
            status: "ATIVO".to_string(),
            criado_em: Utc::now(),
            atualizado_em: Utc::now(),
        };
        let term: PaymentTerm = entity.into();

        assert_eq!(term.codigo, "CPG0002");
        assert_eq!(term.parcelas, 3);
        assert_eq!(term.intervalo_dias, 30);
    }
}
