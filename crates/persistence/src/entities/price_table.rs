//! Price table entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::PriceTable;

/// Database row mapping for the tabelas_preco table.
#[derive(Debug, Clone, FromRow)]
pub struct PriceTableEntity {
    pub id: i64,
    pub codigo: String,
    pub descricao: String,
    pub percentual_ajuste: f64,
    pub status: String,
    pub criado_em: DateTime<Utc>,
    pub atualizado_em: DateTime<Utc>,
}

impl From<PriceTableEntity> for PriceTable {
    fn from(entity: PriceTableEntity) -> Self {
        Self {
            id: entity.id,
            codigo: entity.codigo,
            descricao: entity.descricao,
            percentual_ajuste: entity.percentual_ajuste,
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
    fn test_price_table_entity_to_domain() {
        let entity = PriceTableEntity {
            id: 4,
            codigo: "TBP0004".to_string(),
            descricao: "ATACADO".to_string(),
            percentual_ajuste: -12.5,
            status: "ATIVO".to_string(),
            criado_em: Utc::now(),
            atualizado_em: Utc::now(),
        };
        let table: PriceTable = entity.into();

        assert_eq!(table.codigo, "TBP0004");
        assert_eq!(table.percentual_ajuste, -12.5);
    }
}
