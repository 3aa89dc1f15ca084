//! Bank entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::Bank;

/// Database row mapping for the bancos table.
#[derive(Debug, Clone, FromRow)]
pub struct BankEntity {
    pub id: i64,
    pub codigo: String,
    pub nome_banco: String,
    pub agencia: String,
    pub conta: String,
    pub status: String,
    pub criado_em: DateTime<Utc>,
    pub atualizado_em: DateTime<Utc>,
}

impl From<BankEntity> for Bank {
    fn from(entity: BankEntity) -> Self {
        Self {
            id: entity.id,
            codigo: entity.codigo,
            nome_banco: entity.nome_banco,
            agencia: entity.agencia,
            conta: entity.conta,
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
    fn test_bank_entity_to_domain() {
        let entity = BankEntity {
            id: 3,
            codigo: "BCO0003".to_string(),
            nome_banco: "BANCO DO BRASIL".to_string(),
            agencia: "1234-5".to_string(),
            conta: "67890-1".to_string(),
            status: "ATIVO".to_string(),
            criado_em: Utc::now(),
            atualizado_em: Utc::now(),
        };
        let bank: Bank = entity.clone().into();

        assert_eq!(bank.id, 3);
        assert_eq!(bank.codigo, "BCO0003");
        assert_eq!(bank.nome_banco, "BANCO DO BRASIL");
        assert_eq!(bank.agencia, entity.agencia);
        assert_eq!(bank.conta, entity.conta);
    }
}
