//! Favorite entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::Favorite;

/// Database row mapping for the favoritos table.
#[derive(Debug, Clone, FromRow)]
pub struct FavoriteEntity {
    pub id: i64,
    pub usuario_id: i64,
    pub modulo: String,
    pub tela: String,
    pub rota: String,
    pub descricao: Option<String>,
    pub criado_em: DateTime<Utc>,
}

impl From<FavoriteEntity> for Favorite {
    fn from(entity: FavoriteEntity) -> Self {
        Self {
            id: entity.id,
            usuario_id: entity.usuario_id,
            modulo: entity.modulo,
            tela: entity.tela,
            rota: entity.rota,
            descricao: entity.descricao,
            criado_em: entity.criado_em,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_favorite_entity_to_domain() {
        let entity = FavoriteEntity {
            id: 11,
            usuario_id: 2,
            modulo: "FINANCEIRO".to_string(),
            tela: "BANCOS".to_string(),
            rota: "/financeiro/bancos".to_string(),
            descricao: None,
            criado_em: Utc::now(),
        };
        let favorite: Favorite = entity.into();

        assert_eq!(favorite.id, 11);
        assert_eq!(favorite.usuario_id, 2);
        assert_eq!(favorite.rota, "/financeiro/bancos");
    }
}
