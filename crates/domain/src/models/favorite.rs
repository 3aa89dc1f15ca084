//! User favorite shortcuts (pinned screens).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A screen a user pinned to their home panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Favorite {
    pub id: i64,
    pub usuario_id: i64,
    pub modulo: String,
    pub tela: String,
    pub rota: String,
    pub descricao: Option<String>,
    pub criado_em: DateTime<Utc>,
}

/// Payload accepted when pinning a screen.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FavoriteInput {
    #[validate(length(min = 1, max = 40, message = "Módulo é obrigatório"))]
    pub modulo: String,
    #[validate(length(min = 1, max = 60, message = "Tela é obrigatória"))]
    pub tela: String,
    #[validate(length(min = 1, max = 200, message = "Rota é obrigatória"))]
    pub rota: String,
    #[validate(length(max = 120, message = "Descrição deve ter no máximo 120 caracteres"))]
    pub descricao: Option<String>,
}

impl FavoriteInput {
    /// Canonical form as persisted. The route keeps its original case
    /// so it can be replayed against the frontend router.
    pub fn normalized(mut self) -> Self {
        self.modulo = self.modulo.trim().to_uppercase();
        self.tela = self.tela.trim().to_uppercase();
        self.rota = self.rota.trim().to_string();
        self.descricao = self
            .descricao
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> FavoriteInput {
        FavoriteInput {
            modulo: "financeiro".to_string(),
            tela: "bancos".to_string(),
            rota: "/Financeiro/Bancos".to_string(),
            descricao: Some("  ".to_string()),
        }
    }

    #[test]
    fn valid_input_passes_validation() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn empty_route_is_rejected() {
        let mut payload = input();
        payload.rota = String::new();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn normalized_uppercases_module_and_screen_only() {
        let normalized = input().normalized();
        assert_eq!(normalized.modulo, "FINANCEIRO");
        assert_eq!(normalized.tela, "BANCOS");
        assert_eq!(normalized.rota, "/Financeiro/Bancos");
    }

    #[test]
    fn blank_description_becomes_none() {
        let normalized = input().normalized();
        assert!(normalized.descricao.is_none());
    }
}
