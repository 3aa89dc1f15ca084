//! Employee domain model for the administrative module.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::normalize::{normalize, normalize_opt};
use shared::validation::{validate_codigo, validate_cpf, validate_status};
use validator::Validate;

/// An employee record as stored and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub codigo: String,
    pub nome: String,
    pub cpf: Option<String>,
    pub cargo: Option<String>,
    pub departamento: Option<String>,
    pub telefone: Option<String>,
    pub email: Option<String>,
    pub status: String,
    pub criado_em: DateTime<Utc>,
    pub atualizado_em: DateTime<Utc>,
}

/// Payload accepted when creating or replacing an employee.
///
/// The business code is optional on create; when absent the next code in
/// the `FUN` sequence is generated server side.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmployeeInput {
    #[validate(custom(function = "validate_codigo"))]
    pub codigo: Option<String>,
    #[validate(length(min = 1, max = 120, message = "Nome é obrigatório"))]
    pub nome: String,
    #[validate(custom(function = "validate_cpf"))]
    pub cpf: Option<String>,
    #[validate(length(max = 80, message = "Cargo deve ter no máximo 80 caracteres"))]
    pub cargo: Option<String>,
    #[validate(length(max = 80, message = "Departamento deve ter no máximo 80 caracteres"))]
    pub departamento: Option<String>,
    #[validate(length(max = 20, message = "Telefone deve ter no máximo 20 caracteres"))]
    pub telefone: Option<String>,
    #[validate(email(message = "Email inválido"))]
    pub email: Option<String>,
    #[serde(default = "default_status")]
    #[validate(custom(function = "validate_status"))]
    pub status: String,
}

impl EmployeeInput {
    /// Canonical form as persisted: text upper-cased without diacritics,
    /// the CPF reduced to digits, the email lower-cased.
    pub fn normalized(mut self) -> Self {
        self.codigo = self.codigo.map(|c| normalize(c.trim()));
        self.nome = normalize(self.nome.trim());
        self.cpf = self
            .cpf
            .map(|c| c.chars().filter(|ch| ch.is_ascii_digit()).collect());
        self.cargo = normalize_opt(self.cargo.as_deref());
        self.departamento = normalize_opt(self.departamento.as_deref());
        self.telefone = self.telefone.map(|t| t.trim().to_string());
        self.email = self.email.map(|e| e.trim().to_lowercase());
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

    fn input() -> EmployeeInput {
        EmployeeInput {
            codigo: None,
            nome: "João da Silva".to_string(),
            cpf: Some("529.982.247-25".to_string()),
            cargo: Some("Analista".to_string()),
            departamento: None,
            telefone: Some(" (11) 99999-0000 ".to_string()),
            email: Some(" Joao.Silva@Empresa.COM ".to_string()),
            status: "ativo".to_string(),
        }
    }

    #[test]
    fn valid_input_passes_validation() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut payload = input();
        payload.nome = String::new();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn invalid_cpf_is_rejected() {
        let mut payload = input();
        payload.cpf = Some("111.111.111-11".to_string());
        assert!(payload.validate().is_err());
    }

    #[test]
    fn invalid_email_is_rejected() {
        let mut payload = input();
        payload.email = Some("not-an-email".to_string());
        assert!(payload.validate().is_err());
    }

    #[test]
    fn normalized_uppercases_and_strips_accents() {
        let normalized = input().normalized();
        assert_eq!(normalized.nome, "JOAO DA SILVA");
        assert_eq!(normalized.cpf.as_deref(), Some("52998224725"));
        assert_eq!(normalized.email.as_deref(), Some("joao.silva@empresa.com"));
        assert_eq!(normalized.telefone.as_deref(), Some("(11) 99999-0000"));
        assert_eq!(normalized.status, "ATIVO");
    }

    #[test]
    fn status_defaults_to_ativo() {
        let payload: EmployeeInput =
            serde_json::from_str(r#"{"nome": "Maria"}"#).unwrap();
        assert_eq!(payload.status, "ATIVO");
    }
}
