//! Employee entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::Employee;

/// Database row mapping for the funcionarios table.
#[derive(Debug, Clone, FromRow)]
pub struct EmployeeEntity {
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

impl From<EmployeeEntity> for Employee {
    fn from(entity: EmployeeEntity) -> Self {
        Self {
            id: entity.id,
            codigo: entity.codigo,
            nome: entity.nome,
            cpf: entity.cpf,
            cargo: entity.cargo,
            departamento: entity.departamento,
            telefone: entity.telefone,
            email: entity.email,
            status: entity.status,
            criado_em: entity.criado_em,
            atualizado_em: entity.atualizado_em,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_employee_entity() -> EmployeeEntity {
        EmployeeEntity {
            id: 1,
            codigo: "FUN0001".to_string(),
            nome: "MARIA OLIVEIRA".to_string(),
            cpf: Some("52998224725".to_string()),
            cargo: Some("ANALISTA".to_string()),
            departamento: None,
            telefone: None,
            email: Some("maria@empresa.com".to_string()),
            status: "ATIVO".to_string(),
            criado_em: Utc::now(),
            atualizado_em: Utc::now(),
        }
    }

    #[test]
    fn test_employee_entity_to_domain() {
        let entity = create_test_employee_entity();
        let employee: Employee = entity.clone().into();

        assert_eq!(employee.id, entity.id);
        assert_eq!(employee.codigo, "FUN0001");
        assert_eq!(employee.nome, "MARIA OLIVEIRA");
        assert_eq!(employee.cpf.as_deref(), Some("52998224725"));
        assert_eq!(employee.status, "ATIVO");
    }
}
