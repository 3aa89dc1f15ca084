//! Business partner domain model (customers, suppliers, carriers).
//!
//! Partner rows live in a hosted row store rather than the local
//! database, so the record type here is a JSON object and normalization
//! works field by field over that object.

use serde::Deserialize;
use serde_json::{Map, Value};
use shared::normalize::normalize;
use shared::validation::{validate_status, validate_uf};
use validator::Validate;

/// Fields folded to upper case without diacritics when a partner record
/// is normalized. Everything else string-valued is only trimmed.
pub const UPPERCASED_FIELDS: &[&str] = &[
    "razao_social",
    "nome_fantasia",
    "endereco",
    "bairro",
    "cidade",
    "estado",
    "banco",
    "observacoes",
    "tipo",
    "status",
];

/// Fields folded to lower case: addresses on the wire are case
/// insensitive and stored canonical.
pub const LOWERCASED_FIELDS: &[&str] = &["email", "website"];

/// Normalizes every string field of a partner record in place, keeping
/// the key order of the incoming object.
///
/// Non-string values pass through untouched, so numeric and boolean
/// columns from the row store are never disturbed.
pub fn normalize_partner_record(record: Map<String, Value>) -> Map<String, Value> {
    record
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(text) => Value::String(normalize_partner_field(&key, &text)),
                other => other,
            };
            (key, value)
        })
        .collect()
}

fn normalize_partner_field(key: &str, text: &str) -> String {
    if UPPERCASED_FIELDS.contains(&key) {
        normalize(text.trim())
    } else if LOWERCASED_FIELDS.contains(&key) {
        text.trim().to_lowercase()
    } else {
        text.trim().to_string()
    }
}

/// Payload accepted when creating or replacing a partner.
///
/// The business code is optional on create; when absent a `PAR` code is
/// generated from the current timestamp.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PartnerInput {
    pub codigo: Option<String>,
    #[validate(length(min = 1, max = 30, message = "Tipo é obrigatório"))]
    pub tipo: String,
    #[validate(length(min = 1, max = 150, message = "Razão social é obrigatória"))]
    pub razao_social: String,
    #[validate(length(max = 150, message = "Nome fantasia deve ter no máximo 150 caracteres"))]
    pub nome_fantasia: Option<String>,
    #[validate(length(max = 18, message = "CNPJ/CPF deve ter no máximo 18 caracteres"))]
    pub cnpj_cpf: Option<String>,
    pub endereco: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    #[validate(custom(function = "validate_uf"))]
    pub estado: Option<String>,
    pub cep: Option<String>,
    pub telefone: Option<String>,
    #[validate(email(message = "Email inválido"))]
    pub email: Option<String>,
    pub website: Option<String>,
    pub banco: Option<String>,
    pub observacoes: Option<String>,
    #[serde(default = "default_status")]
    #[validate(custom(function = "validate_status"))]
    pub status: String,
}

impl PartnerInput {
    /// Converts the payload into a normalized row-store record. Absent
    /// optional fields are omitted rather than sent as nulls.
    pub fn into_record(self, codigo: String) -> Map<String, Value> {
        let mut record = Map::new();
        record.insert("codigo".to_string(), Value::String(codigo));
        record.insert("tipo".to_string(), Value::String(self.tipo));
        record.insert("razao_social".to_string(), Value::String(self.razao_social));
        insert_opt(&mut record, "nome_fantasia", self.nome_fantasia);
        insert_opt(&mut record, "cnpj_cpf", self.cnpj_cpf);
        insert_opt(&mut record, "endereco", self.endereco);
        insert_opt(&mut record, "bairro", self.bairro);
        insert_opt(&mut record, "cidade", self.cidade);
        insert_opt(&mut record, "estado", self.estado);
        insert_opt(&mut record, "cep", self.cep);
        insert_opt(&mut record, "telefone", self.telefone);
        insert_opt(&mut record, "email", self.email);
        insert_opt(&mut record, "website", self.website);
        insert_opt(&mut record, "banco", self.banco);
        insert_opt(&mut record, "observacoes", self.observacoes);
        record.insert("status".to_string(), Value::String(self.status));
        normalize_partner_record(record)
    }
}

fn insert_opt(record: &mut Map<String, Value>, key: &str, value: Option<String>) {
    if let Some(text) = value {
        record.insert(key.to_string(), Value::String(text));
    }
}

fn default_status() -> String {
    "ATIVO".to_string()
}
