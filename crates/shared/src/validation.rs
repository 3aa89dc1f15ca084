//! Common validation utilities for request DTOs.

use validator::ValidationError;

use crate::normalize::{is_allowed_text, normalize_strict};

/// Statuses accepted for business entities.
const ENTITY_STATUSES: [&str; 2] = ["ATIVO", "INATIVO"];

/// Backup frequencies accepted by the backup configuration.
const BACKUP_FREQUENCIES: [&str; 3] = ["DIARIO", "SEMANAL", "MENSAL"];

/// Validates a business-entity status flag (ATIVO/INATIVO, any input case).
pub fn validate_status(status: &str) -> Result<(), ValidationError> {
    if ENTITY_STATUSES.contains(&status.to_uppercase().as_str()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("status_invalido");
        err.message = Some("Status deve ser ATIVO ou INATIVO".into());
        Err(err)
    }
}

/// Validates free text against the allowed charset (letters, digits,
/// whitespace and `.,-/()` after normalization).
pub fn validate_texto_permitido(text: &str) -> Result<(), ValidationError> {
    if is_allowed_text(text) {
        Ok(())
    } else {
        let mut err = ValidationError::new("caracteres_invalidos");
        err.message = Some("Campo contém caracteres não permitidos".into());
        Err(err)
    }
}

/// Validates a caller-supplied business code: allowed charset, no internal
/// whitespace, and a non-empty strict form.
pub fn validate_codigo(codigo: &str) -> Result<(), ValidationError> {
    let ok = is_allowed_text(codigo)
        && !codigo.chars().any(char::is_whitespace)
        && !normalize_strict(codigo).is_empty();
    if ok {
        Ok(())
    } else {
        let mut err = ValidationError::new("codigo_invalido");
        err.message = Some("Código deve conter apenas letras, números e separadores".into());
        Err(err)
    }
}

/// Validates a time of day in `HH:MM` (24h) form.
pub fn validate_horario(horario: &str) -> Result<(), ValidationError> {
    let valid = matches!(horario.split_once(':'), Some((h, m))
        if h.len() == 2
            && m.len() == 2
            && h.parse::<u32>().map(|v| v < 24).unwrap_or(false)
            && m.parse::<u32>().map(|v| v < 60).unwrap_or(false));
    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("horario_invalido");
        err.message = Some("Horário deve estar no formato HH:MM".into());
        Err(err)
    }
}

/// Validates a backup frequency (DIARIO/SEMANAL/MENSAL, any input case).
pub fn validate_frequencia(frequencia: &str) -> Result<(), ValidationError> {
    if BACKUP_FREQUENCIES.contains(&frequencia.to_uppercase().as_str()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("frequencia_invalida");
        err.message = Some("Frequência deve ser DIARIO, SEMANAL ou MENSAL".into());
        Err(err)
    }
}

/// Validates a CPF: eleven digits (punctuation ignored) with correct check
/// digits. Repeated-digit sequences like `111.111.111-11` are rejected.
pub fn validate_cpf(cpf: &str) -> Result<(), ValidationError> {
    let digits: Vec<u32> = cpf.chars().filter_map(|c| c.to_digit(10)).collect();

    let valid = digits.len() == 11
        && !digits.iter().all(|&d| d == digits[0])
        && cpf_check_digit(&digits[..9]) == digits[9]
        && cpf_check_digit(&digits[..10]) == digits[10];

    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("cpf_invalido");
        err.message = Some("CPF inválido".into());
        Err(err)
    }
}

/// Brazilian state codes (UF), including the federal district.
const UFS: [&str; 27] = [
    "AC", "AL", "AP", "AM", "BA", "CE", "DF", "ES", "GO", "MA", "MT", "MS", "MG", "PA", "PB",
    "PR", "PE", "PI", "RJ", "RN", "RS", "RO", "RR", "SC", "SP", "SE", "TO",
];

/// Validates a two letter state code, case insensitive.
pub fn validate_uf(uf: &str) -> Result<(), ValidationError> {
    if UFS.contains(&uf.trim().to_uppercase().as_str()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("uf_invalida");
        err.message = Some("UF inválida".into());
        Err(err)
    }
}

/// Modulo-11 check digit over a CPF prefix.
fn cpf_check_digit(digits: &[u32]) -> u32 {
    let weight_start = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| d * (weight_start - i as u32))
        .sum();
    match (sum * 10) % 11 {
        10 => 0,
        d => d,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_status() {
        assert!(validate_status("ATIVO").is_ok());
        assert!(validate_status("INATIVO").is_ok());
        assert!(validate_status("ativo").is_ok());
        assert!(validate_status("PENDENTE").is_err());
        assert!(validate_status("").is_err());
    }

    #[test]
    fn test_validate_status_error_message() {
        let err = validate_status("OUTRO").unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "Status deve ser ATIVO ou INATIVO"
        );
    }

    #[test]
    fn test_validate_texto_permitido() {
        assert!(validate_texto_permitido("Ag. 1234-5 (Centro)").is_ok());
        assert!(validate_texto_permitido("Itaú").is_ok());
        assert!(validate_texto_permitido("").is_ok());
        assert!(validate_texto_permitido("conta#12").is_err());
        assert!(validate_texto_permitido("R$ 10").is_err());
    }

    #[test]
    fn test_validate_codigo() {
        assert!(validate_codigo("BCO0001").is_ok());
        assert!(validate_codigo("fun-22").is_ok());
        assert!(validate_codigo("COD/2024").is_ok());
        assert!(validate_codigo("").is_err());
        assert!(validate_codigo("COD 1").is_err());
        assert!(validate_codigo("C#1").is_err());
        assert!(validate_codigo("---").is_err());
    }

    #[test]
    fn test_validate_horario() {
        assert!(validate_horario("00:00").is_ok());
        assert!(validate_horario("03:30").is_ok());
        assert!(validate_horario("23:59").is_ok());
        assert!(validate_horario("24:00").is_err());
        assert!(validate_horario("12:60").is_err());
        assert!(validate_horario("3:30").is_err());
        assert!(validate_horario("0330").is_err());
        assert!(validate_horario("").is_err());
    }

    #[test]
    fn test_validate_frequencia() {
        assert!(validate_frequencia("DIARIO").is_ok());
        assert!(validate_frequencia("semanal").is_ok());
        assert!(validate_frequencia("MENSAL").is_ok());
        assert!(validate_frequencia("ANUAL").is_err());
    }

    #[test]
    fn test_validate_cpf_valid_numbers() {
        // Check digits computed by the standard modulo-11 rule.
        assert!(validate_cpf("529.982.247-25").is_ok());
        assert!(validate_cpf("52998224725").is_ok());
    }

    #[test]
    fn test_validate_cpf_invalid() {
        assert!(validate_cpf("529.982.247-26").is_err());
        assert!(validate_cpf("111.111.111-11").is_err());
        assert!(validate_cpf("123").is_err());
        assert!(validate_cpf("").is_err());
        assert!(validate_cpf("abcdefghijk").is_err());
    }

    #[test]
    fn test_cpf_check_digit() {
        let digits: Vec<u32> = "529982247".chars().filter_map(|c| c.to_digit(10)).collect();
        assert_eq!(cpf_check_digit(&digits), 2);
    }

    #[test]
    fn test_validate_uf() {
        assert!(validate_uf("RS").is_ok());
        assert!(validate_uf("sp").is_ok());
        assert!(validate_uf(" DF ").is_ok());
        assert!(validate_uf("XX").is_err());
        assert!(validate_uf("").is_err());
    }
}
