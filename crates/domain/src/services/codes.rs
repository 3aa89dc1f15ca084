//! Business code generation.
//!
//! Registration entities carry a short human readable code such as
//! `BCO0001`. Local tables use a per-prefix sequence derived from the
//! highest code already stored; partners live in a remote row store
//! where a scan is not practical, so their codes come from the clock.

use chrono::Utc;
use rand::Rng;

/// Code prefixes, one per registration entity.
pub mod prefixes {
    pub const FUNCIONARIO: &str = "FUN";
    pub const BANCO: &str = "BCO";
    pub const CONDICAO_PAGAMENTO: &str = "CPG";
    pub const FORMA_PAGAMENTO: &str = "FPG";
    pub const REGRA_CONCILIACAO: &str = "RGC";
    pub const TABELA_PRECO: &str = "TBP";
    pub const PARCEIRO: &str = "PAR";
}

/// Width the numeric part is padded to. Sequences past 9999 simply grow
/// a digit.
const SEQUENCE_WIDTH: usize = 4;

/// Formats a prefix and sequence number as a business code.
pub fn format_code(prefix: &str, sequence: u32) -> String {
    format!("{prefix}{sequence:0width$}", width = SEQUENCE_WIDTH)
}

/// Extracts the sequence number from a code, if the code belongs to the
/// given prefix and its tail is purely numeric.
pub fn parse_sequence(prefix: &str, code: &str) -> Option<u32> {
    let tail = code.strip_prefix(prefix)?;
    if tail.is_empty() || !tail.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    tail.parse().ok()
}

/// Next code in a sequence given the highest code currently stored.
///
/// Codes that do not parse (hand-entered values like `FUN-EXTRA`) are
/// ignored, so the sequence continues from the last generated one.
pub fn next_code(prefix: &str, highest: Option<&str>) -> String {
    let next = highest
        .and_then(|code| parse_sequence(prefix, code))
        .map_or(1, |seq| seq.saturating_add(1));
    format_code(prefix, next)
}

/// Generates a partner code from the current epoch second plus three
/// random digits to keep concurrent creates apart.
pub fn partner_code() -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..1000);
    format!(
        "{}{}{suffix:03}",
        prefixes::PARCEIRO,
        Utc::now().timestamp()
    )
}
