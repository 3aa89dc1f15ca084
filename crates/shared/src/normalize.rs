//! Text normalization for persisted free-text fields.
//!
//! Stored text is kept in an uppercase, diacritic-free canonical form so that
//! search and comparison are case- and accent-insensitive. All functions are
//! total over string input and idempotent: `normalize(normalize(s)) ==
//! normalize(s)`.

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

lazy_static! {
    /// Characters acceptable in normalized free-text fields.
    static ref ALLOWED_TEXT: Regex = Regex::new(r"^[A-Z0-9\s.,\-/()]*$")
        .unwrap_or_else(|e| panic!("invalid allowed-text pattern: {e}"));
}

/// Strips combining marks after canonical decomposition.
///
/// `"Itaú"` becomes `"Itau"`, `"ação"` becomes `"acao"`. Characters without
/// a decomposition pass through unchanged.
pub fn remove_diacritics(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Canonical form: diacritics stripped, then uppercased.
pub fn normalize(text: &str) -> String {
    remove_diacritics(text).to_uppercase()
}

/// Canonical form restricted to `[A-Z0-9 ]`.
///
/// Everything outside that set (punctuation, symbols, non-Latin letters that
/// survive decomposition) is dropped.
pub fn normalize_strict(text: &str) -> String {
    normalize(text)
        .chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || *c == ' ')
        .collect()
}

/// `normalize` lifted over optional input; `None` passes through.
pub fn normalize_opt(text: Option<&str>) -> Option<String> {
    text.map(normalize)
}

/// Whether the normalized form of `text` stays within the allowed charset
/// (letters, digits, whitespace and `.,-/()`).
///
/// Empty input is vacuously allowed.
pub fn is_allowed_text(text: &str) -> bool {
    ALLOWED_TEXT.is_match(&normalize(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_diacritics_portuguese() {
        assert_eq!(remove_diacritics("Itaú"), "Itau");
        assert_eq!(remove_diacritics("ação"), "acao");
        assert_eq!(remove_diacritics("José Álvares"), "Jose Alvares");
        assert_eq!(remove_diacritics("condição à vista"), "condicao a vista");
    }

    #[test]
    fn test_remove_diacritics_cedilla_and_tilde() {
        assert_eq!(remove_diacritics("maçã"), "maca");
        assert_eq!(remove_diacritics("São Paulo"), "Sao Paulo");
    }

    #[test]
    fn test_remove_diacritics_no_op_on_plain_ascii() {
        assert_eq!(remove_diacritics("BANCO DO BRASIL"), "BANCO DO BRASIL");
        assert_eq!(remove_diacritics(""), "");
    }

    #[test]
    fn test_remove_diacritics_precomposed_and_decomposed_agree() {
        // U+00E9 (é) vs e + U+0301 (combining acute)
        assert_eq!(remove_diacritics("caf\u{00e9}"), "cafe");
        assert_eq!(remove_diacritics("cafe\u{0301}"), "cafe");
    }

    #[test]
    fn test_normalize_uppercases() {
        assert_eq!(normalize("Itaú Unibanco"), "ITAU UNIBANCO");
        assert_eq!(normalize("josé"), "JOSE");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "Itaú Unibanco",
            "condição especial nº 2",
            "ÁÉÍÓÚ àèìòù âêîôû ãõ ç",
            "plain text 123",
            "",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn test_normalize_output_has_no_marks_or_lowercase() {
        let out = normalize("Coração Valente à Süd ñandú");
        assert!(out.chars().all(|c| !is_combining_mark(c)));
        assert!(!out.chars().any(|c| c.is_lowercase()));
    }

    #[test]
    fn test_normalize_strict_keeps_only_upper_digits_space() {
        assert_eq!(normalize_strict("Ag. 1234-5 (Centro)"), "AG 12345 CENTRO");
        assert_eq!(normalize_strict("preço/custo"), "PRECOCUSTO");
        assert_eq!(normalize_strict("  "), "  ");
    }

    #[test]
    fn test_normalize_strict_is_idempotent() {
        let once = normalize_strict("Tabela nº 3 - Atacado!");
        assert_eq!(normalize_strict(&once), once);
    }

    #[test]
    fn test_normalize_opt() {
        assert_eq!(normalize_opt(Some("itaú")), Some("ITAU".to_string()));
        assert_eq!(normalize_opt(None), None);
    }

    #[test]
    fn test_is_allowed_text_accepts_normal_fields() {
        assert!(is_allowed_text(""));
        assert!(is_allowed_text("1234"));
        assert!(is_allowed_text("5678-9"));
        assert!(is_allowed_text("Rua das Flores, 100 - Sala 2 (Fundos)"));
        assert!(is_allowed_text("pagamento 30/60/90"));
    }

    #[test]
    fn test_is_allowed_text_accepts_accents_via_normalization() {
        // Accents disappear under normalization, so they never trip the check.
        assert!(is_allowed_text("Itaú"));
        assert!(is_allowed_text("condição à vista"));
    }

    #[test]
    fn test_is_allowed_text_rejects_stray_symbols() {
        assert!(!is_allowed_text("conta#12"));
        assert!(!is_allowed_text("valor: R$ 10"));
        assert!(!is_allowed_text("a@b"));
        assert!(!is_allowed_text("50%"));
    }

    #[test]
    fn test_is_allowed_text_allows_whitespace_kinds() {
        assert!(is_allowed_text("linha um\nlinha dois"));
        assert!(is_allowed_text("tab\tseparado"));
    }
}
