//! Digest helpers for legacy credential verification.

use sha2::{Digest, Sha256};

/// Computes SHA-256 of the input and returns it as a lowercase hex string.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Whether a stored hash looks like a predecessor-system digest: exactly
/// 64 hex characters, no PHC framing.
pub fn is_legacy_sha256(hash: &str) -> bool {
    hash.len() == 64 && hash.chars().all(|c| c.is_ascii_hexdigit())
}

/// Constant-time byte equality. Length mismatch returns false immediately,
/// which leaks only the length, not the content.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex_known_vector() {
        assert_eq!(
            sha256_hex("test"),
            "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
        );
    }

    #[test]
    fn test_sha256_hex_empty_string() {
        assert_eq!(
            sha256_hex(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_sha256_hex_deterministic() {
        assert_eq!(sha256_hex("mesma_entrada"), sha256_hex("mesma_entrada"));
        assert_ne!(sha256_hex("entrada1"), sha256_hex("entrada2"));
    }

    #[test]
    fn test_sha256_hex_unicode() {
        assert_eq!(sha256_hex("coração").len(), 64);
    }

    #[test]
    fn test_is_legacy_sha256_accepts_digest() {
        assert!(is_legacy_sha256(&sha256_hex("senha123")));
        assert!(is_legacy_sha256(&"A".repeat(64)));
    }

    #[test]
    fn test_is_legacy_sha256_rejects_phc_and_junk() {
        assert!(!is_legacy_sha256("$argon2id$v=19$m=19456,t=2,p=1$abc$def"));
        assert!(!is_legacy_sha256(&"g".repeat(64)));
        assert!(!is_legacy_sha256(&"a".repeat(63)));
        assert!(!is_legacy_sha256(""));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abcdef", b"abcdef"));
        assert!(!constant_time_eq(b"abcdef", b"abcdeg"));
        assert!(!constant_time_eq(b"abc", b"abcdef"));
        assert!(constant_time_eq(b"", b""));
    }
}
