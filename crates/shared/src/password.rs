//! Password hashing with Argon2id.
//!
//! New hashes use Argon2id with OWASP-recommended parameters and are stored
//! in PHC string format. Accounts imported from the predecessor system carry
//! unsalted SHA-256 hex digests; those still verify (constant-time) and are
//! expected to be re-hashed on the next successful login.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use thiserror::Error;

use crate::crypto::{constant_time_eq, is_legacy_sha256, sha256_hex};

/// Error type for password operations.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    HashError(String),

    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// OWASP recommendation (2024): 19 MiB, 2 iterations, no parallelism.
const MEMORY_COST: u32 = 19456;
const TIME_COST: u32 = 2;
const PARALLELISM: u32 = 1;
const OUTPUT_LEN: usize = 32;

fn create_argon2() -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(MEMORY_COST, TIME_COST, PARALLELISM, Some(OUTPUT_LEN))
        .map_err(|e| PasswordError::HashError(format!("Failed to create Argon2 params: {e}")))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes a password with Argon2id, returning the PHC-formatted string.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    create_argon2()?
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashError(e.to_string()))
}

/// Verifies a password against a stored hash, accepting either format.
///
/// PHC strings go through Argon2; 64-hex digests go through the legacy
/// SHA-256 path with a constant-time comparison. Anything else is an invalid
/// hash format.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, PasswordError> {
    if stored.starts_with('$') {
        let parsed = PasswordHash::new(stored).map_err(|_| PasswordError::InvalidHashFormat)?;
        // Parameters come from the hash itself, so the default instance works
        // for hashes produced under older parameter sets too.
        return match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordError::VerifyError(e.to_string())),
        };
    }

    if is_legacy_sha256(stored) {
        let computed = sha256_hex(password);
        let stored_lower = stored.to_ascii_lowercase();
        return Ok(constant_time_eq(
            computed.as_bytes(),
            stored_lower.as_bytes(),
        ));
    }

    Err(PasswordError::InvalidHashFormat)
}

/// Whether a stored hash should be replaced after a successful verification.
pub fn needs_rehash(stored: &str) -> bool {
    !stored.starts_with("$argon2id$")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_returns_phc_format() {
        let hash = hash_password("senha_teste").unwrap();
        assert!(hash.starts_with("$argon2id$v=19$m=19456,t=2,p=1$"));
    }

    #[test]
    fn test_hash_password_produces_unique_hashes() {
        let hash1 = hash_password("mesma_senha").unwrap();
        let hash2 = hash_password("mesma_senha").unwrap();
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_password_correct() {
        let hash = hash_password("senha_segura123!").unwrap();
        assert!(verify_password("senha_segura123!", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_incorrect() {
        let hash = hash_password("senha_certa").unwrap();
        assert!(!verify_password("senha_errada", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_empty() {
        let hash = hash_password("").unwrap();
        assert!(verify_password("", &hash).unwrap());
        assert!(!verify_password("nao_vazia", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        let result = verify_password("senha", "formato_invalido");
        assert!(matches!(result, Err(PasswordError::InvalidHashFormat)));
    }

    #[test]
    fn test_verify_password_unicode() {
        let hash = hash_password("coração123!").unwrap();
        assert!(verify_password("coração123!", &hash).unwrap());
        assert!(!verify_password("coracao123!", &hash).unwrap());
    }

    #[test]
    fn test_verify_legacy_sha256_hash() {
        let legacy = sha256_hex("senha_antiga");
        assert!(verify_password("senha_antiga", &legacy).unwrap());
        assert!(!verify_password("outra_senha", &legacy).unwrap());
    }

    #[test]
    fn test_verify_legacy_sha256_uppercase_digest() {
        let legacy = sha256_hex("senha_antiga").to_ascii_uppercase();
        assert!(verify_password("senha_antiga", &legacy).unwrap());
    }

    #[test]
    fn test_needs_rehash() {
        let current = hash_password("x").unwrap();
        assert!(!needs_rehash(&current));
        assert!(needs_rehash(&sha256_hex("x")));
    }

    #[test]
    fn test_password_error_display() {
        let err = PasswordError::HashError("detalhe".to_string());
        assert!(format!("{err}").contains("detalhe"));
        assert!(format!("{}", PasswordError::InvalidHashFormat).contains("Invalid password hash"));
    }
}
