//! Password hashing for stored user credentials.
//!
//! Passwords are hashed with Argon2id using a random per-password salt. The
//! result is a PHC string (`$argon2id$v=19$...`) that carries its own salt and
//! parameters, so verification needs nothing but the stored value.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

#[derive(Debug, thiserror::Error)]
#[error("password hashing failed: {0}")]
pub struct PasswordError(argon2::password_hash::Error);

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(PasswordError)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored hash.
///
/// Returns false for a mismatch and for a hash that cannot be parsed.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_not_plaintext() {
        let hash = hash_password("123qwe").unwrap();
        assert_ne!(hash, "123qwe");
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_hash_verifies() {
        let hash = hash_password("123qwe").unwrap();
        assert!(verify_password("123qwe", &hash));
        assert!(!verify_password("123qwf", &hash));
    }

    #[test]
    fn test_salt_differs_per_hash() {
        let a = hash_password("pw").unwrap();
        let b = hash_password("pw").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("pw", &a));
        assert!(verify_password("pw", &b));
    }

    #[test]
    fn test_garbage_hash_does_not_verify() {
        assert!(!verify_password("pw", "not-a-phc-string"));
        assert!(!verify_password("pw", ""));
    }
}
