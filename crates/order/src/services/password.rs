//! Password credential codec.
//!
//! A stateless pair of functions around Argon2id. The digest embeds a
//! random salt, so two hashes of the same plaintext differ while both
//! verify.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// The plaintext could not be hashed.
#[derive(Debug, Error)]
#[error("password hashing failed")]
pub struct PasswordHashError;

/// Hash a password using Argon2id with a freshly generated salt.
///
/// # Errors
///
/// Returns `PasswordHashError` if the hasher rejects its parameters.
pub fn hash(plaintext: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|digest| digest.to_string())
        .map_err(|_| PasswordHashError)
}

/// Verify a password against a digest.
///
/// Never fails: an unparsable digest, like a wrong password, verifies
/// false.
#[must_use]
pub fn verify(plaintext: &str, digest: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(digest) else {
        return false;
    };

    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let digest = hash("correct horse battery staple").unwrap();
        assert!(verify("correct horse battery staple", &digest));
    }

    #[test]
    fn test_wrong_password_fails() {
        let digest = hash("correct horse battery staple").unwrap();
        assert!(!verify("incorrect horse", &digest));
    }

    #[test]
    fn test_hashes_of_same_password_differ() {
        // The embedded random salt makes every digest unique.
        let first = hash("swordfish").unwrap();
        let second = hash("swordfish").unwrap();
        assert_ne!(first, second);
        assert!(verify("swordfish", &first));
        assert!(verify("swordfish", &second));
    }

    #[test]
    fn test_unparsable_digest_verifies_false() {
        assert!(!verify("anything", "not-a-digest"));
        assert!(!verify("anything", ""));
    }
}
