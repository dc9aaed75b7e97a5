//! Password hashing service.

use crate::errors::{AuthError, DomainError};

/// One-way salted password hashing with a configurable work factor
///
/// Thin wrapper around bcrypt so the cost factor is injected once from
/// configuration instead of being re-decided at every call site.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Creates a hasher with the given bcrypt cost
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hashes a plaintext password with a per-call random salt
    pub fn hash(&self, plaintext: &str) -> Result<String, DomainError> {
        bcrypt::hash(plaintext, self.cost)
            .map_err(|_| DomainError::Auth(AuthError::PasswordHashingFailed))
    }

    /// Verifies a plaintext password against a stored digest
    ///
    /// Returns `false` for a plain mismatch or an undecodable digest;
    /// never errors.
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        bcrypt::verify(plaintext, digest).unwrap_or(false)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum bcrypt cost keeps the tests fast.
    fn hasher() -> PasswordHasher {
        PasswordHasher::new(4)
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let digest = hasher.hash("correct horse battery staple").unwrap();

        assert!(hasher.verify("correct horse battery staple", &digest));
        assert!(!hasher.verify("wrong password", &digest));
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = hasher();
        let first = hasher.hash("same input").unwrap();
        let second = hasher.hash("same input").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_garbage_digest_returns_false() {
        assert!(!hasher().verify("anything", "not-a-bcrypt-digest"));
    }
}
