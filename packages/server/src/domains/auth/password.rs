//! Password hashing. Thin wrappers so the cost factor flows in from
//! configuration instead of being read from the environment at call sites.

use anyhow::{Context, Result};

/// Hash a plaintext password with the configured bcrypt cost.
pub fn hash_password(plain: &str, cost: u32) -> Result<String> {
    bcrypt::hash(plain, cost).context("Failed to hash password")
}

/// Check a plaintext password against a stored hash.
pub fn verify_password(plain: &str, hashed: &str) -> Result<bool> {
    bcrypt::verify(plain, hashed).context("Failed to verify password")
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum cost keeps the tests fast.
    const COST: u32 = 4;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("hunter2hunter2", COST).unwrap();
        assert!(verify_password("hunter2hunter2", &hash).unwrap());
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn test_hash_is_salted() {
        let a = hash_password("hunter2hunter2", COST).unwrap();
        let b = hash_password("hunter2hunter2", COST).unwrap();
        assert_ne!(a, b);
    }
}
