//! Password hashing and verification

use crate::error::Result;

/// Fixed bcrypt cost factor applied to every stored password
const BCRYPT_COST: u32 = 10;

/// Hash a plaintext password with a salted one-way hash
pub fn hash_password(plaintext: &str) -> Result<String> {
    Ok(bcrypt::hash(plaintext, BCRYPT_COST)?)
}

/// Verify a plaintext password against a stored hash
pub fn verify_password(plaintext: &str, hash: &str) -> bool {
    bcrypt::verify(plaintext, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("secret").expect("Failed to hash password");
        assert_ne!(hash, "secret");
        assert!(verify_password("secret", &hash));
    }

    #[test]
    fn test_wrong_password_rejected() {
        let hash = hash_password("secret").expect("Failed to hash password");
        assert!(!verify_password("not-the-secret", &hash));
    }

    #[test]
    fn test_malformed_hash_rejected() {
        assert!(!verify_password("secret", "not-a-bcrypt-hash"));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("secret").expect("Failed to hash password");
        let b = hash_password("secret").expect("Failed to hash password");
        assert_ne!(a, b);
    }
}
