//! Password hashing

use crate::error::{Error, Result};

/// Hash a password for storage
pub fn hash_password(password: &str, cost: u32) -> Result<String> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Check a password against a stored hash.
///
/// A malformed stored hash counts as a mismatch rather than an error.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

/// Run [`verify_password`] off the async executor, bcrypt is CPU bound
pub async fn verify_password_blocking(password: String, hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| Error::Other(format!("Password verification task failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_not_plaintext() {
        let hash = hash_password("admin123", 4).unwrap();
        assert_ne!(hash, "admin123");
        assert!(hash.starts_with("$2"));
    }

    #[test]
    fn test_verify() {
        let hash = hash_password("admin123", 4).unwrap();
        assert!(verify_password("admin123", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn test_verify_malformed_hash() {
        assert!(!verify_password("admin123", "not-a-bcrypt-hash"));
    }

    #[tokio::test]
    async fn test_verify_blocking() {
        let hash = hash_password("secret", 4).unwrap();
        assert!(verify_password_blocking("secret".to_string(), hash).await.unwrap());
    }
}
