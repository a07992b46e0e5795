//! Password Hashing Service

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::{PlatformError, Result};

/// Argon2id hashing with the library defaults.
#[derive(Default)]
pub struct PasswordService {
    argon2: Argon2<'static>,
}

impl PasswordService {
    pub fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PlatformError::internal(format!("password hashing failed: {e}")))?;
        Ok(hash.to_string())
    }

    pub fn verify(&self, password: &str, hash: &str) -> bool {
        PasswordHash::new(hash)
            .map(|parsed| {
                self.argon2
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let service = PasswordService::default();
        let hash = service.hash("hunter2").unwrap();
        assert!(service.verify("hunter2", &hash));
        assert!(!service.verify("hunter3", &hash));
    }

    #[test]
    fn malformed_hash_never_verifies() {
        let service = PasswordService::default();
        assert!(!service.verify("hunter2", "not-a-phc-string"));
    }
}
