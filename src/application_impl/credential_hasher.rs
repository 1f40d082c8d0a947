use crate::application_port::{AuthError, CredentialHasher};
use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

/// Argon2id with a random per-credential salt. Hashes are stored as PHC
/// strings, so verification reads the cost parameters back from the hash and
/// keeps working after the configured costs change.
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, AuthError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| AuthError::InternalError(format!("argon2 params: {e}")))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

#[async_trait::async_trait]
impl CredentialHasher for Argon2PasswordHasher {
    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::InternalError(e.to_string()))?
            .to_string();
        Ok(hash)
    }

    async fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(password_hash)
            .map_err(|e| AuthError::InternalError(format!("invalid PHC hash: {e}")))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(_) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::InternalError(format!("verify error: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn verifies_only_the_hashed_secret() {
        let hasher = Argon2PasswordHasher::new(256, 1, 1).unwrap();
        let hash = hasher.hash_password("s3cret").await.unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_password("s3cret", &hash).await.unwrap());
        assert!(!hasher.verify_password("S3cret", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn salts_every_hash() {
        let hasher = Argon2PasswordHasher::new(256, 1, 1).unwrap();
        let a = hasher.hash_password("1234").await.unwrap();
        let b = hasher.hash_password("1234").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn cleartext_reference_is_rejected_as_corrupt() {
        let hasher = Argon2PasswordHasher::new(256, 1, 1).unwrap();
        let err = hasher.verify_password("1234", "1234").await.unwrap_err();
        assert!(matches!(err, AuthError::InternalError(_)));
    }
}
