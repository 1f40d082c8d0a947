use crate::domain_model::Session;
use crate::domain_port::StoreError;

/// Login outcomes other than success. The first three are expected results
/// the console renders as-is; the last two abort the attempt.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("user not found")]
    NotFound,
    #[error("user is blocked")]
    Blocked,
    #[error("incorrect password")]
    BadCredential,
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("internal error: {0}")]
    InternalError(String),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(e) => AuthError::StorageUnavailable(e),
            other => AuthError::InternalError(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoginInput {
    pub name: String,
    pub password: String,
}

#[async_trait::async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash_password(&self, password: &str) -> Result<String, AuthError>;
    async fn verify_password(&self, password: &str, password_hash: &str)
    -> Result<bool, AuthError>;
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Checks run in a fixed order: unknown name, then blocked, then
    /// credential. Only a successful login is audited.
    async fn login(&self, request: LoginInput) -> Result<Session, AuthError>;
}
