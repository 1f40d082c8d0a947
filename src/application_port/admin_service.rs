use crate::application_port::AuthError;
use crate::domain_model::UserId;
use crate::domain_port::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("user not found")]
    NotFound,
    #[error("role '{0}' does not exist")]
    UnknownRole(String),
    #[error("user '{0}' already exists")]
    UserExists(String),
    #[error("user name must not be blank")]
    InvalidName,
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("internal error: {0}")]
    InternalError(String),
}

impl From<StoreError> for AdminError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UnknownRole(role) => AdminError::UnknownRole(role),
            StoreError::DuplicateKey(name) => AdminError::UserExists(name),
            StoreError::Unavailable(e) => AdminError::StorageUnavailable(e),
            other => AdminError::InternalError(other.to_string()),
        }
    }
}

impl From<AuthError> for AdminError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::StorageUnavailable(e) => AdminError::StorageUnavailable(e),
            other => AdminError::InternalError(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegisterUserInput {
    pub name: String,
    pub role: String,
    /// Falls back to the configured default credential when `None`.
    pub credential: Option<String>,
}

/// Mutations on user accounts. Each one commits together with its audit
/// entry or not at all.
#[async_trait::async_trait]
pub trait AdminService: Send + Sync {
    /// `actor` is the admin doing the registration, not the new user.
    async fn register_user(
        &self,
        actor: &str,
        request: RegisterUserInput,
    ) -> Result<UserId, AdminError>;

    /// Not deduplicated: setting the same state twice records two entries.
    async fn set_block_state(
        &self,
        actor: &str,
        user_id: UserId,
        blocked: bool,
    ) -> Result<(), AdminError>;
}
