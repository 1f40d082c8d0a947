use crate::domain_model::{PermissionSet, Role};
use crate::domain_port::StoreError;

/// Role lookups only fail when storage does; an unknown role is not an error.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("internal error: {0}")]
    InternalError(String),
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(e) => CatalogError::StorageUnavailable(e),
            other => CatalogError::InternalError(other.to_string()),
        }
    }
}

#[async_trait::async_trait]
pub trait RoleCatalog: Send + Sync {
    /// Empty for an unknown role or a role without permissions.
    async fn permissions_of(&self, role: &str) -> Result<PermissionSet, CatalogError>;

    async fn has_permission(&self, role: &str, token: &str) -> Result<bool, CatalogError> {
        Ok(self.permissions_of(role).await?.contains(token))
    }

    async fn list_roles(&self) -> Result<Vec<Role>, CatalogError>;
}
