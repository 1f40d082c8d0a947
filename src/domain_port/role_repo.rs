use crate::domain_model::*;
use crate::domain_port::StoreError;

#[async_trait::async_trait]
pub trait RoleRepo: Send + Sync {
    /// `None` when the role does not exist.
    async fn find_permissions(&self, role: &str) -> Result<Option<PermissionSet>, StoreError>;

    /// All roles, ordered by id ascending.
    async fn list(&self) -> Result<Vec<Role>, StoreError>;
}
