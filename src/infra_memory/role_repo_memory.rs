use super::store::MemoryStore;
use crate::domain_model::*;
use crate::domain_port::*;

pub struct MemoryRoleRepo {
    store: MemoryStore,
}

impl MemoryRoleRepo {
    pub fn new(store: MemoryStore) -> Self {
        MemoryRoleRepo { store }
    }
}

#[async_trait::async_trait]
impl RoleRepo for MemoryRoleRepo {
    async fn find_permissions(&self, role: &str) -> Result<Option<PermissionSet>, StoreError> {
        let tables = self.store.read().await;
        Ok(tables
            .roles
            .values()
            .find(|r| r.name == role)
            .map(|r| r.permissions.clone()))
    }

    async fn list(&self) -> Result<Vec<Role>, StoreError> {
        let tables = self.store.read().await;
        Ok(tables.roles.values().cloned().collect())
    }
}
