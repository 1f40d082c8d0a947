use super::store::{MemoryStore, working};
use crate::domain_model::*;
use crate::domain_port::*;

pub struct MemoryUserRepo {
    store: MemoryStore,
}

impl MemoryUserRepo {
    pub fn new(store: MemoryStore) -> Self {
        MemoryUserRepo { store }
    }
}

#[async_trait::async_trait]
impl UserRepo for MemoryUserRepo {
    async fn find_by_name(&self, name: &str) -> Result<Option<UserCredentials>, StoreError> {
        let tables = self.store.read().await;
        Ok(tables.users.values().find(|u| u.user.name == name).cloned())
    }

    async fn create_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        user: &NewUser,
    ) -> Result<UserId, StoreError> {
        working(tx)?.insert_user(user)
    }

    async fn set_blocked_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        user_id: UserId,
        blocked: bool,
    ) -> Result<bool, StoreError> {
        match working(tx)?.users.get_mut(&user_id) {
            Some(row) => {
                row.user.blocked = blocked;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let tables = self.store.read().await;
        Ok(tables.users.values().map(|u| u.user.clone()).collect())
    }
}
