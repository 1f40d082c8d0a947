use crate::domain_model::*;
use crate::domain_port::{StorageTx, StoreError};

/// A user row together with its stored credential hash. Only the
/// authentication path reads this shape.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub credential_hash: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub role: String,
    pub blocked: bool,
    pub credential_hash: String,
}

/// The identity store. Every call goes to storage; nothing is cached.
#[async_trait::async_trait]
pub trait UserRepo: Send + Sync {
    /// Exact, case-sensitive lookup on the display name.
    async fn find_by_name(&self, name: &str) -> Result<Option<UserCredentials>, StoreError>;

    /// Validates the role against the role catalog, assigns the next id and
    /// inserts the row. Writes no audit entry.
    async fn create_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        user: &NewUser,
    ) -> Result<UserId, StoreError>;

    /// Returns `false` when no user has `user_id`.
    async fn set_blocked_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        user_id: UserId,
        blocked: bool,
    ) -> Result<bool, StoreError>;

    /// All users, ordered by id ascending.
    async fn list(&self) -> Result<Vec<User>, StoreError>;
}
