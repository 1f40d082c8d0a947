use super::util::{downcast, dup_key_name, next_id_in_tx};
use crate::domain_model::*;
use crate::domain_port::*;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

/// Unique key on `users.name` in `sql/schema.sql`.
const USERS_NAME_KEY: &str = "uq_users_name";

/// Login matches names byte for byte. The column collation may still fold
/// case or pad trailing spaces, so rows it lets through are filtered here.
fn exact_match(candidates: Vec<UserCredentials>, name: &str) -> Option<UserCredentials> {
    candidates.into_iter().find(|c| c.user.name == name)
}

pub struct MySqlUserRepo {
    pool: MySqlPool,
}

impl MySqlUserRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlUserRepo { pool }
    }

    fn row_to_credentials(row: &MySqlRow) -> Result<UserCredentials, StoreError> {
        let credential_hash: String = row
            .try_get("credential")
            .map_err(|e| StoreError::Corrupt(format!("users.credential: {e}")))?;
        Ok(UserCredentials {
            user: Self::row_to_user(row)?,
            credential_hash,
        })
    }

    fn row_to_user(row: &MySqlRow) -> Result<User, StoreError> {
        let corrupt = |e: sqlx::Error| StoreError::Corrupt(format!("users: {e}"));
        Ok(User {
            user_id: row.try_get("user_id").map_err(corrupt)?,
            name: row.try_get("name").map_err(corrupt)?,
            role: row.try_get("role").map_err(corrupt)?,
            blocked: row.try_get("blocked").map_err(corrupt)?,
        })
    }
}

#[async_trait::async_trait]
impl UserRepo for MySqlUserRepo {
    async fn find_by_name(&self, name: &str) -> Result<Option<UserCredentials>, StoreError> {
        let rows = sqlx::query(
            r#"
SELECT user_id, name, role, blocked, credential
FROM users
WHERE name = ?
"#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        let candidates = rows
            .iter()
            .map(Self::row_to_credentials)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(exact_match(candidates, name))
    }

    async fn create_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        user: &NewUser,
    ) -> Result<UserId, StoreError> {
        let tx = downcast(tx)?;

        let role_names: Vec<String> =
            sqlx::query_scalar("SELECT role_name FROM roles WHERE role_name = ?")
                .bind(&user.role)
                .fetch_all(tx.conn())
                .await?;
        let role_exists = role_names.iter().any(|r| *r == user.role);
        if !role_exists {
            return Err(StoreError::UnknownRole(user.role.clone()));
        }

        let user_id = UserId(next_id_in_tx(tx.conn(), "users", "user_id").await?);

        sqlx::query(
            r#"
INSERT INTO users (user_id, name, role, blocked, credential)
VALUES (?, ?, ?, ?, ?)
"#,
        )
        .bind(user_id)
        .bind(&user.name)
        .bind(&user.role)
        .bind(user.blocked)
        .bind(&user.credential_hash)
        .execute(tx.conn())
        .await
        .map_err(|e| match dup_key_name(&e).as_deref() {
            Some(USERS_NAME_KEY) | Some("name") => StoreError::DuplicateKey(user.name.clone()),
            Some(key) => StoreError::Unavailable(format!("users.{key} clash on insert: {e}")),
            None => StoreError::from(e),
        })?;

        Ok(user_id)
    }

    async fn set_blocked_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        user_id: UserId,
        blocked: bool,
    ) -> Result<bool, StoreError> {
        let tx = downcast(tx)?;

        // Existence is checked with a locking read: MySQL reports zero
        // affected rows for an UPDATE that leaves the value unchanged.
        let exists = sqlx::query("SELECT user_id FROM users WHERE user_id = ? FOR UPDATE")
            .bind(user_id)
            .fetch_optional(tx.conn())
            .await?
            .is_some();
        if !exists {
            return Ok(false);
        }

        sqlx::query("UPDATE users SET blocked = ? WHERE user_id = ?")
            .bind(blocked)
            .bind(user_id)
            .execute(tx.conn())
            .await?;

        Ok(true)
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query("SELECT user_id, name, role, blocked FROM users ORDER BY user_id")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::row_to_user).collect()
    }
}
