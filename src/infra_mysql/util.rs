use super::repo_tx_mysql::MySqlTx;
use crate::domain_port::*;
use sqlx::MySqlConnection;
use sqlx::mysql::MySqlDatabaseError;

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

pub fn downcast(tx: &mut dyn StorageTx) -> Result<&mut MySqlTx, StoreError> {
    tx.as_any_mut()
        .downcast_mut::<MySqlTx>()
        .ok_or_else(|| StoreError::Unavailable("transaction was not opened by MySQL".into()))
}

fn mysql_error_number(err: &sqlx::Error) -> Option<u16> {
    if let sqlx::Error::Database(db) = err {
        if let Some(mysql_err) = db.try_downcast_ref::<MySqlDatabaseError>() {
            return Some(mysql_err.number());
        }
    }

    None
}

pub fn is_dup_key(err: &sqlx::Error) -> bool {
    mysql_error_number(err) == Some(1062) // ER_DUP_ENTRY
}

/// Name of the unique key an ER_DUP_ENTRY error reports, without the table
/// prefix newer servers add. `None` for any other error.
pub fn dup_key_name(err: &sqlx::Error) -> Option<String> {
    if !is_dup_key(err) {
        return None;
    }
    let sqlx::Error::Database(db) = err else {
        return None;
    };
    key_in_message(db.message()).map(str::to_string)
}

/// `Duplicate entry 'ana' for key 'users.uq_users_name'` -> `uq_users_name`.
fn key_in_message(message: &str) -> Option<&str> {
    let (_, tail) = message.rsplit_once("for key '")?;
    let key = tail.strip_suffix('\'')?;
    Some(key.rsplit_once('.').map_or(key, |(_, k)| k))
}

pub fn is_fk_violation(err: &sqlx::Error) -> bool {
    mysql_error_number(err) == Some(1452) // ER_NO_REFERENCED_ROW_2
}

/// Surrogate key allocation: `COALESCE(MAX(pk), 0) + 1`, read with a locking
/// read so a second writer on the same table waits for this transaction.
/// `table` and `pk` are compile-time identifiers, never user input.
pub async fn next_id_in_tx(
    conn: &mut MySqlConnection,
    table: &'static str,
    pk: &'static str,
) -> Result<i64, StoreError> {
    let sql = format!("SELECT COALESCE(MAX({pk}), 0) + 1 AS next_id FROM {table} FOR UPDATE");
    let next_id: i64 = sqlx::query_scalar(&sql).fetch_one(conn).await?;
    Ok(next_id)
}
