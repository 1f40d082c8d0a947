use super::util::{downcast, next_id_in_tx};
use crate::domain_model::*;
use crate::domain_port::*;
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::mysql::MySqlRow;
use sqlx::{Database, Decode, Encode, MySqlPool, Row, Type};

impl<'r, DB: Database> Decode<'r, DB> for ActionKind
where
    &'r str: Decode<'r, DB>,
{
    fn decode(value: <DB as Database>::ValueRef<'r>) -> Result<Self, BoxDynError> {
        let s = <&str as Decode<DB>>::decode(value)?;
        Ok(s.parse()?)
    }
}

impl<'q, DB: Database> Encode<'q, DB> for ActionKind
where
    String: Encode<'q, DB>,
{
    fn encode_by_ref(
        &self,
        buf: &mut <DB as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, BoxDynError> {
        self.to_string().encode_by_ref(buf)
    }
}

impl<DB: Database> Type<DB> for ActionKind
where
    String: Type<DB>,
{
    fn type_info() -> <DB as Database>::TypeInfo {
        <String as Type<DB>>::type_info()
    }

    fn compatible(ty: &<DB as Database>::TypeInfo) -> bool {
        <String as Type<DB>>::compatible(ty)
    }
}

pub struct MySqlAuditRepo {
    pool: MySqlPool,
}

impl MySqlAuditRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlAuditRepo { pool }
    }

    fn row_to_entry(row: &MySqlRow) -> Result<AuditEntry, StoreError> {
        let corrupt = |e: sqlx::Error| StoreError::Corrupt(format!("audit_log: {e}"));
        Ok(AuditEntry {
            audit_id: row.try_get("audit_id").map_err(corrupt)?,
            actor: row.try_get("actor").map_err(corrupt)?,
            action: row.try_get("action").map_err(corrupt)?,
            affected_table: row.try_get("affected_table").map_err(corrupt)?,
            logged_on: row.try_get("logged_on").map_err(corrupt)?,
        })
    }
}

#[async_trait::async_trait]
impl AuditRepo for MySqlAuditRepo {
    async fn append_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        entry: &NewAuditEntry,
    ) -> Result<AuditId, StoreError> {
        let tx = downcast(tx)?;

        let audit_id = AuditId(next_id_in_tx(tx.conn(), "audit_log", "audit_id").await?);

        sqlx::query(
            r#"
INSERT INTO audit_log (audit_id, actor, action, affected_table, logged_on)
VALUES (?, ?, ?, ?, ?)
"#,
        )
        .bind(audit_id)
        .bind(&entry.actor)
        .bind(entry.action)
        .bind(&entry.affected_table)
        .bind(entry.logged_on)
        .execute(tx.conn())
        .await?;

        Ok(audit_id)
    }

    async fn list_recent(&self, limit: RowLimit) -> Result<Vec<AuditEntry>, StoreError> {
        let rows = sqlx::query(
            r#"
SELECT audit_id, actor, action, affected_table, logged_on
FROM audit_log
ORDER BY audit_id DESC
LIMIT ?
"#,
        )
        .bind(limit.0)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_entry).collect()
    }
}
