use crate::domain_model::*;
use crate::domain_port::{StorageTx, StoreError};

/// Append-only ledger: no update, no delete.
#[async_trait::async_trait]
pub trait AuditRepo: Send + Sync {
    async fn append_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        entry: &NewAuditEntry,
    ) -> Result<AuditId, StoreError>;

    /// Newest first, at most `limit` rows.
    async fn list_recent(&self, limit: RowLimit) -> Result<Vec<AuditEntry>, StoreError>;
}
