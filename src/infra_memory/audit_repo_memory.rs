use super::store::{MemoryStore, working};
use crate::domain_model::*;
use crate::domain_port::*;

pub struct MemoryAuditRepo {
    store: MemoryStore,
}

impl MemoryAuditRepo {
    pub fn new(store: MemoryStore) -> Self {
        MemoryAuditRepo { store }
    }
}

#[async_trait::async_trait]
impl AuditRepo for MemoryAuditRepo {
    async fn append_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        entry: &NewAuditEntry,
    ) -> Result<AuditId, StoreError> {
        let tables = working(tx)?;
        let audit_id = tables
            .audit
            .keys()
            .next_back()
            .map_or(AuditId::FIRST, |id| id.next());
        tables.audit.insert(
            audit_id,
            AuditEntry {
                audit_id,
                actor: entry.actor.clone(),
                action: entry.action,
                affected_table: entry.affected_table.clone(),
                logged_on: entry.logged_on,
            },
        );
        Ok(audit_id)
    }

    async fn list_recent(&self, limit: RowLimit) -> Result<Vec<AuditEntry>, StoreError> {
        let tables = self.store.read().await;
        Ok(tables
            .audit
            .values()
            .rev()
            .take(limit.as_usize())
            .cloned()
            .collect())
    }
}
