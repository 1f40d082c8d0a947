use crate::application_port::{AuditService, RecordError};
use crate::domain_model::*;
use crate::domain_port::{AuditRepo, TxManager};
use std::sync::Arc;

pub struct RealAuditService {
    audit_repo: Arc<dyn AuditRepo>,
    tx_manager: Arc<dyn TxManager>,
    default_limit: RowLimit,
}

impl RealAuditService {
    pub fn new(
        audit_repo: Arc<dyn AuditRepo>,
        tx_manager: Arc<dyn TxManager>,
        default_limit: RowLimit,
    ) -> Self {
        Self {
            audit_repo,
            tx_manager,
            default_limit,
        }
    }
}

#[async_trait::async_trait]
impl AuditService for RealAuditService {
    async fn record(
        &self,
        actor: &str,
        action: ActionKind,
        affected_table: &str,
    ) -> Result<AuditId, RecordError> {
        let mut tx = self
            .tx_manager
            .begin()
            .await
            .map_err(|e| RecordError::StorageUnavailable(e.to_string()))?;

        let audit_id = self
            .audit_repo
            .append_in_tx(
                tx.as_mut(),
                &NewAuditEntry::today(actor, action, affected_table),
            )
            .await?;

        tx.commit()
            .await
            .map_err(|e| RecordError::StorageUnavailable(e.to_string()))?;

        Ok(audit_id)
    }

    async fn list(&self, limit: Option<RowLimit>) -> Result<Vec<AuditEntry>, RecordError> {
        let limit = limit.unwrap_or(self.default_limit);
        Ok(self.audit_repo.list_recent(limit).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use chrono::Local;

    #[tokio::test]
    async fn list_is_capped_and_newest_first() {
        let fx = Fixture::new().await;
        for i in 0..5 {
            fx.audit
                .record(&format!("actor{i}"), ActionKind::Insert, "users")
                .await
                .unwrap();
        }

        let entries = fx.audit.list(Some(RowLimit(2))).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].audit_id, AuditId(5));
        assert_eq!(entries[1].audit_id, AuditId(4));
        assert_eq!(entries[0].actor, "actor4");
    }

    #[tokio::test]
    async fn default_cap_is_fifty() {
        let fx = Fixture::new().await;
        for _ in 0..55 {
            fx.audit
                .record("root", ActionKind::Delete, "alerts")
                .await
                .unwrap();
        }

        assert_eq!(fx.audit.list(None).await.unwrap().len(), 50);
    }

    #[tokio::test]
    async fn entries_are_dated_today() {
        let fx = Fixture::new().await;
        let id = fx
            .audit
            .record("root", ActionKind::Login, "users")
            .await
            .unwrap();
        assert_eq!(id, AuditId::FIRST);

        let entry = &fx.audit.list(None).await.unwrap()[0];
        assert_eq!(entry.logged_on, Local::now().date_naive());
        assert_eq!(entry.action, ActionKind::Login);
    }
}
