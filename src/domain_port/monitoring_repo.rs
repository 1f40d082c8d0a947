use crate::domain_model::*;
use crate::domain_port::{StorageTx, StoreError};

/// Systems, access log, security events and alerts. Inserts fail with
/// [`StoreError::UnknownReference`] when the user or system does not exist.
#[async_trait::async_trait]
pub trait MonitoringRepo: Send + Sync {
    async fn list_systems(&self) -> Result<Vec<MonitoredSystem>, StoreError>;

    async fn insert_access_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        access: &NewAccess,
    ) -> Result<AccessId, StoreError>;

    async fn list_accesses(&self, limit: RowLimit) -> Result<Vec<AccessSummary>, StoreError>;

    async fn list_accesses_for_user(
        &self,
        user_id: UserId,
        limit: RowLimit,
    ) -> Result<Vec<UserAccess>, StoreError>;

    async fn insert_event_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        event: &NewSecurityEvent,
    ) -> Result<EventId, StoreError>;

    async fn list_events(&self, limit: RowLimit)
    -> Result<Vec<SecurityEventSummary>, StoreError>;

    async fn insert_alert_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        alert: &NewAlert,
    ) -> Result<AlertId, StoreError>;

    async fn list_alerts(&self, limit: RowLimit) -> Result<Vec<AlertSummary>, StoreError>;

    async fn list_alerts_for_user(
        &self,
        user_id: UserId,
        limit: RowLimit,
    ) -> Result<Vec<AlertSummary>, StoreError>;
}
