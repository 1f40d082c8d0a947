use crate::application_port::RecordError;
use crate::domain_model::*;

/// Every insert is audited in the same transaction, with `actor` as the
/// audited actor. `None` limits fall back to the configured caps.
#[async_trait::async_trait]
pub trait MonitoringService: Send + Sync {
    async fn list_systems(&self) -> Result<Vec<MonitoredSystem>, RecordError>;

    async fn record_access(&self, actor: &str, access: NewAccess)
    -> Result<AccessId, RecordError>;

    async fn list_accesses(
        &self,
        limit: Option<RowLimit>,
    ) -> Result<Vec<AccessSummary>, RecordError>;

    async fn accesses_for_user(
        &self,
        user_id: UserId,
        limit: Option<RowLimit>,
    ) -> Result<Vec<UserAccess>, RecordError>;

    async fn create_event(
        &self,
        actor: &str,
        event: NewSecurityEvent,
    ) -> Result<EventId, RecordError>;

    async fn list_events(
        &self,
        limit: Option<RowLimit>,
    ) -> Result<Vec<SecurityEventSummary>, RecordError>;

    async fn create_alert(&self, actor: &str, alert: NewAlert) -> Result<AlertId, RecordError>;

    async fn list_alerts(&self, limit: Option<RowLimit>)
    -> Result<Vec<AlertSummary>, RecordError>;

    async fn alerts_for_user(
        &self,
        user_id: UserId,
        limit: Option<RowLimit>,
    ) -> Result<Vec<AlertSummary>, RecordError>;

    /// Files an unblock request as a security event on the caller's own account.
    async fn request_unblock(&self, session: &Session) -> Result<EventId, RecordError>;
}
