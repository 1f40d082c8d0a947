use crate::domain_model::*;
use crate::domain_port::StoreError;

/// Failures of the record-keeping services (audit log and monitoring).
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("unknown reference: {0}")]
    UnknownReference(String),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("internal error: {0}")]
    InternalError(String),
}

impl From<StoreError> for RecordError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UnknownReference(e) => RecordError::UnknownReference(e),
            StoreError::Unavailable(e) => RecordError::StorageUnavailable(e),
            other => RecordError::InternalError(other.to_string()),
        }
    }
}

#[async_trait::async_trait]
pub trait AuditService: Send + Sync {
    async fn record(
        &self,
        actor: &str,
        action: ActionKind,
        affected_table: &str,
    ) -> Result<AuditId, RecordError>;

    /// Newest first. `None` uses the configured default cap.
    async fn list(&self, limit: Option<RowLimit>) -> Result<Vec<AuditEntry>, RecordError>;
}
