use crate::application_port::{MonitoringService, RecordError};
use crate::domain_model::*;
use crate::domain_port::{AuditRepo, MonitoringRepo, StorageTx, TxManager};
use crate::logger::*;
use std::sync::Arc;

#[derive(Debug, Clone, Copy)]
pub struct MonitoringLimits {
    pub accesses: RowLimit,
    pub user_accesses: RowLimit,
    pub events: RowLimit,
    pub alerts: RowLimit,
}

impl Default for MonitoringLimits {
    fn default() -> Self {
        MonitoringLimits {
            accesses: RowLimit::ACCESSES,
            user_accesses: RowLimit::USER_ACCESSES,
            events: RowLimit::EVENTS,
            alerts: RowLimit::ALERTS,
        }
    }
}

pub struct RealMonitoringService {
    monitoring_repo: Arc<dyn MonitoringRepo>,
    audit_repo: Arc<dyn AuditRepo>,
    tx_manager: Arc<dyn TxManager>,
    limits: MonitoringLimits,
}

impl RealMonitoringService {
    pub fn new(
        monitoring_repo: Arc<dyn MonitoringRepo>,
        audit_repo: Arc<dyn AuditRepo>,
        tx_manager: Arc<dyn TxManager>,
        limits: MonitoringLimits,
    ) -> Self {
        Self {
            monitoring_repo,
            audit_repo,
            tx_manager,
            limits,
        }
    }

    async fn begin(&self) -> Result<Box<dyn StorageTx>, RecordError> {
        self.tx_manager
            .begin()
            .await
            .map_err(|e| RecordError::StorageUnavailable(e.to_string()))
    }

    /// Appends the INSERT entry for `table` and commits.
    async fn audit_and_commit(
        &self,
        mut tx: Box<dyn StorageTx>,
        actor: &str,
        table: &str,
    ) -> Result<(), RecordError> {
        self.audit_repo
            .append_in_tx(
                tx.as_mut(),
                &NewAuditEntry::today(actor, ActionKind::Insert, table),
            )
            .await?;

        tx.commit()
            .await
            .map_err(|e| RecordError::StorageUnavailable(e.to_string()))
    }
}

#[async_trait::async_trait]
impl MonitoringService for RealMonitoringService {
    async fn list_systems(&self) -> Result<Vec<MonitoredSystem>, RecordError> {
        Ok(self.monitoring_repo.list_systems().await?)
    }

    async fn record_access(
        &self,
        actor: &str,
        access: NewAccess,
    ) -> Result<AccessId, RecordError> {
        let mut tx = self.begin().await?;
        let access_id = self
            .monitoring_repo
            .insert_access_in_tx(tx.as_mut(), &access)
            .await?;
        self.audit_and_commit(tx, actor, ACCESS_LOG_TABLE).await?;

        info!(%actor, %access_id, user_id = %access.user_id, "access recorded");
        Ok(access_id)
    }

    async fn list_accesses(
        &self,
        limit: Option<RowLimit>,
    ) -> Result<Vec<AccessSummary>, RecordError> {
        let limit = limit.unwrap_or(self.limits.accesses);
        Ok(self.monitoring_repo.list_accesses(limit).await?)
    }

    async fn accesses_for_user(
        &self,
        user_id: UserId,
        limit: Option<RowLimit>,
    ) -> Result<Vec<UserAccess>, RecordError> {
        let limit = limit.unwrap_or(self.limits.user_accesses);
        Ok(self
            .monitoring_repo
            .list_accesses_for_user(user_id, limit)
            .await?)
    }

    async fn create_event(
        &self,
        actor: &str,
        event: NewSecurityEvent,
    ) -> Result<EventId, RecordError> {
        let mut tx = self.begin().await?;
        let event_id = self
            .monitoring_repo
            .insert_event_in_tx(tx.as_mut(), &event)
            .await?;
        self.audit_and_commit(tx, actor, SECURITY_EVENTS_TABLE)
            .await?;

        info!(%actor, %event_id, event_type = %event.event_type, "security event created");
        Ok(event_id)
    }

    async fn list_events(
        &self,
        limit: Option<RowLimit>,
    ) -> Result<Vec<SecurityEventSummary>, RecordError> {
        let limit = limit.unwrap_or(self.limits.events);
        Ok(self.monitoring_repo.list_events(limit).await?)
    }

    async fn create_alert(&self, actor: &str, alert: NewAlert) -> Result<AlertId, RecordError> {
        let mut tx = self.begin().await?;
        let alert_id = self
            .monitoring_repo
            .insert_alert_in_tx(tx.as_mut(), &alert)
            .await?;
        self.audit_and_commit(tx, actor, ALERTS_TABLE).await?;

        info!(%actor, %alert_id, user_id = %alert.user_id, "alert created");
        Ok(alert_id)
    }

    async fn list_alerts(
        &self,
        limit: Option<RowLimit>,
    ) -> Result<Vec<AlertSummary>, RecordError> {
        let limit = limit.unwrap_or(self.limits.alerts);
        Ok(self.monitoring_repo.list_alerts(limit).await?)
    }

    async fn alerts_for_user(
        &self,
        user_id: UserId,
        limit: Option<RowLimit>,
    ) -> Result<Vec<AlertSummary>, RecordError> {
        let limit = limit.unwrap_or(self.limits.alerts);
        Ok(self
            .monitoring_repo
            .list_alerts_for_user(user_id, limit)
            .await?)
    }

    async fn request_unblock(&self, session: &Session) -> Result<EventId, RecordError> {
        self.create_event(
            &session.name,
            NewSecurityEvent {
                user_id: session.user_id,
                event_type: UNBLOCK_REQUEST_EVENT.to_string(),
                description: UNBLOCK_REQUEST_DESCRIPTION.to_string(),
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[tokio::test]
    async fn recording_an_access_is_audited_once() {
        let fx = Fixture::new().await;
        let user = fx.seed_user("ana", "usuario", "pw", false).await;
        let system = fx.store.add_system("vpn", "Remote access gateway").await;

        let access_id = fx
            .monitoring
            .record_access(
                "root",
                NewAccess {
                    user_id: user,
                    successful: false,
                    ip: "10.0.0.7".to_string(),
                    system_id: system,
                },
            )
            .await
            .unwrap();
        assert_eq!(access_id, AccessId::FIRST);

        let all = fx.monitoring.list_accesses(None).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].user_name, "ana");
        assert_eq!(all[0].system_name, "vpn");
        assert!(!all[0].successful);

        let mine = fx.monitoring.accesses_for_user(user, None).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].system_id, system);

        let entries = fx.audit_entries().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].affected_table, ACCESS_LOG_TABLE);
        assert_eq!(entries[0].actor, "root");
    }

    #[tokio::test]
    async fn unknown_references_are_rejected_without_audit() {
        let fx = Fixture::new().await;
        let user = fx.seed_user("ana", "usuario", "pw", false).await;

        let err = fx
            .monitoring
            .record_access(
                "root",
                NewAccess {
                    user_id: user,
                    successful: true,
                    ip: "10.0.0.7".to_string(),
                    system_id: SystemId(42),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RecordError::UnknownReference(_)));

        let err = fx
            .monitoring
            .create_alert(
                "root",
                NewAlert {
                    user_id: UserId(42),
                    message: "disk full".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RecordError::UnknownReference(_)));

        assert!(fx.audit_entries().await.is_empty());
    }

    #[tokio::test]
    async fn events_and_alerts_list_newest_first() {
        let fx = Fixture::new().await;
        let ana = fx.seed_user("ana", "usuario", "pw", false).await;
        let ben = fx.seed_user("ben", "usuario", "pw", false).await;

        for (user, message) in [(ana, "first"), (ben, "second"), (ana, "third")] {
            fx.monitoring
                .create_alert(
                    "root",
                    NewAlert {
                        user_id: user,
                        message: message.to_string(),
                    },
                )
                .await
                .unwrap();
        }
        fx.monitoring
            .create_event(
                "root",
                NewSecurityEvent {
                    user_id: ben,
                    event_type: "Brute force".to_string(),
                    description: "20 failed logins".to_string(),
                },
            )
            .await
            .unwrap();

        let alerts = fx.monitoring.list_alerts(Some(RowLimit(2))).await.unwrap();
        let messages: Vec<_> = alerts.iter().map(|a| a.message.as_str()).collect();
        assert_eq!(messages, vec!["third", "second"]);

        let mine = fx.monitoring.alerts_for_user(ana, None).await.unwrap();
        assert!(mine.iter().all(|a| a.user_name == "ana"));
        assert_eq!(mine.len(), 2);

        let events = fx.monitoring.list_events(None).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].user_name, "ben");

        let tables: Vec<_> = fx
            .audit_entries()
            .await
            .into_iter()
            .map(|e| e.affected_table)
            .collect();
        assert_eq!(
            tables,
            vec![SECURITY_EVENTS_TABLE, ALERTS_TABLE, ALERTS_TABLE, ALERTS_TABLE]
        );
    }

    #[tokio::test]
    async fn unblock_request_is_filed_by_the_requester() {
        let fx = Fixture::new().await;
        let id = fx.seed_user("cam", "usuario", "pw", true).await;
        let session = Session {
            user_id: id,
            name: "cam".to_string(),
            role: "usuario".to_string(),
        };

        fx.monitoring.request_unblock(&session).await.unwrap();

        let events = fx.monitoring.list_events(None).await.unwrap();
        assert_eq!(events[0].event_type, UNBLOCK_REQUEST_EVENT);
        assert_eq!(events[0].user_name, "cam");
        assert_eq!(fx.audit_entries().await[0].actor, "cam");
    }

    #[tokio::test]
    async fn audit_failure_discards_the_record() {
        let fx = Fixture::new().await;
        let user = fx.seed_user("ana", "usuario", "pw", false).await;
        let monitoring = RealMonitoringService::new(
            fx.monitoring_repo.clone(),
            Arc::new(FailingAuditRepo),
            fx.tx_manager.clone(),
            MonitoringLimits::default(),
        );

        assert!(
            monitoring
                .create_alert(
                    "root",
                    NewAlert {
                        user_id: user,
                        message: "lost".to_string(),
                    },
                )
                .await
                .is_err()
        );
        assert!(fx.monitoring.list_alerts(None).await.unwrap().is_empty());
    }
}
