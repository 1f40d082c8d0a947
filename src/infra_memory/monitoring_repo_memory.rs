use super::store::{AccessRow, AlertRow, EventRow, MemoryStore, Tables, working};
use crate::domain_model::*;
use crate::domain_port::*;
use chrono::Local;

pub struct MemoryMonitoringRepo {
    store: MemoryStore,
}

impl MemoryMonitoringRepo {
    pub fn new(store: MemoryStore) -> Self {
        MemoryMonitoringRepo { store }
    }
}

fn require_user(tables: &Tables, user_id: UserId) -> Result<(), StoreError> {
    if tables.users.contains_key(&user_id) {
        Ok(())
    } else {
        Err(StoreError::UnknownReference(format!("user {user_id}")))
    }
}

fn alert_summary(tables: &Tables, row: &AlertRow) -> AlertSummary {
    AlertSummary {
        alert_id: row.alert_id,
        user_name: tables.user_name(row.user_id).unwrap_or_default().to_string(),
        message: row.message.clone(),
        raised_on: row.raised_on,
    }
}

#[async_trait::async_trait]
impl MonitoringRepo for MemoryMonitoringRepo {
    async fn list_systems(&self) -> Result<Vec<MonitoredSystem>, StoreError> {
        let tables = self.store.read().await;
        Ok(tables.systems.values().cloned().collect())
    }

    async fn insert_access_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        access: &NewAccess,
    ) -> Result<AccessId, StoreError> {
        let tables = working(tx)?;
        require_user(tables, access.user_id)?;
        if !tables.systems.contains_key(&access.system_id) {
            return Err(StoreError::UnknownReference(format!(
                "system {}",
                access.system_id
            )));
        }

        let access_id = tables
            .accesses
            .keys()
            .next_back()
            .map_or(AccessId::FIRST, |id| id.next());
        tables.accesses.insert(
            access_id,
            AccessRow {
                access_id,
                user_id: access.user_id,
                accessed_on: Local::now().date_naive(),
                successful: access.successful,
                ip: access.ip.clone(),
                system_id: access.system_id,
            },
        );
        Ok(access_id)
    }

    async fn list_accesses(&self, limit: RowLimit) -> Result<Vec<AccessSummary>, StoreError> {
        let tables = self.store.read().await;
        // Inner-join semantics: rows whose user or system is gone are skipped.
        Ok(tables
            .accesses
            .values()
            .rev()
            .filter_map(|row| {
                Some(AccessSummary {
                    access_id: row.access_id,
                    user_name: tables.user_name(row.user_id)?.to_string(),
                    accessed_on: row.accessed_on,
                    successful: row.successful,
                    ip: row.ip.clone(),
                    system_name: tables.systems.get(&row.system_id)?.name.clone(),
                })
            })
            .take(limit.as_usize())
            .collect())
    }

    async fn list_accesses_for_user(
        &self,
        user_id: UserId,
        limit: RowLimit,
    ) -> Result<Vec<UserAccess>, StoreError> {
        let tables = self.store.read().await;
        Ok(tables
            .accesses
            .values()
            .rev()
            .filter(|row| row.user_id == user_id)
            .take(limit.as_usize())
            .map(|row| UserAccess {
                access_id: row.access_id,
                accessed_on: row.accessed_on,
                successful: row.successful,
                ip: row.ip.clone(),
                system_id: row.system_id,
            })
            .collect())
    }

    async fn insert_event_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        event: &NewSecurityEvent,
    ) -> Result<EventId, StoreError> {
        let tables = working(tx)?;
        require_user(tables, event.user_id)?;

        let event_id = tables
            .events
            .keys()
            .next_back()
            .map_or(EventId::FIRST, |id| id.next());
        tables.events.insert(
            event_id,
            EventRow {
                event_id,
                user_id: event.user_id,
                event_type: event.event_type.clone(),
                description: event.description.clone(),
                occurred_on: Local::now().date_naive(),
            },
        );
        Ok(event_id)
    }

    async fn list_events(
        &self,
        limit: RowLimit,
    ) -> Result<Vec<SecurityEventSummary>, StoreError> {
        let tables = self.store.read().await;
        Ok(tables
            .events
            .values()
            .rev()
            .filter_map(|row| {
                Some(SecurityEventSummary {
                    event_id: row.event_id,
                    user_name: tables.user_name(row.user_id)?.to_string(),
                    event_type: row.event_type.clone(),
                    description: row.description.clone(),
                    occurred_on: row.occurred_on,
                })
            })
            .take(limit.as_usize())
            .collect())
    }

    async fn insert_alert_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        alert: &NewAlert,
    ) -> Result<AlertId, StoreError> {
        let tables = working(tx)?;
        require_user(tables, alert.user_id)?;

        let alert_id = tables
            .alerts
            .keys()
            .next_back()
            .map_or(AlertId::FIRST, |id| id.next());
        tables.alerts.insert(
            alert_id,
            AlertRow {
                alert_id,
                user_id: alert.user_id,
                message: alert.message.clone(),
                raised_on: Local::now().date_naive(),
            },
        );
        Ok(alert_id)
    }

    async fn list_alerts(&self, limit: RowLimit) -> Result<Vec<AlertSummary>, StoreError> {
        let tables = self.store.read().await;
        Ok(tables
            .alerts
            .values()
            .rev()
            .filter(|row| tables.users.contains_key(&row.user_id))
            .take(limit.as_usize())
            .map(|row| alert_summary(&tables, row))
            .collect())
    }

    async fn list_alerts_for_user(
        &self,
        user_id: UserId,
        limit: RowLimit,
    ) -> Result<Vec<AlertSummary>, StoreError> {
        let tables = self.store.read().await;
        Ok(tables
            .alerts
            .values()
            .rev()
            .filter(|row| row.user_id == user_id && tables.users.contains_key(&row.user_id))
            .take(limit.as_usize())
            .map(|row| alert_summary(&tables, row))
            .collect())
    }
}
