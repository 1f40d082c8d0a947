use super::util::{downcast, is_fk_violation, next_id_in_tx};
use crate::domain_model::*;
use crate::domain_port::*;
use chrono::Local;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

fn corrupt(table: &'static str) -> impl Fn(sqlx::Error) -> StoreError {
    move |e| StoreError::Corrupt(format!("{table}: {e}"))
}

fn insert_error(what: &'static str) -> impl Fn(sqlx::Error) -> StoreError {
    move |e| {
        if is_fk_violation(&e) {
            StoreError::UnknownReference(format!("{what}: {e}"))
        } else {
            StoreError::from(e)
        }
    }
}

pub struct MySqlMonitoringRepo {
    pool: MySqlPool,
}

impl MySqlMonitoringRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlMonitoringRepo { pool }
    }

    fn row_to_system(r: &MySqlRow) -> Result<MonitoredSystem, StoreError> {
        let c = corrupt("systems");
        Ok(MonitoredSystem {
            system_id: r.try_get("system_id").map_err(&c)?,
            name: r.try_get("system_name").map_err(&c)?,
            description: r
                .try_get::<Option<String>, _>("description")
                .map_err(&c)?
                .unwrap_or_default(),
        })
    }

    fn row_to_access(r: &MySqlRow) -> Result<AccessSummary, StoreError> {
        let c = corrupt("access_log");
        Ok(AccessSummary {
            access_id: r.try_get("access_id").map_err(&c)?,
            user_name: r.try_get("user_name").map_err(&c)?,
            accessed_on: r.try_get("accessed_on").map_err(&c)?,
            successful: r.try_get("successful").map_err(&c)?,
            ip: r.try_get("ip").map_err(&c)?,
            system_name: r.try_get("system_name").map_err(&c)?,
        })
    }

    fn row_to_user_access(r: &MySqlRow) -> Result<UserAccess, StoreError> {
        let c = corrupt("access_log");
        Ok(UserAccess {
            access_id: r.try_get("access_id").map_err(&c)?,
            accessed_on: r.try_get("accessed_on").map_err(&c)?,
            successful: r.try_get("successful").map_err(&c)?,
            ip: r.try_get("ip").map_err(&c)?,
            system_id: r.try_get("system_id").map_err(&c)?,
        })
    }

    fn row_to_event(r: &MySqlRow) -> Result<SecurityEventSummary, StoreError> {
        let c = corrupt("security_events");
        Ok(SecurityEventSummary {
            event_id: r.try_get("event_id").map_err(&c)?,
            user_name: r.try_get("user_name").map_err(&c)?,
            event_type: r.try_get("event_type").map_err(&c)?,
            description: r.try_get("description").map_err(&c)?,
            occurred_on: r.try_get("occurred_on").map_err(&c)?,
        })
    }

    fn row_to_alert(r: &MySqlRow) -> Result<AlertSummary, StoreError> {
        let c = corrupt("alerts");
        Ok(AlertSummary {
            alert_id: r.try_get("alert_id").map_err(&c)?,
            user_name: r.try_get("user_name").map_err(&c)?,
            message: r.try_get("message").map_err(&c)?,
            raised_on: r.try_get("raised_on").map_err(&c)?,
        })
    }
}

#[async_trait::async_trait]
impl MonitoringRepo for MySqlMonitoringRepo {
    async fn list_systems(&self) -> Result<Vec<MonitoredSystem>, StoreError> {
        let rows = sqlx::query(
            "SELECT system_id, system_name, description FROM systems ORDER BY system_id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_system).collect()
    }

    async fn insert_access_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        access: &NewAccess,
    ) -> Result<AccessId, StoreError> {
        let tx = downcast(tx)?;

        let access_id = AccessId(next_id_in_tx(tx.conn(), "access_log", "access_id").await?);

        sqlx::query(
            r#"
INSERT INTO access_log (access_id, user_id, accessed_on, successful, ip, system_id)
VALUES (?, ?, ?, ?, ?, ?)
"#,
        )
        .bind(access_id)
        .bind(access.user_id)
        .bind(Local::now().date_naive())
        .bind(access.successful)
        .bind(&access.ip)
        .bind(access.system_id)
        .execute(tx.conn())
        .await
        .map_err(insert_error("access_log"))?;

        Ok(access_id)
    }

    async fn list_accesses(&self, limit: RowLimit) -> Result<Vec<AccessSummary>, StoreError> {
        let rows = sqlx::query(
            r#"
SELECT a.access_id, u.name AS user_name, a.accessed_on, a.successful, a.ip,
       s.system_name
FROM access_log a
JOIN users u ON a.user_id = u.user_id
JOIN systems s ON a.system_id = s.system_id
ORDER BY a.access_id DESC
LIMIT ?
"#,
        )
        .bind(limit.0)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_access).collect()
    }

    async fn list_accesses_for_user(
        &self,
        user_id: UserId,
        limit: RowLimit,
    ) -> Result<Vec<UserAccess>, StoreError> {
        let rows = sqlx::query(
            r#"
SELECT access_id, accessed_on, successful, ip, system_id
FROM access_log
WHERE user_id = ?
ORDER BY access_id DESC
LIMIT ?
"#,
        )
        .bind(user_id)
        .bind(limit.0)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_user_access).collect()
    }

    async fn insert_event_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        event: &NewSecurityEvent,
    ) -> Result<EventId, StoreError> {
        let tx = downcast(tx)?;

        let event_id = EventId(next_id_in_tx(tx.conn(), "security_events", "event_id").await?);

        sqlx::query(
            r#"
INSERT INTO security_events (event_id, user_id, event_type, description, occurred_on)
VALUES (?, ?, ?, ?, ?)
"#,
        )
        .bind(event_id)
        .bind(event.user_id)
        .bind(&event.event_type)
        .bind(&event.description)
        .bind(Local::now().date_naive())
        .execute(tx.conn())
        .await
        .map_err(insert_error("security_events"))?;

        Ok(event_id)
    }

    async fn list_events(
        &self,
        limit: RowLimit,
    ) -> Result<Vec<SecurityEventSummary>, StoreError> {
        let rows = sqlx::query(
            r#"
SELECT e.event_id, u.name AS user_name, e.event_type, e.description, e.occurred_on
FROM security_events e
JOIN users u ON e.user_id = u.user_id
ORDER BY e.event_id DESC
LIMIT ?
"#,
        )
        .bind(limit.0)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_event).collect()
    }

    async fn insert_alert_in_tx(
        &self,
        tx: &mut dyn StorageTx,
        alert: &NewAlert,
    ) -> Result<AlertId, StoreError> {
        let tx = downcast(tx)?;

        let alert_id = AlertId(next_id_in_tx(tx.conn(), "alerts", "alert_id").await?);

        sqlx::query(
            r#"
INSERT INTO alerts (alert_id, user_id, message, raised_on)
VALUES (?, ?, ?, ?)
"#,
        )
        .bind(alert_id)
        .bind(alert.user_id)
        .bind(&alert.message)
        .bind(Local::now().date_naive())
        .execute(tx.conn())
        .await
        .map_err(insert_error("alerts"))?;

        Ok(alert_id)
    }

    async fn list_alerts(&self, limit: RowLimit) -> Result<Vec<AlertSummary>, StoreError> {
        let rows = sqlx::query(
            r#"
SELECT a.alert_id, u.name AS user_name, a.message, a.raised_on
FROM alerts a
JOIN users u ON a.user_id = u.user_id
ORDER BY a.alert_id DESC
LIMIT ?
"#,
        )
        .bind(limit.0)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_alert).collect()
    }

    async fn list_alerts_for_user(
        &self,
        user_id: UserId,
        limit: RowLimit,
    ) -> Result<Vec<AlertSummary>, StoreError> {
        let rows = sqlx::query(
            r#"
SELECT a.alert_id, u.name AS user_name, a.message, a.raised_on
FROM alerts a
JOIN users u ON a.user_id = u.user_id
WHERE a.user_id = ?
ORDER BY a.alert_id DESC
LIMIT ?
"#,
        )
        .bind(user_id)
        .bind(limit.0)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_alert).collect()
    }
}
