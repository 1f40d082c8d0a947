use crate::domain_model::*;
use serde::Serialize;

/// Result of one console command.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Output {
    Session(Session),
    Users(Vec<User>),
    Roles(Vec<Role>),
    Systems(Vec<MonitoredSystem>),
    Accesses(Vec<AccessSummary>),
    UserAccesses(Vec<UserAccess>),
    Events(Vec<SecurityEventSummary>),
    Alerts(Vec<AlertSummary>),
    Audit(Vec<AuditEntry>),
    Created { table: &'static str, id: i64 },
    Updated { user_id: UserId, blocked: bool },
}

fn outcome(successful: bool) -> &'static str {
    if successful { "ok" } else { "FAILED" }
}

impl Output {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn lines(&self) -> Vec<String> {
        match self {
            Output::Session(s) => vec![format!("signed in as {} ({})", s.name, s.role)],
            Output::Users(users) => users
                .iter()
                .map(|u| {
                    let state = if u.blocked { "blocked" } else { "active" };
                    format!("[{}] {} ({}, {})", u.user_id, u.name, u.role, state)
                })
                .collect(),
            Output::Roles(roles) => roles
                .iter()
                .map(|r| {
                    let permissions: Vec<&str> = r.permissions.iter().collect();
                    format!("[{}] {}: {}", r.role_id, r.name, permissions.join(", "))
                })
                .collect(),
            Output::Systems(systems) => systems
                .iter()
                .map(|s| format!("[{}] {} :: {}", s.system_id, s.name, s.description))
                .collect(),
            Output::Accesses(rows) => rows
                .iter()
                .map(|a| {
                    format!(
                        "[{}] {} {} {} {} {}",
                        a.access_id,
                        a.user_name,
                        outcome(a.successful),
                        a.accessed_on,
                        a.ip,
                        a.system_name
                    )
                })
                .collect(),
            Output::UserAccesses(rows) => rows
                .iter()
                .map(|a| {
                    format!(
                        "[{}] {} {} {} (system {})",
                        a.access_id,
                        outcome(a.successful),
                        a.accessed_on,
                        a.ip,
                        a.system_id
                    )
                })
                .collect(),
            Output::Events(rows) => rows
                .iter()
                .map(|e| {
                    format!(
                        "[{}] {} :: {} - {} ({})",
                        e.event_id, e.user_name, e.event_type, e.description, e.occurred_on
                    )
                })
                .collect(),
            Output::Alerts(rows) => rows
                .iter()
                .map(|a| format!("[{}] {} :: {} ({})", a.alert_id, a.user_name, a.message, a.raised_on))
                .collect(),
            Output::Audit(rows) => rows
                .iter()
                .map(|a| {
                    format!(
                        "[{}] {} :: {} [{}] ({})",
                        a.audit_id, a.actor, a.action, a.affected_table, a.logged_on
                    )
                })
                .collect(),
            Output::Created { table, id } => vec![format!("created {table} row {id}")],
            Output::Updated { user_id, blocked } => {
                let state = if *blocked { "blocked" } else { "unblocked" };
                vec![format!("user {user_id} {state}")]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn audit_lines_show_actor_action_and_table() {
        let out = Output::Audit(vec![AuditEntry {
            audit_id: AuditId(7),
            actor: "root".to_string(),
            action: ActionKind::Update,
            affected_table: USERS_TABLE.to_string(),
            logged_on: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        }]);

        assert_eq!(out.lines(), vec!["[7] root :: UPDATE [users] (2024-05-01)"]);
    }

    #[test]
    fn json_keeps_field_names_and_bare_ids() {
        let out = Output::Users(vec![User {
            user_id: UserId(3),
            name: "ana".to_string(),
            role: "auditor".to_string(),
            blocked: true,
        }]);

        let value: serde_json::Value = serde_json::from_str(&out.to_json().unwrap()).unwrap();
        assert_eq!(value[0]["user_id"], 3);
        assert_eq!(value[0]["blocked"], true);
        assert_eq!(out.lines(), vec!["[3] ana (auditor, blocked)"]);
    }
}
