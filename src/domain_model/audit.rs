use crate::domain_model::AuditId;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const USERS_TABLE: &str = "users";
pub const ACCESS_LOG_TABLE: &str = "access_log";
pub const SECURITY_EVENTS_TABLE: &str = "security_events";
pub const ALERTS_TABLE: &str = "alerts";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionKind {
    Insert,
    Update,
    Delete,
    Login,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionKind::Insert => "INSERT",
            ActionKind::Update => "UPDATE",
            ActionKind::Delete => "DELETE",
            ActionKind::Login => "LOGIN",
        };
        f.write_str(s)
    }
}

impl FromStr for ActionKind {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "INSERT" => Ok(Self::Insert),
            "UPDATE" => Ok(Self::Update),
            "DELETE" => Ok(Self::Delete),
            "LOGIN" => Ok(Self::Login),
            _ => anyhow::bail!("unknown audit action: {}", s),
        }
    }
}

/// One immutable line of the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEntry {
    pub audit_id: AuditId,
    /// Who triggered the action; not necessarily the user it affected.
    pub actor: String,
    pub action: ActionKind,
    pub affected_table: String,
    pub logged_on: NaiveDate,
}

/// An audit entry before the store has assigned it an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuditEntry {
    pub actor: String,
    pub action: ActionKind,
    pub affected_table: String,
    pub logged_on: NaiveDate,
}

impl NewAuditEntry {
    pub fn today(actor: &str, action: ActionKind, affected_table: &str) -> Self {
        NewAuditEntry {
            actor: actor.to_string(),
            action,
            affected_table: affected_table.to_string(),
            logged_on: Local::now().date_naive(),
        }
    }
}
