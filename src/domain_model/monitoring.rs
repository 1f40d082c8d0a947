use crate::domain_model::{AccessId, AlertId, EventId, SystemId, UserId};
use chrono::NaiveDate;
use serde::Serialize;

pub const UNBLOCK_REQUEST_EVENT: &str = "Unblock request";
pub const UNBLOCK_REQUEST_DESCRIPTION: &str = "User requests to be unblocked";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonitoredSystem {
    pub system_id: SystemId,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct NewAccess {
    pub user_id: UserId,
    pub successful: bool,
    pub ip: String,
    pub system_id: SystemId,
}

/// Access log row joined with the user and system names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessSummary {
    pub access_id: AccessId,
    pub user_name: String,
    pub accessed_on: NaiveDate,
    pub successful: bool,
    pub ip: String,
    pub system_name: String,
}

/// Access log row as seen by the user it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserAccess {
    pub access_id: AccessId,
    pub accessed_on: NaiveDate,
    pub successful: bool,
    pub ip: String,
    pub system_id: SystemId,
}

#[derive(Debug, Clone)]
pub struct NewSecurityEvent {
    pub user_id: UserId,
    pub event_type: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityEventSummary {
    pub event_id: EventId,
    pub user_name: String,
    pub event_type: String,
    pub description: String,
    pub occurred_on: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct NewAlert {
    pub user_id: UserId,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertSummary {
    pub alert_id: AlertId,
    pub user_name: String,
    pub message: String,
    pub raised_on: NaiveDate,
}
