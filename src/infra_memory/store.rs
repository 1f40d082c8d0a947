use crate::domain_model::*;
use crate::domain_port::*;
use chrono::NaiveDate;
use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard, OwnedMutexGuard};

#[derive(Debug, Clone)]
pub(super) struct AccessRow {
    pub access_id: AccessId,
    pub user_id: UserId,
    pub accessed_on: NaiveDate,
    pub successful: bool,
    pub ip: String,
    pub system_id: SystemId,
}

#[derive(Debug, Clone)]
pub(super) struct EventRow {
    pub event_id: EventId,
    pub user_id: UserId,
    pub event_type: String,
    pub description: String,
    pub occurred_on: NaiveDate,
}

#[derive(Debug, Clone)]
pub(super) struct AlertRow {
    pub alert_id: AlertId,
    pub user_id: UserId,
    pub message: String,
    pub raised_on: NaiveDate,
}

#[derive(Debug, Clone, Default)]
pub(super) struct Tables {
    pub users: BTreeMap<UserId, UserCredentials>,
    pub roles: BTreeMap<RoleId, Role>,
    pub audit: BTreeMap<AuditId, AuditEntry>,
    pub systems: BTreeMap<SystemId, MonitoredSystem>,
    pub accesses: BTreeMap<AccessId, AccessRow>,
    pub events: BTreeMap<EventId, EventRow>,
    pub alerts: BTreeMap<AlertId, AlertRow>,
}

impl Tables {
    pub fn role_exists(&self, name: &str) -> bool {
        self.roles.values().any(|r| r.name == name)
    }

    pub fn user_name(&self, user_id: UserId) -> Option<&str> {
        self.users.get(&user_id).map(|u| u.user.name.as_str())
    }

    pub fn insert_user(&mut self, user: &NewUser) -> Result<UserId, StoreError> {
        if !self.role_exists(&user.role) {
            return Err(StoreError::UnknownRole(user.role.clone()));
        }
        if self.users.values().any(|u| u.user.name == user.name) {
            return Err(StoreError::DuplicateKey(user.name.clone()));
        }

        let user_id = self
            .users
            .keys()
            .next_back()
            .map_or(UserId::FIRST, |id| id.next());
        self.users.insert(
            user_id,
            UserCredentials {
                user: User {
                    user_id,
                    name: user.name.clone(),
                    role: user.role.clone(),
                    blocked: user.blocked,
                },
                credential_hash: user.credential_hash.clone(),
            },
        );
        Ok(user_id)
    }
}

/// Process-local storage backend. One transaction runs at a time: `begin`
/// takes the table lock and holds it until commit or rollback, and writes
/// land in a working copy that only becomes visible on commit.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tx_manager(&self) -> MemoryTxManager {
        MemoryTxManager {
            tables: self.tables.clone(),
        }
    }

    pub async fn add_role(&self, name: &str, permissions: PermissionSet) -> RoleId {
        let mut tables = self.tables.lock().await;
        let role_id = tables
            .roles
            .keys()
            .next_back()
            .map_or(RoleId::FIRST, |id| id.next());
        tables.roles.insert(
            role_id,
            Role {
                role_id,
                name: name.to_string(),
                permissions,
            },
        );
        role_id
    }

    pub async fn add_system(&self, name: &str, description: &str) -> SystemId {
        let mut tables = self.tables.lock().await;
        let system_id = tables
            .systems
            .keys()
            .next_back()
            .map_or(SystemId::FIRST, |id| id.next());
        tables.systems.insert(
            system_id,
            MonitoredSystem {
                system_id,
                name: name.to_string(),
                description: description.to_string(),
            },
        );
        system_id
    }

    /// Seeds a user without going through the audited admin path.
    pub async fn add_user(&self, user: &NewUser) -> Result<UserId, StoreError> {
        self.tables.lock().await.insert_user(user)
    }

    pub(super) async fn read(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().await
    }
}

pub struct MemoryTxManager {
    tables: Arc<Mutex<Tables>>,
}

#[async_trait::async_trait]
impl TxManager for MemoryTxManager {
    async fn begin(&self) -> anyhow::Result<Box<dyn StorageTx>> {
        let guard = self.tables.clone().lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(MemoryTx { guard, working }))
    }
}

pub struct MemoryTx {
    guard: OwnedMutexGuard<Tables>,
    working: Tables,
}

#[async_trait::async_trait]
impl StorageTx for MemoryTx {
    async fn commit(self: Box<Self>) -> anyhow::Result<()> {
        let MemoryTx { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> anyhow::Result<()> {
        Ok(())
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub(super) fn working(tx: &mut dyn StorageTx) -> Result<&mut Tables, StoreError> {
    tx.as_any_mut()
        .downcast_mut::<MemoryTx>()
        .map(|tx| &mut tx.working)
        .ok_or_else(|| {
            StoreError::Unavailable("transaction was not opened by the memory store".into())
        })
}
