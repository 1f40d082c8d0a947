//! Memory-backed wiring shared by the service tests.

use super::*;
use crate::application_port::CredentialHasher;
use crate::domain_model::*;
use crate::domain_port::*;
use crate::infra_memory::*;
use crate::server::seed_standard_roles;
use std::sync::Arc;

pub struct Fixture {
    pub store: MemoryStore,
    pub user_repo: Arc<dyn UserRepo>,
    pub audit_repo: Arc<dyn AuditRepo>,
    pub monitoring_repo: Arc<dyn MonitoringRepo>,
    pub hasher: Arc<dyn CredentialHasher>,
    pub tx_manager: Arc<dyn TxManager>,
    pub auth: RealAuthService,
    pub admin: RealAdminService,
    pub users: RealUserService,
    pub roles: RealRoleCatalog,
    pub audit: RealAuditService,
    pub monitoring: RealMonitoringService,
}

impl Fixture {
    /// Seeds the admin, auditor and usuario roles, in that order.
    pub async fn new() -> Self {
        let store = MemoryStore::new();
        seed_standard_roles(&store).await;

        let user_repo: Arc<dyn UserRepo> = Arc::new(MemoryUserRepo::new(store.clone()));
        let role_repo: Arc<dyn RoleRepo> = Arc::new(MemoryRoleRepo::new(store.clone()));
        let audit_repo: Arc<dyn AuditRepo> = Arc::new(MemoryAuditRepo::new(store.clone()));
        let monitoring_repo: Arc<dyn MonitoringRepo> =
            Arc::new(MemoryMonitoringRepo::new(store.clone()));
        let tx_manager: Arc<dyn TxManager> = Arc::new(store.tx_manager());
        let hasher: Arc<dyn CredentialHasher> = Arc::new(cheap_hasher());

        Fixture {
            auth: RealAuthService::new(
                user_repo.clone(),
                audit_repo.clone(),
                hasher.clone(),
                tx_manager.clone(),
            ),
            admin: RealAdminService::new(
                user_repo.clone(),
                audit_repo.clone(),
                hasher.clone(),
                tx_manager.clone(),
                DEFAULT_CREDENTIAL,
            ),
            users: RealUserService::new(user_repo.clone()),
            roles: RealRoleCatalog::new(role_repo),
            audit: RealAuditService::new(audit_repo.clone(), tx_manager.clone(), RowLimit::AUDIT),
            monitoring: RealMonitoringService::new(
                monitoring_repo.clone(),
                audit_repo.clone(),
                tx_manager.clone(),
                MonitoringLimits::default(),
            ),
            store,
            user_repo,
            audit_repo,
            monitoring_repo,
            hasher,
            tx_manager,
        }
    }

    pub async fn seed_user(&self, name: &str, role: &str, password: &str, blocked: bool) -> UserId {
        let credential_hash = self.hasher.hash_password(password).await.unwrap();
        self.store
            .add_user(&NewUser {
                name: name.to_string(),
                role: role.to_string(),
                blocked,
                credential_hash,
            })
            .await
            .unwrap()
    }

    /// Every audit entry, newest first.
    pub async fn audit_entries(&self) -> Vec<AuditEntry> {
        self.audit_repo
            .list_recent(RowLimit(u32::MAX))
            .await
            .unwrap()
    }
}

pub fn cheap_hasher() -> Argon2PasswordHasher {
    Argon2PasswordHasher::new(256, 1, 1).unwrap()
}

pub struct FailingAuditRepo;

#[async_trait::async_trait]
impl AuditRepo for FailingAuditRepo {
    async fn append_in_tx(
        &self,
        _tx: &mut dyn StorageTx,
        _entry: &NewAuditEntry,
    ) -> Result<AuditId, StoreError> {
        Err(StoreError::Unavailable("audit log offline".to_string()))
    }

    async fn list_recent(&self, _limit: RowLimit) -> Result<Vec<AuditEntry>, StoreError> {
        Err(StoreError::Unavailable("audit log offline".to_string()))
    }
}
