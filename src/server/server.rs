use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use crate::infra_memory::*;
use crate::infra_mysql::*;
use crate::logger::*;
use crate::settings::Settings;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::sync::Arc;

/// Storage the services were wired against.
pub enum Backend {
    MySql(MySqlPool),
    Memory(MemoryStore),
}

struct Ports {
    tx_manager: Arc<dyn TxManager>,
    user_repo: Arc<dyn UserRepo>,
    role_repo: Arc<dyn RoleRepo>,
    audit_repo: Arc<dyn AuditRepo>,
    monitoring_repo: Arc<dyn MonitoringRepo>,
}

impl Ports {
    fn mysql(pool: &MySqlPool) -> Self {
        Ports {
            tx_manager: Arc::new(MySqlTxManager::new(pool.clone())),
            user_repo: Arc::new(MySqlUserRepo::new(pool.clone())),
            role_repo: Arc::new(MySqlRoleRepo::new(pool.clone())),
            audit_repo: Arc::new(MySqlAuditRepo::new(pool.clone())),
            monitoring_repo: Arc::new(MySqlMonitoringRepo::new(pool.clone())),
        }
    }

    fn memory(store: &MemoryStore) -> Self {
        Ports {
            tx_manager: Arc::new(store.tx_manager()),
            user_repo: Arc::new(MemoryUserRepo::new(store.clone())),
            role_repo: Arc::new(MemoryRoleRepo::new(store.clone())),
            audit_repo: Arc::new(MemoryAuditRepo::new(store.clone())),
            monitoring_repo: Arc::new(MemoryMonitoringRepo::new(store.clone())),
        }
    }
}

pub struct Server {
    pub auth_service: Arc<dyn AuthService>,
    pub admin_service: Arc<dyn AdminService>,
    pub user_service: Arc<dyn UserService>,
    pub role_catalog: Arc<dyn RoleCatalog>,
    pub audit_service: Arc<dyn AuditService>,
    pub monitoring_service: Arc<dyn MonitoringService>,
    backend: Backend,
}

impl Server {
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let credentials = &settings.credentials;
        let credential_hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2PasswordHasher::new(
            credentials.memory_kib,
            credentials.iterations,
            credentials.parallelism,
        )?);

        let backend = match settings.storage.backend.as_str() {
            "mysql" => {
                let pool = MySqlPoolOptions::new()
                    .max_connections(settings.storage.max_connections)
                    .connect(&settings.storage.url)
                    .await?;
                Backend::MySql(pool)
            }
            "memory" => {
                let store = MemoryStore::new();
                seed_standard_roles(&store).await;
                if let Some(admin) = &settings.storage.bootstrap_admin {
                    let credential_hash = credential_hasher
                        .hash_password(&credentials.default_password)
                        .await?;
                    store
                        .add_user(&NewUser {
                            name: admin.clone(),
                            role: ADMIN_ROLE.to_string(),
                            blocked: false,
                            credential_hash,
                        })
                        .await?;
                }
                Backend::Memory(store)
            }
            other => return Err(anyhow::anyhow!("Unknown storage backend: {}", other)),
        };

        let ports = match &backend {
            Backend::MySql(pool) => Ports::mysql(pool),
            Backend::Memory(store) => Ports::memory(store),
        };
        let limits = settings.limits;

        let auth_service: Arc<dyn AuthService> = Arc::new(RealAuthService::new(
            ports.user_repo.clone(),
            ports.audit_repo.clone(),
            credential_hasher.clone(),
            ports.tx_manager.clone(),
        ));

        let admin_service: Arc<dyn AdminService> = Arc::new(RealAdminService::new(
            ports.user_repo.clone(),
            ports.audit_repo.clone(),
            credential_hasher,
            ports.tx_manager.clone(),
            credentials.default_password.clone(),
        ));

        let user_service: Arc<dyn UserService> =
            Arc::new(RealUserService::new(ports.user_repo.clone()));

        let role_catalog: Arc<dyn RoleCatalog> = Arc::new(RealRoleCatalog::new(ports.role_repo));

        let audit_service: Arc<dyn AuditService> = Arc::new(RealAuditService::new(
            ports.audit_repo.clone(),
            ports.tx_manager.clone(),
            limits.audit,
        ));

        let monitoring_service: Arc<dyn MonitoringService> =
            Arc::new(RealMonitoringService::new(
                ports.monitoring_repo,
                ports.audit_repo,
                ports.tx_manager,
                MonitoringLimits {
                    accesses: limits.accesses,
                    user_accesses: limits.user_accesses,
                    events: limits.events,
                    alerts: limits.alerts,
                },
            ));

        info!(backend = %settings.storage.backend, "server ready");

        Ok(Self {
            auth_service,
            admin_service,
            user_service,
            role_catalog,
            audit_service,
            monitoring_service,
            backend,
        })
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    pub async fn shutdown(&self) {
        if let Backend::MySql(pool) = &self.backend {
            pool.close().await;
        }
        info!("server shutdown");
    }
}

pub const ADMIN_ROLE: &str = "admin";
pub const AUDITOR_ROLE: &str = "auditor";
pub const USER_ROLE: &str = "usuario";

/// The roles a fresh database ships with.
pub async fn seed_standard_roles(store: &MemoryStore) {
    store
        .add_role(ADMIN_ROLE, [CAP_VIEW_ALL, CAP_MODIFY].into_iter().collect())
        .await;
    store
        .add_role(AUDITOR_ROLE, [CAP_VIEW_ALL].into_iter().collect())
        .await;
    store.add_role(USER_ROLE, PermissionSet::new()).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::*;

    fn memory_settings(bootstrap_admin: Option<&str>) -> Settings {
        Settings {
            log: Log {
                filter: "info".to_string(),
            },
            storage: Storage {
                backend: "memory".to_string(),
                url: String::new(),
                max_connections: 1,
                bootstrap_admin: bootstrap_admin.map(str::to_string),
            },
            credentials: Credentials {
                default_password: "s3cret".to_string(),
                memory_kib: 256,
                iterations: 1,
                parallelism: 1,
            },
            limits: Limits::default(),
        }
    }

    #[tokio::test]
    async fn memory_backend_seeds_roles_and_bootstrap_admin() {
        let server = Server::try_new(&memory_settings(Some("root")))
            .await
            .unwrap();

        let names: Vec<_> = server
            .role_catalog
            .list_roles()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec![ADMIN_ROLE, AUDITOR_ROLE, USER_ROLE]);

        let session = server
            .auth_service
            .login(LoginInput {
                name: "root".to_string(),
                password: "s3cret".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(session.role, ADMIN_ROLE);
        assert!(matches!(server.backend(), Backend::Memory(_)));
        server.shutdown().await;
    }

    #[tokio::test]
    async fn unknown_backend_is_rejected() {
        let mut settings = memory_settings(None);
        settings.storage.backend = "postgres".to_string();
        assert!(Server::try_new(&settings).await.is_err());
    }
}
