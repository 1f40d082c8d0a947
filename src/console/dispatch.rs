use super::Output;
use crate::application_port::*;
use crate::domain_model::*;
use crate::logger::*;
use crate::server::Server;
use crate::settings::Command;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("--user and --password are required")]
    MissingCredentials,
    #[error("role '{role}' lacks the '{capability}' permission")]
    Forbidden {
        role: String,
        capability: &'static str,
    },
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Admin(#[from] AdminError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Capability the caller's role must carry to run `command`. `None` means
/// any signed-in user may run it.
pub fn required_capability(command: &Command) -> Option<&'static str> {
    match command {
        Command::Login
        | Command::MyAccesses { .. }
        | Command::MyAlerts { .. }
        | Command::RequestUnblock => None,
        Command::Users
        | Command::Roles
        | Command::Systems
        | Command::Accesses { .. }
        | Command::Events { .. }
        | Command::Alerts { .. }
        | Command::Audit { .. } => Some(CAP_VIEW_ALL),
        Command::AddUser { .. }
        | Command::Block { .. }
        | Command::Unblock { .. }
        | Command::RecordAccess { .. }
        | Command::CreateEvent { .. }
        | Command::CreateAlert { .. } => Some(CAP_MODIFY),
    }
}

pub struct Console<'a> {
    server: &'a Server,
}

impl<'a> Console<'a> {
    pub fn new(server: &'a Server) -> Self {
        Self { server }
    }

    pub async fn execute(
        &self,
        user: Option<&str>,
        password: Option<&str>,
        command: Command,
    ) -> Result<Output, ConsoleError> {
        let (Some(name), Some(password)) = (user, password) else {
            return Err(ConsoleError::MissingCredentials);
        };

        let session = self
            .server
            .auth_service
            .login(LoginInput {
                name: name.to_string(),
                password: password.to_string(),
            })
            .await?;

        if let Some(capability) = required_capability(&command) {
            let allowed = self
                .server
                .role_catalog
                .has_permission(&session.role, capability)
                .await?;
            if !allowed {
                warn!(user = %session.name, role = %session.role, capability, "command refused");
                return Err(ConsoleError::Forbidden {
                    role: session.role,
                    capability,
                });
            }
        }

        self.run(session, command).await
    }

    async fn run(&self, session: Session, command: Command) -> Result<Output, ConsoleError> {
        let server = self.server;
        let actor = session.name.as_str();
        let monitoring = &server.monitoring_service;

        let output = match command {
            Command::Login => Output::Session(session),
            Command::Users => Output::Users(server.user_service.list().await?),
            Command::Roles => Output::Roles(server.role_catalog.list_roles().await?),
            Command::AddUser {
                name,
                role,
                credential,
            } => {
                let user_id = server
                    .admin_service
                    .register_user(
                        actor,
                        RegisterUserInput {
                            name,
                            role,
                            credential,
                        },
                    )
                    .await?;
                Output::Created {
                    table: USERS_TABLE,
                    id: user_id.0,
                }
            }
            Command::Block { user_id } => self.set_blocked(actor, UserId(user_id), true).await?,
            Command::Unblock { user_id } => self.set_blocked(actor, UserId(user_id), false).await?,
            Command::Systems => Output::Systems(monitoring.list_systems().await?),
            Command::RecordAccess {
                user_id,
                system_id,
                ip,
                failed,
            } => {
                let access = NewAccess {
                    user_id: UserId(user_id),
                    successful: !failed,
                    ip,
                    system_id: SystemId(system_id),
                };
                let access_id = monitoring.record_access(actor, access).await?;
                Output::Created {
                    table: ACCESS_LOG_TABLE,
                    id: access_id.0,
                }
            }
            Command::Accesses { limit } => {
                Output::Accesses(monitoring.list_accesses(limit.map(RowLimit)).await?)
            }
            Command::CreateEvent {
                user_id,
                event_type,
                description,
            } => {
                let event = NewSecurityEvent {
                    user_id: UserId(user_id),
                    event_type,
                    description,
                };
                let event_id = monitoring.create_event(actor, event).await?;
                Output::Created {
                    table: SECURITY_EVENTS_TABLE,
                    id: event_id.0,
                }
            }
            Command::Events { limit } => {
                Output::Events(monitoring.list_events(limit.map(RowLimit)).await?)
            }
            Command::CreateAlert { user_id, message } => {
                let alert = NewAlert {
                    user_id: UserId(user_id),
                    message,
                };
                let alert_id = monitoring.create_alert(actor, alert).await?;
                Output::Created {
                    table: ALERTS_TABLE,
                    id: alert_id.0,
                }
            }
            Command::Alerts { limit } => {
                Output::Alerts(monitoring.list_alerts(limit.map(RowLimit)).await?)
            }
            Command::Audit { limit } => {
                Output::Audit(server.audit_service.list(limit.map(RowLimit)).await?)
            }
            Command::MyAccesses { limit } => Output::UserAccesses(
                monitoring
                    .accesses_for_user(session.user_id, limit.map(RowLimit))
                    .await?,
            ),
            Command::MyAlerts { limit } => Output::Alerts(
                monitoring
                    .alerts_for_user(session.user_id, limit.map(RowLimit))
                    .await?,
            ),
            Command::RequestUnblock => {
                let event_id = monitoring.request_unblock(&session).await?;
                Output::Created {
                    table: SECURITY_EVENTS_TABLE,
                    id: event_id.0,
                }
            }
        };

        Ok(output)
    }

    async fn set_blocked(
        &self,
        actor: &str,
        user_id: UserId,
        blocked: bool,
    ) -> Result<Output, ConsoleError> {
        self.server
            .admin_service
            .set_block_state(actor, user_id, blocked)
            .await?;
        Ok(Output::Updated { user_id, blocked })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_port::NewUser;
    use crate::server::Backend;
    use crate::settings::*;

    async fn server() -> Server {
        let settings = Settings {
            log: Log {
                filter: "info".to_string(),
            },
            storage: Storage {
                backend: "memory".to_string(),
                url: String::new(),
                max_connections: 1,
                bootstrap_admin: Some("root".to_string()),
            },
            credentials: Credentials {
                default_password: "1234".to_string(),
                memory_kib: 256,
                iterations: 1,
                parallelism: 1,
            },
            limits: Limits::default(),
        };
        let server = Server::try_new(&settings).await.unwrap();
        if let Backend::Memory(store) = server.backend() {
            store.add_system("vpn", "Remote access gateway").await;
        }
        server
    }

    async fn add(server: &Server, name: &str, role: &str) {
        let console = Console::new(server);
        console
            .execute(
                Some("root"),
                Some("1234"),
                Command::AddUser {
                    name: name.to_string(),
                    role: role.to_string(),
                    credential: Some("pw".to_string()),
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn login_reports_the_signed_in_session() {
        let server = server().await;
        add(&server, "ines", "auditor").await;
        let console = Console::new(&server);

        let out = console
            .execute(Some("ines"), Some("pw"), Command::Login)
            .await
            .unwrap();
        match out {
            Output::Session(session) => {
                assert_eq!(session.user_id, UserId(2));
                assert_eq!(session.name, "ines");
                assert_eq!(session.role, "auditor");
            }
            other => panic!("unexpected output: {other:?}"),
        }
    }

    #[tokio::test]
    async fn commands_require_credentials() {
        let server = server().await;
        let console = Console::new(&server);

        assert!(matches!(
            console.execute(Some("root"), None, Command::Users).await,
            Err(ConsoleError::MissingCredentials)
        ));
    }

    #[tokio::test]
    async fn auditor_can_read_but_not_modify() {
        let server = server().await;
        add(&server, "ines", "auditor").await;
        let console = Console::new(&server);

        let users = console
            .execute(Some("ines"), Some("pw"), Command::Users)
            .await
            .unwrap();
        assert!(matches!(users, Output::Users(ref u) if u.len() == 2));

        let err = console
            .execute(Some("ines"), Some("pw"), Command::Block { user_id: 1 })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ConsoleError::Forbidden { capability: CAP_MODIFY, .. }
        ));
    }

    #[tokio::test]
    async fn plain_users_only_see_their_own_records() {
        let server = server().await;
        add(&server, "leo", "usuario").await;
        let console = Console::new(&server);

        assert!(matches!(
            console
                .execute(Some("leo"), Some("pw"), Command::Audit { limit: None })
                .await,
            Err(ConsoleError::Forbidden { capability: CAP_VIEW_ALL, .. })
        ));

        console
            .execute(
                Some("root"),
                Some("1234"),
                Command::RecordAccess {
                    user_id: 2,
                    system_id: 1,
                    ip: "10.1.1.1".to_string(),
                    failed: true,
                },
            )
            .await
            .unwrap();

        let mine = console
            .execute(Some("leo"), Some("pw"), Command::MyAccesses { limit: None })
            .await
            .unwrap();
        assert_eq!(mine.lines().len(), 1);
        assert!(mine.lines()[0].contains("FAILED"));
    }

    #[tokio::test]
    async fn block_then_unblock_round_trip() {
        let server = server().await;
        add(&server, "max", "usuario").await;
        let console = Console::new(&server);

        console
            .execute(Some("root"), Some("1234"), Command::Block { user_id: 2 })
            .await
            .unwrap();
        assert!(matches!(
            console.execute(Some("max"), Some("pw"), Command::Login).await,
            Err(ConsoleError::Auth(AuthError::Blocked))
        ));

        console
            .execute(Some("root"), Some("1234"), Command::Unblock { user_id: 2 })
            .await
            .unwrap();
        console
            .execute(Some("max"), Some("pw"), Command::RequestUnblock)
            .await
            .unwrap();

        let audit = console
            .execute(Some("root"), Some("1234"), Command::Audit { limit: Some(2) })
            .await
            .unwrap();
        match audit {
            Output::Audit(entries) => {
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[0].action, ActionKind::Login);
                assert_eq!(entries[0].actor, "root");
                assert_eq!(entries[1].actor, "max");
                assert_eq!(entries[1].affected_table, SECURITY_EVENTS_TABLE);
            }
            other => panic!("unexpected output: {other:?}"),
        }
    }

    #[tokio::test]
    async fn seeded_users_outside_the_console_are_listed() {
        let server = server().await;
        if let Backend::Memory(store) = server.backend() {
            store
                .add_user(&NewUser {
                    name: "legacy".to_string(),
                    role: "usuario".to_string(),
                    blocked: true,
                    credential_hash: String::new(),
                })
                .await
                .unwrap();
        }
        let console = Console::new(&server);

        let out = console
            .execute(Some("root"), Some("1234"), Command::Users)
            .await
            .unwrap();
        assert_eq!(out.lines()[1], "[2] legacy (usuario, blocked)");
    }
}
