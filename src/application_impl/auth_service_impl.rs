use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::{AuditRepo, TxManager, UserRepo};
use crate::logger::*;
use std::sync::Arc;

pub struct RealAuthService {
    user_repo: Arc<dyn UserRepo>,
    audit_repo: Arc<dyn AuditRepo>,
    credential_hasher: Arc<dyn CredentialHasher>,
    tx_manager: Arc<dyn TxManager>,
}

impl RealAuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepo>,
        audit_repo: Arc<dyn AuditRepo>,
        credential_hasher: Arc<dyn CredentialHasher>,
        tx_manager: Arc<dyn TxManager>,
    ) -> Self {
        Self {
            user_repo,
            audit_repo,
            credential_hasher,
            tx_manager,
        }
    }
}

#[async_trait::async_trait]
impl AuthService for RealAuthService {
    async fn login(&self, request: LoginInput) -> Result<Session, AuthError> {
        let LoginInput { name, password } = request;

        let Some(rec) = self.user_repo.find_by_name(&name).await? else {
            warn!(user = %name, "login refused: unknown user");
            return Err(AuthError::NotFound);
        };

        // Blocked accounts are refused before the credential is looked at.
        if rec.user.blocked {
            warn!(user = %name, "login refused: user is blocked");
            return Err(AuthError::Blocked);
        }

        let ok = self
            .credential_hasher
            .verify_password(&password, &rec.credential_hash)
            .await?;
        if !ok {
            warn!(user = %name, "login refused: bad credential");
            return Err(AuthError::BadCredential);
        }

        let mut tx = self
            .tx_manager
            .begin()
            .await
            .map_err(|e| AuthError::StorageUnavailable(e.to_string()))?;

        self.audit_repo
            .append_in_tx(
                tx.as_mut(),
                &NewAuditEntry::today(&rec.user.name, ActionKind::Login, USERS_TABLE),
            )
            .await?;

        tx.commit()
            .await
            .map_err(|e| AuthError::StorageUnavailable(e.to_string()))?;

        info!(user = %rec.user.name, role = %rec.user.role, "login succeeded");
        Ok(Session::from(rec.user))
    }
}
