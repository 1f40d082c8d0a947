use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::{AuditRepo, NewUser, TxManager, UserRepo};
use crate::logger::*;
use std::sync::Arc;

pub const DEFAULT_CREDENTIAL: &str = "1234";

pub struct RealAdminService {
    user_repo: Arc<dyn UserRepo>,
    audit_repo: Arc<dyn AuditRepo>,
    credential_hasher: Arc<dyn CredentialHasher>,
    tx_manager: Arc<dyn TxManager>,
    default_credential: String,
}

impl RealAdminService {
    pub fn new(
        user_repo: Arc<dyn UserRepo>,
        audit_repo: Arc<dyn AuditRepo>,
        credential_hasher: Arc<dyn CredentialHasher>,
        tx_manager: Arc<dyn TxManager>,
        default_credential: impl Into<String>,
    ) -> Self {
        Self {
            user_repo,
            audit_repo,
            credential_hasher,
            tx_manager,
            default_credential: default_credential.into(),
        }
    }
}

#[async_trait::async_trait]
impl AdminService for RealAdminService {
    async fn register_user(
        &self,
        actor: &str,
        request: RegisterUserInput,
    ) -> Result<UserId, AdminError> {
        let RegisterUserInput {
            name,
            role,
            credential,
        } = request;

        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AdminError::InvalidName);
        }

        // An empty credential counts as omitted.
        let credential = credential
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| self.default_credential.clone());
        let credential_hash = self.credential_hasher.hash_password(&credential).await?;

        let mut tx = self
            .tx_manager
            .begin()
            .await
            .map_err(|e| AdminError::StorageUnavailable(e.to_string()))?;

        let user_id = self
            .user_repo
            .create_in_tx(
                tx.as_mut(),
                &NewUser {
                    name: name.clone(),
                    role: role.clone(),
                    blocked: false,
                    credential_hash,
                },
            )
            .await?;

        self.audit_repo
            .append_in_tx(
                tx.as_mut(),
                &NewAuditEntry::today(actor, ActionKind::Insert, USERS_TABLE),
            )
            .await?;

        tx.commit()
            .await
            .map_err(|e| AdminError::StorageUnavailable(e.to_string()))?;

        info!(%actor, user = %name, %role, %user_id, "user registered");
        Ok(user_id)
    }

    async fn set_block_state(
        &self,
        actor: &str,
        user_id: UserId,
        blocked: bool,
    ) -> Result<(), AdminError> {
        let mut tx = self
            .tx_manager
            .begin()
            .await
            .map_err(|e| AdminError::StorageUnavailable(e.to_string()))?;

        if !self
            .user_repo
            .set_blocked_in_tx(tx.as_mut(), user_id, blocked)
            .await?
        {
            return Err(AdminError::NotFound);
        }

        self.audit_repo
            .append_in_tx(
                tx.as_mut(),
                &NewAuditEntry::today(actor, ActionKind::Update, USERS_TABLE),
            )
            .await?;

        tx.commit()
            .await
            .map_err(|e| AdminError::StorageUnavailable(e.to_string()))?;

        info!(%actor, %user_id, blocked, "block state changed");
        Ok(())
    }
}
