use crate::application_port::{CatalogError, RoleCatalog};
use crate::domain_model::{PermissionSet, Role};
use crate::domain_port::RoleRepo;
use crate::logger::*;
use std::sync::Arc;

pub struct RealRoleCatalog {
    role_repo: Arc<dyn RoleRepo>,
}

impl RealRoleCatalog {
    pub fn new(role_repo: Arc<dyn RoleRepo>) -> Self {
        RealRoleCatalog { role_repo }
    }
}

#[async_trait::async_trait]
impl RoleCatalog for RealRoleCatalog {
    async fn permissions_of(&self, role: &str) -> Result<PermissionSet, CatalogError> {
        let permissions = self.role_repo.find_permissions(role).await?;
        if permissions.is_none() {
            debug!(%role, "unknown role has no permissions");
        }
        Ok(permissions.unwrap_or_default())
    }

    async fn list_roles(&self) -> Result<Vec<Role>, CatalogError> {
        Ok(self.role_repo.list().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::domain_model::{CAP_MODIFY, CAP_VIEW_ALL};
    use crate::domain_port::StoreError;

    struct OfflineRoleRepo;

    #[async_trait::async_trait]
    impl RoleRepo for OfflineRoleRepo {
        async fn find_permissions(
            &self,
            _role: &str,
        ) -> Result<Option<PermissionSet>, StoreError> {
            Err(StoreError::Unavailable("roles offline".to_string()))
        }

        async fn list(&self) -> Result<Vec<Role>, StoreError> {
            Err(StoreError::Corrupt("roles: bad row".to_string()))
        }
    }

    #[tokio::test]
    async fn storage_failures_surface_as_catalog_errors() {
        let roles = RealRoleCatalog::new(Arc::new(OfflineRoleRepo));

        assert!(matches!(
            roles.has_permission("admin", CAP_MODIFY).await,
            Err(CatalogError::StorageUnavailable(_))
        ));
        assert!(matches!(
            roles.list_roles().await,
            Err(CatalogError::InternalError(_))
        ));
    }

    #[tokio::test]
    async fn has_permission_checks_set_membership() {
        let fx = Fixture::new().await;
        fx.store
            .add_role("r", ["a", "b", "c"].into_iter().collect())
            .await;

        assert!(fx.roles.has_permission("r", "a").await.unwrap());
        assert!(fx.roles.has_permission("r", "c").await.unwrap());
        assert!(!fx.roles.has_permission("r", "z").await.unwrap());
    }

    #[tokio::test]
    async fn unknown_or_empty_role_has_no_permissions() {
        let fx = Fixture::new().await;

        assert!(fx.roles.permissions_of("ghost").await.unwrap().is_empty());
        assert!(fx.roles.permissions_of("usuario").await.unwrap().is_empty());
        assert!(!fx.roles.has_permission("ghost", CAP_VIEW_ALL).await.unwrap());
    }

    #[tokio::test]
    async fn standard_roles_grant_expected_capabilities() {
        let fx = Fixture::new().await;

        assert!(fx.roles.has_permission("admin", CAP_MODIFY).await.unwrap());
        assert!(fx.roles.has_permission("auditor", CAP_VIEW_ALL).await.unwrap());
        assert!(!fx.roles.has_permission("auditor", CAP_MODIFY).await.unwrap());

        let names: Vec<_> = fx
            .roles
            .list_roles()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["admin", "auditor", "usuario"]);
    }
}
