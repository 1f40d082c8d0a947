use crate::application_port::{AdminError, UserService};
use crate::domain_model::User;
use crate::domain_port::UserRepo;
use std::sync::Arc;

pub struct RealUserService {
    user_repo: Arc<dyn UserRepo>,
}

impl RealUserService {
    pub fn new(user_repo: Arc<dyn UserRepo>) -> RealUserService {
        RealUserService { user_repo }
    }
}

#[async_trait::async_trait]
impl UserService for RealUserService {
    async fn find_by_name(&self, name: &str) -> Result<User, AdminError> {
        self.user_repo
            .find_by_name(name)
            .await?
            .map(|rec| rec.user)
            .ok_or(AdminError::NotFound)
    }

    async fn list(&self) -> Result<Vec<User>, AdminError> {
        Ok(self.user_repo.list().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[tokio::test]
    async fn lists_users_by_ascending_id() {
        let fx = Fixture::new().await;
        fx.seed_user("zed", "usuario", "pw", false).await;
        fx.seed_user("amy", "admin", "pw", true).await;

        let users = fx.users.list().await.unwrap();
        let names: Vec<_> = users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["zed", "amy"]);
        assert!(users[0].user_id < users[1].user_id);
        assert!(users[1].blocked);
    }

    #[tokio::test]
    async fn find_by_name_is_exact() {
        let fx = Fixture::new().await;
        fx.seed_user("amy", "admin", "pw", false).await;

        assert_eq!(fx.users.find_by_name("amy").await.unwrap().role, "admin");
        assert!(matches!(
            fx.users.find_by_name("am").await,
            Err(AdminError::NotFound)
        ));
    }
}
