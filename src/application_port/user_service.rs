use crate::application_port::AdminError;
use crate::domain_model::User;

#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<User, AdminError>;
    async fn list(&self) -> Result<Vec<User>, AdminError>;
}
