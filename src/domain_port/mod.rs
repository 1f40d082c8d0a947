// repo

mod audit_repo;
mod monitoring_repo;
mod role_repo;
mod user_repo;

mod repo_tx;
mod store_error;

pub use audit_repo::*;
pub use monitoring_repo::*;
pub use role_repo::*;
pub use user_repo::*;

pub use repo_tx::*;
pub use store_error::*;
