mod audit_repo_mysql;
mod monitoring_repo_mysql;
mod role_repo_mysql;
mod user_repo_mysql;

pub use audit_repo_mysql::*;
pub use monitoring_repo_mysql::*;
pub use role_repo_mysql::*;
pub use user_repo_mysql::*;

mod repo_tx_mysql;

pub use repo_tx_mysql::*;

mod util;
