mod admin_service;
mod audit_service;
mod auth_service;
mod monitoring_service;
mod role_catalog;
mod user_service;

pub use admin_service::*;
pub use audit_service::*;
pub use auth_service::*;
pub use monitoring_service::*;
pub use role_catalog::*;
pub use user_service::*;
