mod admin_service_impl;
mod audit_service_impl;
mod auth_service_impl;
mod credential_hasher;
mod monitoring_service_impl;
mod role_catalog_impl;
mod user_service_impl;

#[cfg(test)]
mod test_support;

pub use admin_service_impl::*;
pub use audit_service_impl::*;
pub use auth_service_impl::*;
pub use credential_hasher::*;
pub use monitoring_service_impl::*;
pub use role_catalog_impl::*;
pub use user_service_impl::*;
