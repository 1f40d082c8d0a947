//! In-process storage backend. Backs the test suites and the `memory`
//! storage setting; nothing survives the process.

mod audit_repo_memory;
mod monitoring_repo_memory;
mod role_repo_memory;
mod store;
mod user_repo_memory;

pub use audit_repo_memory::*;
pub use monitoring_repo_memory::*;
pub use role_repo_memory::*;
pub use store::{MemoryStore, MemoryTx, MemoryTxManager};
pub use user_repo_memory::*;
