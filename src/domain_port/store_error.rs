#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("role '{0}' does not exist")]
    UnknownRole(String),
    #[error("duplicate key: {0}")]
    DuplicateKey(String),
    #[error("unknown reference: {0}")]
    UnknownReference(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("corrupt row: {0}")]
    Corrupt(String),
}
