use std::any::Any;

#[async_trait::async_trait]
pub trait TxManager: Send + Sync {
    async fn begin(&self) -> anyhow::Result<Box<dyn StorageTx>>;
}

/// One unit of work against a storage backend. Dropping a transaction
/// without committing it rolls it back.
#[async_trait::async_trait]
pub trait StorageTx: Any + Send {
    async fn commit(self: Box<Self>) -> anyhow::Result<()>;
    async fn rollback(self: Box<Self>) -> anyhow::Result<()>;

    /// Lets an adapter recover its own transaction type from the trait object.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
