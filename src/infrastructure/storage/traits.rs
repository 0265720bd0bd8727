//! Storage trait definitions

use async_trait::async_trait;

use crate::support::errors::InfraError;

/// Durable key-value byte store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the bytes stored under `key`, `None` if never written.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, InfraError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), InfraError>;

    /// Remove `key`; removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), InfraError>;
}
