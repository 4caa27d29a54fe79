use async_trait::async_trait;

use crate::errors::CoreError;

/// Trait abstraction for the key-value blob store the ledger persists into.
///
/// The ledger only ever reads and writes whole string values under one key.
/// Any backend that can do that (platform key-value storage, a file per
/// key, an in-memory map) implements this trait.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait KeyValueStore: Send + Sync {
    /// Human-readable name of this backend (for logs/errors).
    fn name(&self) -> &str;

    /// Read the value stored under `key`, or `None` if nothing is stored.
    async fn get(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<(), CoreError>;
}
