use crate::errors::CoreError;
use crate::models::ledger::LedgerState;

use super::format;
use super::traits::KeyValueStore;

/// High-level storage operations: load/save the whole ledger under one key.
pub struct StorageManager;

impl StorageManager {
    /// Read and decode the ledger stored under `key`.
    ///
    /// Flow: store.get(key) → JSON → LedgerSnapshot → LedgerState.
    /// Returns `Ok(None)` when nothing has been stored yet.
    pub async fn load(store: &dyn KeyValueStore, key: &str) -> Result<Option<LedgerState>, CoreError> {
        let Some(data) = store.get(key).await? else {
            return Ok(None);
        };
        let state = format::decode(&data)?;
        Ok(Some(state))
    }

    /// Encode the ledger and write it under `key`, replacing the previous snapshot.
    pub async fn save(
        store: &dyn KeyValueStore,
        key: &str,
        state: &LedgerState,
        pretty: bool,
    ) -> Result<(), CoreError> {
        let data = format::encode(state, pretty)?;
        store.set(key, data).await
    }
}
