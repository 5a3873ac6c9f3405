//! Key/value persistence for cart and favorites snapshots.
//!
//! The [`StorageAdapter`] trait is the browser-local-storage analog: a flat
//! string-keyed store. Stores write through it on every mutation and read it
//! back once at startup (rehydration). Corrupt or absent data is treated as
//! empty state, never as a fatal error.
//!
//! Two implementations are provided:
//!
//! - [`FileStorage`] - one JSON file per key under a state directory
//! - [`MemoryStorage`] - in-memory map for tests and ephemeral runs

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur while persisting a snapshot.
///
/// These are logged and swallowed at the store layer - a failed write never
/// corrupts or blocks in-memory state.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot serialization failed.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A flat string-keyed persistence target.
///
/// Implementations must be safe to call on every mutation without
/// perceptible latency; writes are synchronous from the caller's view.
pub trait StorageAdapter: Send + Sync {
    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written.
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Read the value stored under `key`, or `None` if absent.
    fn load(&self, key: &str) -> Option<String>;
}

/// Serialize `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns an error if serialization or the underlying write fails.
pub fn save_json<T: Serialize>(
    storage: &dyn StorageAdapter,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value)?;
    storage.save(key, &json)
}

/// Load and deserialize the JSON value stored under `key`.
///
/// Corrupt data is logged and treated as absent - rehydration must never
/// fail hard on a bad snapshot.
pub fn load_json<T: DeserializeOwned>(storage: &dyn StorageAdapter, key: &str) -> Option<T> {
    let json = storage.load(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding corrupt persisted snapshot");
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        count: u32,
    }

    #[test]
    fn test_json_roundtrip() {
        let storage = MemoryStorage::default();
        save_json(&storage, "sample", &Sample { count: 3 }).unwrap();
        let loaded: Sample = load_json(&storage, "sample").unwrap();
        assert_eq!(loaded, Sample { count: 3 });
    }

    #[test]
    fn test_load_json_absent_key() {
        let storage = MemoryStorage::default();
        assert!(load_json::<Sample>(&storage, "missing").is_none());
    }

    #[test]
    fn test_load_json_corrupt_value_treated_as_absent() {
        let storage = MemoryStorage::default();
        storage.save("sample", "{not json").unwrap();
        assert!(load_json::<Sample>(&storage, "sample").is_none());
    }
}
