//! # Durable key-value storage
//!
//! Everything Roomly keeps across restarts (the session record and the sidebar
//! preference) goes through the [`KeyValueStore`] trait. Values are whole
//! strings: callers serialise a complete record and write it in one call, so a
//! reader never observes half of a value.
//!
//! | Backend | Platform | Module |
//! |---------|----------|--------|
//! | [`crate::MemoryStore`] | tests, fallback | `memory` |
//! | [`crate::FileStore`] | native builds | `file_store` |
//! | `LocalStore` | wasm + `web` feature | `local` |
//!
//! Storage access is synchronous (the browser's `localStorage` is) but every
//! operation may fail, which is why the methods return [`StorageError`].

use thiserror::Error;

/// Failure reading or writing durable storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encoding: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Synchronous string key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
