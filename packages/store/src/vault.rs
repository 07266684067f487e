//! # Session record persistence
//!
//! The signed-in identity is persisted under two keys, `auth_user` (the JSON
//! [`AuthUser`]) and `auth_token` (the opaque bearer credential). The two keys
//! only make sense together, so [`SessionVault`] treats them as one
//! [`SessionRecord`] with a single load / save / clear API:
//!
//! | Stored keys | [`SessionVault::load`] result | Side effect |
//! |-------------|-------------------------------|-------------|
//! | both, user parses | `Some(record)` | none |
//! | neither | `None` | none |
//! | only one of them | `None` | both keys cleared |
//! | user fails to parse | `None` | both keys cleared |
//! | storage read error | `None` | both keys cleared (best effort) |
//!
//! A torn or corrupted record is never an error for the caller: it is
//! indistinguishable from "no session" once `load` returns.

use crate::kv::{KeyValueStore, StorageError};
use crate::models::AuthUser;

/// Storage key for the serialised identity record.
pub const USER_KEY: &str = "auth_user";
/// Storage key for the bearer credential.
pub const TOKEN_KEY: &str = "auth_token";

/// A persisted identity plus its bearer credential.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionRecord {
    pub user: AuthUser,
    pub token: String,
}

/// Atomic view over the `auth_user` / `auth_token` pair.
#[derive(Clone, Debug)]
pub struct SessionVault<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SessionVault<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read the stored record. Torn or unparsable records are cleared.
    pub fn load(&self) -> Option<SessionRecord> {
        let user = self.store.get(USER_KEY);
        let token = self.store.get(TOKEN_KEY);

        let (user, token) = match (user, token) {
            (Ok(None), Ok(None)) => return None,
            (Ok(Some(user)), Ok(Some(token))) if !token.is_empty() => (user, token),
            (Ok(user), Ok(token)) => {
                tracing::warn!(
                    has_user = user.is_some(),
                    has_token = token.is_some(),
                    "Discarding incomplete session record"
                );
                self.discard();
                return None;
            }
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!("Failed to read session record: {e}");
                self.discard();
                return None;
            }
        };

        match serde_json::from_str::<AuthUser>(&user) {
            Ok(user) => Some(SessionRecord { user, token }),
            Err(e) => {
                tracing::warn!("Failed to parse stored user: {e}");
                self.discard();
                None
            }
        }
    }

    /// Persist `user` and `token` as one record.
    ///
    /// The user is serialised before anything is written, and a failed token
    /// write removes the user again, so a failure never leaves a half record.
    pub fn save(&self, user: &AuthUser, token: &str) -> Result<(), StorageError> {
        let json = serde_json::to_string(user)?;
        self.store.set(USER_KEY, &json)?;
        if let Err(e) = self.store.set(TOKEN_KEY, token) {
            let _ = self.store.remove(USER_KEY);
            return Err(e);
        }
        Ok(())
    }

    /// Remove both keys. Both removals are attempted even if the first fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        let user = self.store.remove(USER_KEY);
        let token = self.store.remove(TOKEN_KEY);
        user.and(token)
    }

    fn discard(&self) {
        if let Err(e) = self.clear() {
            tracing::warn!("Failed to clear session record: {e}");
        }
    }
}
