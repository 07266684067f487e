//! # Filesystem-backed key-value store
//!
//! [`FileStore`] is the [`KeyValueStore`] used on native builds. Each key is a
//! single file under the base directory:
//!
//! ```text
//! <base_dir>/
//! ├── auth_user
//! ├── auth_token
//! └── sidebar-collapsed
//! ```
//!
//! Writes go to a sibling temporary file that is then renamed over the target,
//! so a crash mid-write leaves either the old value or the new one.
//!
//! Use [`dirs::data_dir()`] to obtain a platform-appropriate base:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/roomly/` |
//! | Linux | `~/.local/share/roomly/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\roomly\` |

use std::io::ErrorKind;
use std::path::PathBuf;

use crate::kv::{KeyValueStore, StorageError};

/// Filesystem-backed KeyValueStore for native persistence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn entry_name(key: &str) -> String {
        key.chars()
            .map(|c| match c {
                'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' => c,
                _ => '_',
            })
            .collect()
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.base.join(Self::entry_name(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.entry_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.base)?;
        let path = self.entry_path(key);
        let tmp = self.base.join(format!("{}.tmp", Self::entry_name(key)));
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.entry_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("roomly"));

        assert!(store.get("auth_user").unwrap().is_none());
        store.set("auth_user", r#"{"id":"1"}"#).unwrap();

        // Re-open from same directory
        let reopened = FileStore::new(dir.path().join("roomly"));
        assert_eq!(reopened.get("auth_user").unwrap().as_deref(), Some(r#"{"id":"1"}"#));

        reopened.remove("auth_user").unwrap();
        assert!(store.get("auth_user").unwrap().is_none());
        reopened.remove("auth_user").unwrap();
    }

    #[test]
    fn test_keys_cannot_escape_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf());

        store.set("../outside", "x").unwrap();
        assert!(dir.path().join(".._outside").exists());
        assert_eq!(store.get("../outside").unwrap().as_deref(), Some("x"));
    }
}
