pub mod config;
pub mod kv;
pub mod models;
pub mod prefs;
pub mod vault;

mod file_store;
pub use file_store::FileStore;

mod memory;
pub use memory::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStore;

pub use config::AppConfig;
pub use kv::{KeyValueStore, StorageError};
pub use models::{AuthUser, UserUpdate};
pub use prefs::SidebarPrefs;
pub use vault::{SessionRecord, SessionVault};
