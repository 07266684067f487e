//! Platform-specific storage and configuration.
//!
//! - **Web** (WASM + `web` feature): `window.localStorage` via [`store::LocalStore`],
//!   configuration from compile-time environment variables
//! - **Desktop / Mobile** (native): files under `<data_dir>/roomly/` via
//!   [`store::FileStore`], configuration from `<config_dir>/roomly/roomly.toml`

use store::AppConfig;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStore = store::LocalStore;

#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformStore = store::FileStore;

/// Durable key-value storage for the current platform.
pub fn make_storage() -> PlatformStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStore::new()
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("roomly");
        store::FileStore::new(base)
    }
}

/// Load the client configuration, falling back to defaults.
pub fn load_config() -> AppConfig {
    #[cfg(target_arch = "wasm32")]
    {
        config_from_env(option_env!("ROOMLY_API_URL"), option_env!("ROOMLY_MOCK_LATENCY_MS"))
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        match dirs::config_dir() {
            Some(dir) => load_config_from(&dir.join("roomly").join(AppConfig::filename())),
            None => AppConfig::default(),
        }
    }
}

/// Web builds talk to a real server only when `ROOMLY_API_URL` was set at build time.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn config_from_env(api_url: Option<&str>, mock_latency_ms: Option<&str>) -> AppConfig {
    let config = AppConfig::default();
    match api_url.map(str::trim).filter(|url| !url.is_empty()) {
        Some(url) => config.with_api_url(url),
        None => {
            let latency = mock_latency_ms
                .and_then(|ms| ms.parse().ok())
                .unwrap_or(config.api.mock_latency_ms);
            config.with_mock(latency)
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config_from(path: &std::path::Path) -> AppConfig {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return AppConfig::default(),
        Err(e) => {
            tracing::warn!("Failed to read {}: {e}", path.display());
            return AppConfig::default();
        }
    };
    AppConfig::from_toml(&text).unwrap_or_else(|e| {
        tracing::warn!("Ignoring invalid {}: {e}", path.display());
        AppConfig::default()
    })
}
