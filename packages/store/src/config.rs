//! # Client configuration: `roomly.toml`
//!
//! Defines the TOML configuration read by native builds from the platform
//! config directory (filename: [`AppConfig::filename`] = `"roomly.toml"`).
//! Web builds start from [`AppConfig::default`] and apply compile-time
//! overrides instead, since the browser has no config directory.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8000"
//! mock = true               # serve auth from the in-process mock backend
//! mock_latency_ms = 1000    # simulated round-trip for the mock backend
//!
//! [layout]
//! mobile_breakpoint_px = 768   # viewports narrower than this are "mobile"
//! ```
//!
//! All structs derive or implement `Default`, so a missing or empty file is
//! equivalent to the default configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `roomly.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}

/// Remote API settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Use the in-process mock backend instead of HTTP.
    #[serde(default = "default_mock")]
    pub mock: bool,
    #[serde(default = "default_mock_latency")]
    pub mock_latency_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_mock() -> bool {
    true
}

fn default_mock_latency() -> u64 {
    1000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            mock: default_mock(),
            mock_latency_ms: default_mock_latency(),
        }
    }
}

/// Responsive layout settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_breakpoint")]
    pub mobile_breakpoint_px: u32,
}

fn default_breakpoint() -> u32 {
    768
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint_px: default_breakpoint(),
        }
    }
}

impl AppConfig {
    /// Builder method to point the client at a real API server.
    pub fn with_api_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self.api.mock = false;
        self
    }

    /// Builder method to switch to the mock backend.
    pub fn with_mock(mut self, latency_ms: u64) -> Self {
        self.api.mock = true;
        self.api.mock_latency_ms = latency_ms;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "roomly.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.api.mock);
        assert_eq!(config.api.mock_latency_ms, 1000);
        assert_eq!(config.layout.mobile_breakpoint_px, 768);
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [api]
            base_url = "https://api.roomly.app"
            mock = false
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://api.roomly.app");
        assert!(!config.api.mock);
        assert_eq!(config.api.mock_latency_ms, 1000);
        assert_eq!(config.layout, LayoutConfig::default());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = AppConfig::default().with_api_url("https://example.test");
        let text = config.to_toml().unwrap();
        assert_eq!(AppConfig::from_toml(&text).unwrap(), config);
    }
}
