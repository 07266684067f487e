//! # API crate: remote collaborators of the Roomly client
//!
//! Everything the client needs from a server lives behind this crate, so the
//! session store and the views never touch HTTP directly.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | The [`AuthApi`] trait: login, signup, logout, password reset, email verification |
//! | [`error`] | [`ApiError`] (transport/HTTP level) and [`AuthError`] (what views display) |
//! | [`http`] | [`HttpClient`]: uniform request helper with bearer credential over `reqwest` |
//! | [`mock`] | [`MockApi`]: in-process backend with simulated latency for development |
//! | [`models`] | Request and response bodies, plus the shared [`AuthUser`] identity |
//!
//! [`Backend`] picks one of the two implementations from [`store::config::ApiConfig`]
//! at startup and dispatches to it.

use std::time::Duration;

use store::config::ApiConfig;

pub mod auth;
pub mod error;
pub mod http;
pub mod mock;
pub mod models;

pub use auth::AuthApi;
pub use error::{ApiError, AuthError, Field};
pub use http::HttpClient;
pub use mock::MockApi;
pub use models::{AuthResponse, AuthUser, LoginRequest, SignupRequest, UserUpdate};

/// The configured remote backend.
#[derive(Clone, Debug)]
pub enum Backend {
    Http(HttpClient),
    Mock(MockApi),
}

impl Backend {
    pub fn from_config(config: &ApiConfig) -> Self {
        if config.mock {
            tracing::info!("Using mock backend ({} ms latency)", config.mock_latency_ms);
            Backend::Mock(MockApi::new(Duration::from_millis(config.mock_latency_ms)))
        } else {
            tracing::info!("Using API server at {}", config.base_url);
            Backend::Http(HttpClient::new(config.base_url.clone()))
        }
    }

    /// Unread notification count for the navigation badge.
    pub async fn unread_count(&self) -> Result<u32, ApiError> {
        match self {
            Backend::Http(client) => client.unread_count().await,
            Backend::Mock(mock) => mock.unread_count().await,
        }
    }
}

impl AuthApi for Backend {
    fn set_bearer(&self, token: Option<String>) {
        match self {
            Backend::Http(client) => client.set_bearer(token),
            Backend::Mock(mock) => mock.set_bearer(token),
        }
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        match self {
            Backend::Http(client) => client.login(request).await,
            Backend::Mock(mock) => mock.login(request).await,
        }
    }

    async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ApiError> {
        match self {
            Backend::Http(client) => client.signup(request).await,
            Backend::Mock(mock) => mock.signup(request).await,
        }
    }

    async fn logout(&self, token: String) -> Result<(), ApiError> {
        match self {
            Backend::Http(client) => client.logout(token).await,
            Backend::Mock(mock) => mock.logout(token).await,
        }
    }

    async fn reset_password(&self, email: &str) -> Result<(), ApiError> {
        match self {
            Backend::Http(client) => client.reset_password(email).await,
            Backend::Mock(mock) => mock.reset_password(email).await,
        }
    }

    async fn verify_email(&self, token: &str) -> Result<(), ApiError> {
        match self {
            Backend::Http(client) => client.verify_email(token).await,
            Backend::Mock(mock) => mock.verify_email(token).await,
        }
    }

    async fn resend_verification(&self, email: &str) -> Result<(), ApiError> {
        match self {
            Backend::Http(client) => client.resend_verification(email).await,
            Backend::Mock(mock) => mock.resend_verification(email).await,
        }
    }
}
