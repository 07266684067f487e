//! In-process development backend.
//!
//! Answers the auth endpoints after a simulated round-trip so the client can
//! be exercised without a server. Only `test@example.com` / `password` signs
//! in; signups produce a fresh, unverified user.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use crate::auth::AuthApi;
use crate::error::ApiError;
use crate::models::{AuthResponse, AuthUser, LoginRequest, SignupRequest};

pub const DEMO_EMAIL: &str = "test@example.com";
pub const DEMO_PASSWORD: &str = "password";

/// Mock backend with a configurable delay.
#[derive(Clone, Debug, Default)]
pub struct MockApi {
    latency: Duration,
    calls: Arc<AtomicUsize>,
    bearer: Arc<RwLock<Option<String>>>,
}

impl MockApi {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            ..Default::default()
        }
    }

    /// Zero latency, for tests.
    pub fn instant() -> Self {
        Self::default()
    }

    /// Number of remote calls answered so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Three unread notifications for any signed-in caller.
    pub async fn unread_count(&self) -> Result<u32, ApiError> {
        self.round_trip().await;
        let signed_in = self.bearer.read().map(|token| token.is_some()).unwrap_or(false);
        if !signed_in {
            return Err(ApiError::rejected(401, "Not authenticated"));
        }
        Ok(3)
    }

    async fn round_trip(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }
    }

    fn demo_user() -> AuthUser {
        AuthUser {
            id: "1".to_string(),
            email: DEMO_EMAIL.to_string(),
            name: "Test User".to_string(),
            avatar: None,
            is_email_verified: true,
            onboarding_completed: true,
            household_id: Some("1".to_string()),
            created_at: Utc
                .with_ymd_and_hms(2024, 1, 15, 9, 30, 0)
                .single()
                .unwrap_or_else(Utc::now),
        }
    }
}

fn issue_token() -> String {
    format!("mock-{}", Uuid::new_v4())
}

impl AuthApi for MockApi {
    fn set_bearer(&self, token: Option<String>) {
        if let Ok(mut held) = self.bearer.write() {
            *held = token;
        }
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.round_trip().await;
        if request.email == DEMO_EMAIL && request.password == DEMO_PASSWORD {
            tracing::debug!("Mock login accepted for {}", request.email);
            Ok(AuthResponse {
                user: Self::demo_user(),
                token: issue_token(),
            })
        } else {
            Err(ApiError::rejected(401, "Invalid email or password"))
        }
    }

    async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ApiError> {
        self.round_trip().await;
        if request.email.eq_ignore_ascii_case(DEMO_EMAIL) {
            return Err(
                ApiError::rejected(409, "An account with this email already exists")
                    .with_field("email"),
            );
        }
        let user = AuthUser {
            id: Uuid::new_v4().to_string(),
            email: request.email.clone(),
            name: request.name.clone(),
            avatar: None,
            is_email_verified: false,
            onboarding_completed: false,
            household_id: None,
            created_at: Utc::now(),
        };
        Ok(AuthResponse {
            user,
            token: issue_token(),
        })
    }

    async fn logout(&self, _token: String) -> Result<(), ApiError> {
        self.round_trip().await;
        Ok(())
    }

    async fn reset_password(&self, _email: &str) -> Result<(), ApiError> {
        self.round_trip().await;
        Ok(())
    }

    async fn verify_email(&self, token: &str) -> Result<(), ApiError> {
        self.round_trip().await;
        if token.trim().is_empty() || token == "expired" {
            return Err(ApiError::rejected(400, "Invalid verification token").with_field("token"));
        }
        Ok(())
    }

    async fn resend_verification(&self, _email: &str) -> Result<(), ApiError> {
        self.round_trip().await;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

#[cfg(target_arch = "wasm32")]
async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}
