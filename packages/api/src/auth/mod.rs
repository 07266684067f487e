//! The remote authentication contract consumed by the session store.

use std::future::Future;

use crate::error::ApiError;
use crate::models::{AuthResponse, LoginRequest, SignupRequest};

/// Async interface to the authentication endpoints.
///
/// Implemented by [`crate::HttpClient`] (real server), [`crate::MockApi`]
/// (development) and [`crate::Backend`] (runtime choice between the two).
pub trait AuthApi {
    /// Credential attached as `Authorization: Bearer` to later requests.
    fn set_bearer(&self, token: Option<String>);

    fn login(
        &self,
        request: &LoginRequest,
    ) -> impl Future<Output = Result<AuthResponse, ApiError>>;

    fn signup(
        &self,
        request: &SignupRequest,
    ) -> impl Future<Output = Result<AuthResponse, ApiError>>;

    /// Invalidate `token` server-side. Callers treat this as best effort.
    fn logout(&self, token: String) -> impl Future<Output = Result<(), ApiError>>;

    fn reset_password(&self, email: &str) -> impl Future<Output = Result<(), ApiError>>;

    fn verify_email(&self, token: &str) -> impl Future<Output = Result<(), ApiError>>;

    fn resend_verification(&self, email: &str) -> impl Future<Output = Result<(), ApiError>>;
}
