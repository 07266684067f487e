//! Request and response bodies for the `/auth` endpoints.

use serde::{Deserialize, Serialize};
use store::AuthUser;

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/signup`. The confirmation field never leaves the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/forgot-password` and `POST /auth/resend-verification`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResetPasswordRequest {
    pub email: String,
}

/// Body of `POST /auth/verify-email`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerifyEmailRequest {
    pub token: String,
}

/// Successful login or signup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    pub user: AuthUser,
    pub token: String,
}

/// Response of `GET /notifications/unread-count`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnreadCount {
    pub count: u32,
}
