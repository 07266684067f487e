//! Data models for the API.

mod auth;

pub use auth::{AuthResponse, LoginRequest, ResetPasswordRequest, SignupRequest, UnreadCount, VerifyEmailRequest};
pub use store::{AuthUser, UserUpdate};
