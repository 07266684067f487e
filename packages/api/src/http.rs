//! # HTTP client for the Roomly REST API
//!
//! [`HttpClient`] wraps a [`reqwest::Client`] with the one request helper every
//! endpoint goes through ([`HttpClient::request`]):
//!
//! - joins the configured base URL and the endpoint path,
//! - sends `Content-Type: application/json`,
//! - attaches `Authorization: Bearer <token>` while a credential is held,
//! - turns any non-2xx response into an [`ApiError`] carrying the server's
//!   `message` (default `"An error occurred"`), the status and the optional
//!   `field`,
//! - turns transport and decoding failures into an [`ApiError`] with status `0`.
//!
//! Nothing here panics or leaks a `reqwest::Error` to callers.

use std::sync::{Arc, RwLock};

use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

use crate::auth::AuthApi;
use crate::error::ApiError;
use crate::models::{
    AuthResponse, LoginRequest, ResetPasswordRequest, SignupRequest, UnreadCount,
    VerifyEmailRequest,
};

const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

/// Error payload the server sends with non-2xx responses.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    field: Option<String>,
}

/// Client for the Roomly REST API.
#[derive(Clone, Debug)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
    bearer: Arc<RwLock<Option<String>>>,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            bearer: Arc::new(RwLock::new(None)),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn bearer(&self) -> Option<String> {
        self.bearer.read().ok().and_then(|token| token.clone())
    }

    /// Send a request through the uniform helper, using the held credential.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request_as(method, path, body, self.bearer()).await
    }

    async fn request_as<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        bearer: Option<String>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = endpoint_url(&self.base_url, path);
        tracing::debug!("{method} {url}");

        let mut builder = self
            .http
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;

        if !status.is_success() {
            return Err(error_from_body(status.as_u16(), &text));
        }
        decode_body(&text)
    }

    /// `GET` a JSON resource, e.g. `/tasks` or `/households/me`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::GET, path, None::<&()>).await
    }

    /// Unread notification count for the navigation badge.
    pub async fn unread_count(&self) -> Result<u32, ApiError> {
        let body: UnreadCount = self.get("/notifications/unread-count").await?;
        Ok(body.count)
    }

    async fn post_ack<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let _: IgnoredAny = self.request(Method::POST, path, Some(body)).await?;
        Ok(())
    }
}

impl AuthApi for HttpClient {
    fn set_bearer(&self, token: Option<String>) {
        if let Ok(mut held) = self.bearer.write() {
            *held = token;
        }
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.request(Method::POST, "/auth/login", Some(request)).await
    }

    async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, ApiError> {
        self.request(Method::POST, "/auth/signup", Some(request)).await
    }

    async fn logout(&self, token: String) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .request_as(Method::POST, "/auth/logout", None::<&()>, Some(token))
            .await?;
        Ok(())
    }

    async fn reset_password(&self, email: &str) -> Result<(), ApiError> {
        let body = ResetPasswordRequest {
            email: email.to_string(),
        };
        self.post_ack("/auth/forgot-password", &body).await
    }

    async fn verify_email(&self, token: &str) -> Result<(), ApiError> {
        let body = VerifyEmailRequest {
            token: token.to_string(),
        };
        self.post_ack("/auth/verify-email", &body).await
    }

    async fn resend_verification(&self, email: &str) -> Result<(), ApiError> {
        let body = ResetPasswordRequest {
            email: email.to_string(),
        };
        self.post_ack("/auth/resend-verification", &body).await
    }
}

fn endpoint_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn error_from_body(status: u16, text: &str) -> ApiError {
    let body: ErrorBody = serde_json::from_str(text).unwrap_or_default();
    ApiError {
        message: body
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string()),
        status,
        field: body.field,
    }
}

fn decode_body<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    // Acknowledgement endpoints may answer 204 with no body.
    let text = if text.trim().is_empty() { "null" } else { text };
    serde_json::from_str(text).map_err(|e| ApiError::network(format!("Invalid response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_joins_slashes() {
        assert_eq!(endpoint_url("http://localhost:8000", "/auth/login"), "http://localhost:8000/auth/login");
        assert_eq!(endpoint_url("http://localhost:8000/", "/tasks"), "http://localhost:8000/tasks");
        assert_eq!(endpoint_url("https://api.test/v1", "event/events"), "https://api.test/v1/event/events");
    }

    #[test]
    fn test_error_body_with_field() {
        let err = error_from_body(422, r#"{"message":"Email is taken","field":"email"}"#);
        assert_eq!(err.status, 422);
        assert_eq!(err.message, "Email is taken");
        assert_eq!(err.field.as_deref(), Some("email"));
    }

    #[test]
    fn test_error_body_fallback_message() {
        let err = error_from_body(500, "<html>Internal Server Error</html>");
        assert_eq!(err.message, "An error occurred");
        assert_eq!(err.status, 500);
        assert!(err.field.is_none());

        let err = error_from_body(401, r#"{"message":""}"#);
        assert_eq!(err.message, "An error occurred");
    }

    #[test]
    fn test_decode_empty_body_as_ack() {
        let _: IgnoredAny = decode_body("").unwrap();
        let _: IgnoredAny = decode_body(r#"{"ok":true}"#).unwrap();
        let count: UnreadCount = decode_body(r#"{"count":4}"#).unwrap();
        assert_eq!(count.count, 4);
    }

    #[test]
    fn test_decode_garbage_is_network_error() {
        let err = decode_body::<UnreadCount>("not json").unwrap_err();
        assert!(err.is_network());
        assert!(err.message.starts_with("Invalid response"));
    }

    #[test]
    fn test_bearer_is_shared_between_clones() {
        let client = HttpClient::new("http://localhost:8000");
        let clone = client.clone();
        client.set_bearer(Some("abc".to_string()));
        assert_eq!(clone.bearer().as_deref(), Some("abc"));
        client.set_bearer(None);
        assert!(clone.bearer().is_none());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let client = HttpClient::new("http://127.0.0.1:9");
        let err = client
            .login(&LoginRequest {
                email: "test@example.com".to_string(),
                password: "password".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.status, 0);
    }
}
