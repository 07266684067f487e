//! # Error values crossing the API boundary
//!
//! Two shapes, one per layer:
//!
//! - [`ApiError`] is what the request helper produces: a message, the HTTP
//!   status (`0` for network or decoding failures) and the optional field the
//!   server blamed.
//! - [`AuthError`] is what session operations hand to views: a message and an
//!   optional typed [`Field`]. Views show field errors inline and general ones
//!   as a toast.
//!
//! Every `ApiError` converts into an `AuthError`, so session code can use `?`
//! on remote calls and still only ever return the uniform shape.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Form field an error is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
    Token,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
            Field::Token => "token",
        }
    }

    /// Map a server-supplied field name; unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Field::Name),
            "email" => Some(Field::Email),
            "password" => Some(Field::Password),
            "confirmPassword" | "confirm_password" => Some(Field::ConfirmPassword),
            "token" => Some(Field::Token),
            _ => None,
        }
    }
}

/// Uniform failure returned by every session operation.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct AuthError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<Field>,
}

impl AuthError {
    /// An error not tied to a particular input.
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
        }
    }

    /// An error shown next to `field`.
    pub fn on(field: Field, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: Some(field),
        }
    }
}

/// Failure from the remote API or the transport underneath it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message} (status {status})")]
pub struct ApiError {
    pub message: String,
    /// HTTP status, or `0` when no usable response arrived.
    pub status: u16,
    pub field: Option<String>,
}

impl ApiError {
    /// A transport or decoding failure.
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: 0,
            field: None,
        }
    }

    /// A rejection carrying an HTTP status.
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status,
            field: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn is_network(&self) -> bool {
        self.status == 0
    }
}

impl From<ApiError> for AuthError {
    fn from(e: ApiError) -> Self {
        AuthError {
            field: e.field.as_deref().and_then(Field::parse),
            message: e.message,
        }
    }
}
