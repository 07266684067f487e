//! # Identity models
//!
//! [`AuthUser`] is the identity record shared by the remote API, the session
//! store and durable storage. It serialises with camelCase keys
//! (`isEmailVerified`, `onboardingCompleted`, `householdId`, `createdAt`) so the
//! stored `auth_user` value and the API payloads use one shape.
//!
//! [`UserUpdate`] is the partial form used by `update_user`: every field is
//! optional and [`UserUpdate::apply`] shallow-merges the present ones.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The signed-in user's identity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub name: String,
    /// Avatar image reference (URL or asset key).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub is_email_verified: bool,
    pub onboarding_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub household_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AuthUser {
    /// Get display name, falling back to email if name is blank.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }

    /// Uppercased first letter of the name, `U` when there is none.
    pub fn initial(&self) -> char {
        self.name
            .trim()
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('U')
    }
}

/// Partial update of an [`AuthUser`]. Absent fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_email_verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onboarding_completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub household_id: Option<String>,
}

impl UserUpdate {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    pub fn email_verified(mut self, verified: bool) -> Self {
        self.is_email_verified = Some(verified);
        self
    }

    pub fn onboarding_completed(mut self, completed: bool) -> Self {
        self.onboarding_completed = Some(completed);
        self
    }

    pub fn household(mut self, household_id: impl Into<String>) -> Self {
        self.household_id = Some(household_id.into());
        self
    }

    /// Shallow-merge the present fields into `user`.
    pub fn apply(self, user: &mut AuthUser) {
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(avatar) = self.avatar {
            user.avatar = Some(avatar);
        }
        if let Some(verified) = self.is_email_verified {
            user.is_email_verified = verified;
        }
        if let Some(completed) = self.onboarding_completed {
            user.onboarding_completed = completed;
        }
        if let Some(household_id) = self.household_id {
            user.household_id = Some(household_id);
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_user() -> AuthUser {
    use chrono::TimeZone;

    AuthUser {
        id: "1".to_string(),
        email: "test@example.com".to_string(),
        name: "Test User".to_string(),
        avatar: None,
        is_email_verified: true,
        onboarding_completed: true,
        household_id: Some("1".to_string()),
        created_at: Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap(),
    }
}
