//! Access control for protected views.
//!
//! [`evaluate`] is a pure decision over a [`Session`]; the caller performs any
//! navigation it asks for. Ordering is fixed: a loading session never
//! redirects, then authentication, then email verification, then onboarding.
//!
//! Only rehydration holds back a view the session already satisfies. A view
//! that is allowed stays mounted while it runs its own operations.

use std::fmt;

use crate::auth::Session;

/// Requirements a protected view places on the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GuardConfig {
    pub require_email_verification: bool,
    pub require_onboarding: bool,
}

impl GuardConfig {
    /// Signed-in users only.
    pub fn authenticated() -> Self {
        Self::default()
    }

    /// Signed in, verified and onboarded.
    pub fn complete() -> Self {
        Self {
            require_email_verification: true,
            require_onboarding: true,
        }
    }

    pub fn verified(mut self) -> Self {
        self.require_email_verification = true;
        self
    }

    pub fn onboarded(mut self) -> Self {
        self.require_onboarding = true;
        self
    }
}

/// The three special destinations a guard can send the user to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GuardTarget {
    Login,
    VerifyEmail,
    Onboarding,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect {
    pub target: GuardTarget,
    /// Location to return to after signing in. Only set for [`GuardTarget::Login`].
    pub resume: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Session still settling; show a neutral indicator.
    Loading,
    Allow,
    Redirect(Redirect),
}

pub fn evaluate(session: &Session, config: GuardConfig, requested_path: &str) -> Decision {
    if session.restoring {
        return Decision::Loading;
    }

    match unmet_requirement(session, config, requested_path) {
        None => Decision::Allow,
        // An operation in flight may still change the user.
        Some(_) if session.is_loading => Decision::Loading,
        Some(redirect) => Decision::Redirect(redirect),
    }
}

fn unmet_requirement(session: &Session, config: GuardConfig, requested_path: &str) -> Option<Redirect> {
    let Some(user) = session.user.as_ref() else {
        return Some(Redirect {
            target: GuardTarget::Login,
            resume: Some(requested_path.to_string()),
        });
    };

    if config.require_email_verification && !user.is_email_verified {
        return Some(Redirect {
            target: GuardTarget::VerifyEmail,
            resume: None,
        });
    }

    if config.require_onboarding && !user.onboarding_completed {
        return Some(Redirect {
            target: GuardTarget::Onboarding,
            resume: None,
        });
    }

    None
}

/// The query of the login location: `from=<location>`.
///
/// Everything after `from=` is the location, so a resume target keeps its own
/// query string intact, `&` included.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResumeQuery {
    pub from: Option<String>,
}

impl ResumeQuery {
    /// Query for a login redirect. The home page needs no resume target.
    pub fn for_redirect(redirect: &Redirect) -> Self {
        Self {
            from: redirect
                .resume
                .clone()
                .filter(|from| !from.is_empty() && from != "/"),
        }
    }

    /// Where to go once signed in.
    pub fn target(&self) -> String {
        resume_target(self.from.as_deref())
    }
}

impl From<&str> for ResumeQuery {
    fn from(query: &str) -> Self {
        let from = query
            .strip_prefix("from=")
            .or_else(|| query.split_once("&from=").map(|(_, from)| from));
        Self {
            from: from.filter(|from| !from.is_empty()).map(str::to_string),
        }
    }
}

impl fmt::Display for ResumeQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.from {
            Some(from) => write!(f, "from={from}"),
            None => Ok(()),
        }
    }
}

/// Where to go after signing in. Anything but a same-origin path becomes `/`.
pub fn resume_target(from: Option<&str>) -> String {
    match from.map(str::trim) {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path.to_string()
        }
        _ => "/".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Operation;
    use api::AuthUser;
    use chrono::Utc;

    fn user(verified: bool, onboarded: bool) -> AuthUser {
        AuthUser {
            id: "7".to_string(),
            email: "sam@example.com".to_string(),
            name: "Sam".to_string(),
            avatar: None,
            is_email_verified: verified,
            onboarding_completed: onboarded,
            household_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_loading_never_redirects() {
        let session = Session::default();
        assert_eq!(evaluate(&session, GuardConfig::complete(), "/tasks"), Decision::Loading);

        // A user whose requirements are unmet waits for the pending operation.
        let mut session = Session::signed_in(user(false, false));
        session.is_loading = true;
        assert_eq!(evaluate(&session, GuardConfig::complete(), "/tasks"), Decision::Loading);

        // So does a sign-in that has not landed yet.
        let mut session = Session::anonymous();
        session.is_loading = true;
        assert_eq!(evaluate(&session, GuardConfig::default(), "/tasks"), Decision::Loading);
    }

    #[test]
    fn test_allowed_view_stays_mounted_during_operation() {
        let mut session = Session::signed_in(user(true, true));
        session.is_loading = true;
        session.activity = Some(Operation::LoggingOut);
        assert_eq!(evaluate(&session, GuardConfig::complete(), "/settings"), Decision::Allow);
    }

    #[test]
    fn test_anonymous_redirects_to_login_with_resume() {
        let decision = evaluate(&Session::anonymous(), GuardConfig::default(), "/expenses?month=3");
        assert_eq!(
            decision,
            Decision::Redirect(Redirect {
                target: GuardTarget::Login,
                resume: Some("/expenses?month=3".to_string()),
            })
        );
    }

    #[test]
    fn test_unverified_user_goes_to_verification() {
        let session = Session::signed_in(user(false, false));
        let decision = evaluate(&session, GuardConfig::complete(), "/tasks");
        assert_eq!(
            decision,
            Decision::Redirect(Redirect {
                target: GuardTarget::VerifyEmail,
                resume: None,
            })
        );
    }

    #[test]
    fn test_onboarding_checked_after_verification() {
        let session = Session::signed_in(user(true, false));
        let decision = evaluate(&session, GuardConfig::complete(), "/");
        assert!(matches!(
            decision,
            Decision::Redirect(Redirect {
                target: GuardTarget::Onboarding,
                ..
            })
        ));

        assert_eq!(evaluate(&session, GuardConfig::authenticated().verified(), "/"), Decision::Allow);
    }

    #[test]
    fn test_requirements_off_allow_incomplete_user() {
        let session = Session::signed_in(user(false, false));
        assert_eq!(evaluate(&session, GuardConfig::default(), "/settings"), Decision::Allow);
        assert_eq!(evaluate(&session, GuardConfig::default().onboarded().verified(), "/settings"), evaluate(&session, GuardConfig::complete(), "/settings"));
    }

    #[test]
    fn test_resume_query_keeps_nested_query() {
        let redirect = Redirect {
            target: GuardTarget::Login,
            resume: Some("/expenses?month=3&year=2024".to_string()),
        };
        let query = ResumeQuery::for_redirect(&redirect);
        assert_eq!(query.to_string(), "from=/expenses?month=3&year=2024");

        let parsed = ResumeQuery::from(query.to_string().as_str());
        assert_eq!(parsed, query);
        assert_eq!(parsed.target(), "/expenses?month=3&year=2024");
    }

    #[test]
    fn test_resume_query_edges() {
        let home = Redirect {
            target: GuardTarget::Login,
            resume: Some("/".to_string()),
        };
        assert_eq!(ResumeQuery::for_redirect(&home), ResumeQuery::default());
        assert_eq!(ResumeQuery::default().to_string(), "");
        assert_eq!(ResumeQuery::default().target(), "/");

        assert_eq!(ResumeQuery::from("").from, None);
        assert_eq!(ResumeQuery::from("from=").from, None);
        assert_eq!(ResumeQuery::from("utm=x&from=/tasks").from.as_deref(), Some("/tasks"));
        assert_eq!(ResumeQuery::from("from=https://evil.test").target(), "/");
    }

    #[test]
    fn test_resume_target_rejects_offsite() {
        assert_eq!(resume_target(Some("/tasks")), "/tasks");
        assert_eq!(resume_target(Some("/expenses?month=3")), "/expenses?month=3");
        assert_eq!(resume_target(None), "/");
        assert_eq!(resume_target(Some("")), "/");
        assert_eq!(resume_target(Some("https://evil.test")), "/");
        assert_eq!(resume_target(Some("//evil.test/path")), "/");
        assert_eq!(resume_target(Some("/\\evil.test")), "/");
    }
}
