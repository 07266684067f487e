//! Which chrome surrounds the current page.

use crate::auth::Session;
use crate::nav::{badge_text, NavState};

/// The composed application shell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shell {
    /// Session still settling: full-screen indicator, no chrome.
    Splash,
    /// Signed out: public header, no navigation.
    Public,
    Desktop {
        header: HeaderModel,
        sidebar: SidebarMode,
    },
    Mobile {
        header: HeaderModel,
        drawer_open: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SidebarMode {
    Expanded,
    Collapsed,
}

/// What the protected header shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderModel {
    pub display_name: String,
    pub initial: char,
    pub avatar: Option<String>,
    pub has_household: bool,
    pub badge: Option<String>,
    /// Hamburger button toggling the drawer. Mobile only.
    pub show_menu_button: bool,
}

impl Shell {
    pub fn has_navigation(&self) -> bool {
        matches!(self, Shell::Desktop { .. } | Shell::Mobile { .. })
    }

    /// Bottom tab bar is part of the mobile shell only.
    pub fn has_bottom_nav(&self) -> bool {
        matches!(self, Shell::Mobile { .. })
    }

    pub fn header(&self) -> Option<&HeaderModel> {
        match self {
            Shell::Desktop { header, .. } | Shell::Mobile { header, .. } => Some(header),
            Shell::Splash | Shell::Public => None,
        }
    }
}

/// Pick the chrome for the current state.
///
/// Only rehydration shows the splash. Operations started from a view leave the
/// shell in place so that view stays mounted until its operation settles.
pub fn compose(session: &Session, nav: &NavState) -> Shell {
    if session.restoring {
        return Shell::Splash;
    }
    let Some(user) = session.user.as_ref() else {
        return Shell::Public;
    };

    let header = HeaderModel {
        display_name: user.display_name().to_string(),
        initial: user.initial(),
        avatar: user.avatar.clone(),
        has_household: user.household_id.is_some(),
        badge: badge_text(nav.notification_count),
        show_menu_button: nav.is_mobile(),
    };

    if nav.is_mobile() {
        Shell::Mobile {
            header,
            drawer_open: nav.is_mobile_open,
        }
    } else {
        Shell::Desktop {
            header,
            sidebar: if nav.is_collapsed {
                SidebarMode::Collapsed
            } else {
                SidebarMode::Expanded
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Operation;
    use crate::nav::Viewport;
    use api::AuthUser;
    use chrono::Utc;

    fn nav(viewport: Viewport) -> NavState {
        NavState {
            viewport,
            is_collapsed: false,
            is_mobile_open: false,
            active_tab: "/".to_string(),
            notification_count: 0,
        }
    }

    fn member() -> AuthUser {
        AuthUser {
            id: "1".to_string(),
            email: "test@example.com".to_string(),
            name: "test User".to_string(),
            avatar: None,
            is_email_verified: true,
            onboarding_completed: true,
            household_id: Some("1".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_rehydration_shows_splash() {
        assert_eq!(compose(&Session::default(), &nav(Viewport::Desktop)), Shell::Splash);
    }

    #[test]
    fn test_operation_in_flight_keeps_chrome() {
        let mut signing_in = Session::anonymous();
        signing_in.is_loading = true;
        signing_in.activity = Some(Operation::LoggingIn);
        assert_eq!(compose(&signing_in, &nav(Viewport::Desktop)), Shell::Public);

        let mut verifying = Session::signed_in(member());
        verifying.is_loading = true;
        verifying.activity = Some(Operation::VerifyingEmail);
        assert!(matches!(
            compose(&verifying, &nav(Viewport::Mobile)),
            Shell::Mobile { .. }
        ));
    }

    #[test]
    fn test_anonymous_gets_public_header() {
        let shell = compose(&Session::anonymous(), &nav(Viewport::Desktop));
        assert_eq!(shell, Shell::Public);
        assert!(!shell.has_navigation());
        assert!(shell.header().is_none());
    }

    #[test]
    fn test_desktop_sidebar_mode() {
        let session = Session::signed_in(member());
        let mut state = nav(Viewport::Desktop);

        let shell = compose(&session, &state);
        assert!(matches!(shell, Shell::Desktop { sidebar: SidebarMode::Expanded, .. }));
        assert!(!shell.has_bottom_nav());

        state.is_collapsed = true;
        let shell = compose(&session, &state);
        assert!(matches!(shell, Shell::Desktop { sidebar: SidebarMode::Collapsed, .. }));
        let header = shell.header().unwrap();
        assert!(!header.show_menu_button);
        assert_eq!(header.initial, 'T');
        assert!(header.has_household);
    }

    #[test]
    fn test_mobile_drawer_and_bottom_nav() {
        let session = Session::signed_in(member());
        let mut state = nav(Viewport::Mobile);
        state.is_mobile_open = true;
        state.notification_count = 14;

        let shell = compose(&session, &state);
        assert!(shell.has_bottom_nav());
        match shell {
            Shell::Mobile { header, drawer_open } => {
                assert!(drawer_open);
                assert!(header.show_menu_button);
                assert_eq!(header.badge.as_deref(), Some("9+"));
            }
            other => panic!("expected mobile shell, got {other:?}"),
        }
    }
}
