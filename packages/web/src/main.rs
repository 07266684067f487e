use dioxus::prelude::*;

use session::{GuardConfig, GuardTarget, Redirect, ResumeQuery};
use ui::{AppShell, AuthProvider, PlatformStore, ProtectedRoute, SessionHandle, SidebarProvider};
use views::{
    Events, Expenses, ForgotPassword, Home, Login, NotFound, Onboarding, Settings, Signup, Tasks,
    VerifyEmail,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Frame)]
        #[route("/auth/login?:..query")]
        Login { query: ResumeQuery },
        #[route("/auth/signup")]
        Signup {},
        #[route("/auth/forgot-password")]
        ForgotPassword {},
        #[route("/auth/verify-email?:token")]
        VerifyEmail { token: String },
        #[layout(SignedIn)]
            #[route("/onboarding")]
            Onboarding {},
        #[end_layout]
        #[layout(Member)]
            #[route("/")]
            Home {},
            #[route("/tasks")]
            Tasks {},
            #[route("/expenses")]
            Expenses {},
            #[route("/events")]
            Events {},
            #[route("/settings")]
            Settings {},
        #[end_layout]
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(ui::load_config);
    let storage = use_hook(ui::make_storage);
    let session = use_hook(|| SessionHandle::new(&config, storage.clone()));

    rsx! {
        Providers {
            session,
            storage,
            breakpoint: config.layout.mobile_breakpoint_px,
        }
    }
}

/// Session and navigation contexts around the router.
#[component]
fn Providers(session: SessionHandle, storage: PlatformStore, breakpoint: u32) -> Element {
    rsx! {
        AuthProvider {
            session,
            SidebarProvider {
                storage,
                breakpoint,
                Router::<Route> {}
            }
        }
    }
}

/// Application chrome around every routed page.
#[component]
fn Frame() -> Element {
    let route = use_route::<Route>();
    rsx! {
        AppShell {
            active_path: route.to_string(),
            Outlet::<Route> {}
        }
    }
}

/// Pages that only need a signed-in user.
#[component]
fn SignedIn() -> Element {
    rsx! {
        Guarded { config: GuardConfig::authenticated() }
    }
}

/// Pages for verified, onboarded household members.
#[component]
fn Member() -> Element {
    rsx! {
        Guarded { config: GuardConfig::complete() }
    }
}

#[component]
fn Guarded(config: GuardConfig) -> Element {
    let route = use_route::<Route>();
    let nav = use_navigator();

    rsx! {
        ProtectedRoute {
            config,
            path: route.to_string(),
            on_redirect: move |redirect: Redirect| {
                nav.replace(redirect_route(redirect));
            },
            Outlet::<Route> {}
        }
    }
}

fn redirect_route(redirect: Redirect) -> Route {
    match redirect.target {
        GuardTarget::Login => Route::Login {
            query: ResumeQuery::for_redirect(&redirect),
        },
        GuardTarget::VerifyEmail => Route::VerifyEmail {
            token: String::new(),
        },
        GuardTarget::Onboarding => Route::Onboarding {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_redirect_keeps_resume() {
        let route = redirect_route(Redirect {
            target: GuardTarget::Login,
            resume: Some("/expenses".to_string()),
        });
        assert_eq!(route.to_string(), "/auth/login?from%3D%2Fexpenses");
        assert_eq!(
            route,
            Route::Login {
                query: ResumeQuery {
                    from: Some("/expenses".to_string())
                }
            }
        );

        let route = redirect_route(Redirect {
            target: GuardTarget::Login,
            resume: Some("/".to_string()),
        });
        assert_eq!(route.to_string(), "/auth/login?");
        assert_eq!(route, Route::Login { query: ResumeQuery::default() });
    }

    #[test]
    fn test_resume_survives_the_address_bar() {
        let route = redirect_route(Redirect {
            target: GuardTarget::Login,
            resume: Some("/expenses?month=3&year=2024".to_string()),
        });
        let url = route.to_string();
        assert!(!url.contains('&'));

        let Ok(Route::Login { query }) = url.parse::<Route>() else {
            panic!("{url} did not parse as the login route");
        };
        assert_eq!(query.target(), "/expenses?month=3&year=2024");
        assert_eq!(
            "/auth/login".parse::<Route>().ok(),
            Some(Route::Login { query: ResumeQuery::default() })
        );
    }

    #[test]
    fn test_other_targets() {
        let verify = redirect_route(Redirect {
            target: GuardTarget::VerifyEmail,
            resume: None,
        });
        assert_eq!(verify, Route::VerifyEmail { token: String::new() });

        let onboarding = redirect_route(Redirect {
            target: GuardTarget::Onboarding,
            resume: None,
        });
        assert_eq!(onboarding, Route::Onboarding {});
    }

    #[test]
    fn test_protected_routes_parse() {
        assert_eq!("/tasks".parse::<Route>().ok(), Some(Route::Tasks {}));
        assert_eq!("/".parse::<Route>().ok(), Some(Route::Home {}));
        assert_eq!("/onboarding".parse::<Route>().ok(), Some(Route::Onboarding {}));
    }

    #[tokio::test(start_paused = true)]
    async fn test_verification_link_is_exchanged_once() {
        use std::rc::Rc;
        use std::time::Duration;

        use dioxus::history::MemoryHistory;
        use store::{AppConfig, FileStore};

        let dir = tempfile::tempdir().unwrap();
        let storage = FileStore::new(dir.path().to_path_buf());
        let session = SessionHandle::new(&AppConfig::default().with_mock(50), storage.clone());
        let history = Rc::new(MemoryHistory::with_initial_path("/auth/verify-email?token=abc123"));

        let props = ProvidersProps {
            session: session.clone(),
            storage,
            breakpoint: 768,
        };
        let mut dom = VirtualDom::new_with_props(Providers, props)
            .with_root_context(history.clone() as Rc<dyn History>);
        dom.rebuild_in_place();

        for _ in 0..10_000 {
            match tokio::time::timeout(Duration::from_secs(5), dom.wait_for_work()).await {
                Ok(()) => {
                    dom.render_immediate_to_vec();
                }
                Err(_) => break,
            }
        }

        let api::Backend::Mock(mock) = session.api() else {
            panic!("expected the mock backend");
        };
        assert_eq!(mock.calls(), 1);
        assert!(!session.is_loading());
        // Continued past the confirmation; signed out, so the home guard sends it to login.
        assert!(history.current_route().starts_with("/auth/login"));
    }
}
