//! Headless rig that mounts the providers, the router and the shell in a
//! `VirtualDom`, for tests that need real component lifecycles.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use api::mock::{DEMO_EMAIL, DEMO_PASSWORD};
use dioxus::history::MemoryHistory;
use dioxus::prelude::*;
use session::{GuardConfig, GuardTarget, Redirect, Session};
use store::{AppConfig, FileStore};
use tempfile::TempDir;

use crate::{
    use_auth, use_session_store, use_sidebar, AppShell, AuthProvider, PlatformStore,
    ProtectedRoute, SessionHandle, SidebarHandle, SidebarProvider,
};

const LATENCY_MS: u64 = 50;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[layout(Frame)]
        #[route("/auth/login")]
        SignIn {},
        #[layout(Members)]
            #[route("/")]
            Dashboard {},
            #[route("/tasks")]
            Chores {},
}

/// What the mounted tree observed, shared with the test through root context.
#[derive(Clone, Default)]
struct Journal {
    sign_in_on_mount: bool,
    sign_in_mounts: Rc<Cell<usize>>,
    logins: Rc<RefCell<Vec<Result<(), String>>>>,
    redirects: Rc<RefCell<Vec<Redirect>>>,
    sidebar: Rc<Cell<Option<SidebarHandle>>>,
    auth: Rc<Cell<Option<Signal<Session>>>>,
}

#[component]
fn Harness(session: SessionHandle, storage: PlatformStore) -> Element {
    rsx! {
        AuthProvider {
            session,
            SidebarProvider {
                storage,
                Spy {}
                Router::<TestRoute> {}
            }
        }
    }
}

/// Hands the context handles to the test.
#[component]
fn Spy() -> Element {
    let journal = use_context::<Journal>();
    let sidebar = use_sidebar();
    let auth = use_auth();
    use_hook(move || {
        journal.sidebar.set(Some(sidebar));
        journal.auth.set(Some(auth));
    });
    rsx! {}
}

#[component]
fn Frame() -> Element {
    let route = use_route::<TestRoute>();
    rsx! {
        AppShell {
            active_path: route.to_string(),
            Outlet::<TestRoute> {}
        }
    }
}

#[component]
fn Members() -> Element {
    let route = use_route::<TestRoute>();
    let nav = use_navigator();
    let journal = use_context::<Journal>();

    rsx! {
        ProtectedRoute {
            config: GuardConfig::complete(),
            path: route.to_string(),
            on_redirect: move |redirect: Redirect| {
                let target = redirect.target;
                journal.redirects.borrow_mut().push(redirect);
                if target == GuardTarget::Login {
                    nav.replace(TestRoute::SignIn {});
                }
            },
            Outlet::<TestRoute> {}
        }
    }
}

/// Sign-in page that submits the demo credentials as soon as it mounts.
#[component]
fn SignIn() -> Element {
    let store = use_session_store();
    let journal = use_context::<Journal>();

    use_hook(move || {
        journal.sign_in_mounts.set(journal.sign_in_mounts.get() + 1);
        if journal.sign_in_on_mount && !store.is_authenticated() {
            spawn(async move {
                let outcome = store.login(DEMO_EMAIL, DEMO_PASSWORD).await;
                journal.logins.borrow_mut().push(outcome.map_err(|e| e.to_string()));
            });
        }
    });

    rsx! {
        p { "Sign in" }
    }
}

#[component]
fn Dashboard() -> Element {
    rsx! {
        p { "Dashboard" }
    }
}

#[component]
fn Chores() -> Element {
    rsx! {
        p { "Chores" }
    }
}

struct Rig {
    dom: VirtualDom,
    store: SessionHandle,
    history: Rc<MemoryHistory>,
    journal: Journal,
    _dir: TempDir,
}

impl Rig {
    fn mount(dir: TempDir, path: &str, journal: Journal) -> Self {
        let config = AppConfig::default().with_mock(LATENCY_MS);
        let storage = FileStore::new(dir.path().to_path_buf());
        let store = SessionHandle::new(&config, storage.clone());
        let history = Rc::new(MemoryHistory::with_initial_path(path));

        let props = HarnessProps {
            session: store.clone(),
            storage,
        };
        let mut dom = VirtualDom::new_with_props(Harness, props)
            .with_root_context(journal.clone())
            .with_root_context(history.clone() as Rc<dyn History>);
        dom.rebuild_in_place();

        Self {
            dom,
            store,
            history,
            journal,
            _dir: dir,
        }
    }

    /// Process renders, effects and tasks until nothing is left for `window`
    /// of virtual time.
    async fn settle(&mut self, window: Duration) {
        // Bounded so a render loop fails the test instead of hanging it.
        for _ in 0..10_000 {
            match tokio::time::timeout(window, self.dom.wait_for_work()).await {
                Ok(()) => {
                    self.dom.render_immediate_to_vec();
                }
                Err(_) => return,
            }
        }
        panic!("the tree never settled");
    }

    fn route(&self) -> String {
        self.history.current_route()
    }

    fn sidebar(&self) -> SidebarHandle {
        self.journal.sidebar.get().expect("sidebar handle")
    }

    fn session(&self) -> Session {
        let auth = self.journal.auth.get().expect("auth signal");
        self.dom.in_runtime(|| auth.peek().clone())
    }

    fn backend_calls(&self) -> usize {
        match self.store.api() {
            api::Backend::Mock(mock) => mock.calls(),
            api::Backend::Http(_) => 0,
        }
    }
}

/// A storage directory holding a signed-in demo session.
async fn remembered_session() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::default().with_mock(0);
    let store = SessionHandle::new(&config, FileStore::new(dir.path().to_path_buf()));
    store.initialize();
    store.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();
    dir
}

#[cfg(test)]
mod tests {
    use super::*;
    use session::Viewport;

    const WINDOW: Duration = Duration::from_secs(2);

    #[tokio::test(start_paused = true)]
    async fn test_login_from_routed_view_completes() {
        let journal = Journal {
            sign_in_on_mount: true,
            ..Default::default()
        };
        let mut rig = Rig::mount(tempfile::tempdir().unwrap(), "/auth/login", journal);
        rig.settle(WINDOW).await;

        assert_eq!(*rig.journal.logins.borrow(), vec![Ok(())]);
        assert!(rig.store.is_authenticated());
        assert_eq!(rig.backend_calls(), 1);

        let session = rig.session();
        assert!(session.is_authenticated());
        assert!(!session.is_loading);
        assert!(session.activity.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_anonymous_visit_redirects_to_login() {
        let mut rig = Rig::mount(tempfile::tempdir().unwrap(), "/tasks", Journal::default());
        rig.settle(WINDOW).await;

        assert_eq!(
            *rig.journal.redirects.borrow(),
            vec![Redirect {
                target: GuardTarget::Login,
                resume: Some("/tasks".to_string()),
            }]
        );
        assert_eq!(rig.route(), "/auth/login");
        assert_eq!(rig.journal.sign_in_mounts.get(), 1);
        assert_eq!(rig.dom.in_runtime(|| rig.sidebar().state().active_tab), "/auth/login");
    }

    #[tokio::test(start_paused = true)]
    async fn test_remembered_member_stays_put() {
        let dir = remembered_session().await;
        let mut rig = Rig::mount(dir, "/tasks", Journal::default());
        rig.settle(WINDOW).await;

        assert!(rig.journal.redirects.borrow().is_empty());
        assert_eq!(rig.route(), "/tasks");
        assert!(rig.session().is_authenticated());

        let nav = rig.dom.in_runtime(|| rig.sidebar().state());
        assert_eq!(nav.active_tab, "/tasks");
        // First badge poll answered by the mock.
        assert_eq!(nav.notification_count, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_logout_returns_to_login() {
        let dir = remembered_session().await;
        let mut rig = Rig::mount(dir, "/", Journal::default());
        rig.settle(WINDOW).await;
        assert_eq!(rig.route(), "/");

        rig.store.logout().await;
        rig.settle(WINDOW).await;

        assert!(!rig.session().is_authenticated());
        assert_eq!(rig.route(), "/auth/login");
        assert_eq!(
            rig.journal.redirects.borrow().last().map(|r| r.target),
            Some(GuardTarget::Login)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_path_navigation_closes_drawer() {
        let dir = remembered_session().await;
        let mut rig = Rig::mount(dir, "/tasks", Journal::default());
        rig.settle(WINDOW).await;

        let mut sidebar = rig.sidebar();
        rig.dom.in_runtime(|| {
            sidebar.set_viewport(Viewport::Mobile);
            sidebar.set_mobile_open(true);
        });
        rig.settle(WINDOW).await;
        assert!(rig.dom.in_runtime(|| sidebar.state().is_mobile_open));

        rig.dom.in_runtime(|| sidebar.navigate("/tasks"));
        rig.settle(WINDOW).await;

        let nav = rig.dom.in_runtime(|| sidebar.state());
        assert!(!nav.is_mobile_open);
        assert_eq!(nav.active_tab, "/tasks");
    }
}
