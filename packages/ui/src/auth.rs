//! Authentication context and hooks for the UI.

use std::ops::Deref;
use std::rc::Rc;

use api::Backend;
use dioxus::prelude::*;
use session::{Session, SessionStore};
use store::AppConfig;

use crate::platform::PlatformStore;

pub type AppSession = SessionStore<Backend, PlatformStore>;

/// Shared handle to the process-wide session store.
#[derive(Clone)]
pub struct SessionHandle(Rc<AppSession>);

impl SessionHandle {
    /// Build the store for `config` over `storage`. Call once, at the
    /// composition root.
    pub fn new(config: &AppConfig, storage: PlatformStore) -> Self {
        let backend = Backend::from_config(&config.api);
        Self(Rc::new(SessionStore::new(backend, storage)))
    }
}

impl Deref for SessionHandle {
    type Target = AppSession;

    fn deref(&self) -> &AppSession {
        &self.0
    }
}

impl PartialEq for SessionHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Get the current session state.
/// Returns a signal that updates on every session transition.
pub fn use_auth() -> Signal<Session> {
    use_context::<Signal<Session>>()
}

/// Get the session store, for calling login, logout and friends.
pub fn use_session_store() -> SessionHandle {
    use_context::<SessionHandle>()
}

/// Provider component that exposes the session to its children.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(session: SessionHandle, children: Element) -> Element {
    let mut state = use_signal(|| session.snapshot());
    use_context_provider(|| state);
    let store = use_context_provider(|| session.clone());

    // Subscribe before rehydrating so no transition is missed.
    use_hook(move || {
        let mut rx = store.subscribe();
        store.initialize();
        state.set(store.snapshot());

        spawn(async move {
            while rx.changed().await.is_ok() {
                let next = rx.borrow_and_update().clone();
                state.set(next);
            }
        });
    });

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
///
/// Signing out unmounts the protected chrome this button lives in, so the
/// request runs on the root scope and still reaches the server.
#[component]
pub fn LogoutButton(
    #[props(default = "Log out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let store = use_session_store();

    let onclick = move |_| {
        let store = store.clone();
        spawn_forever(async move {
            store.logout().await;
        });
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
