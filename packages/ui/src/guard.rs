use dioxus::prelude::*;
use session::{evaluate, Decision, GuardConfig, Redirect};

use crate::auth::use_auth;
use crate::shell::Spinner;

/// Renders `children` only when the session satisfies `config`.
///
/// Redirects are handed to `on_redirect`; the caller owns the route table and
/// performs the navigation.
#[component]
pub fn ProtectedRoute(
    #[props(default)] config: GuardConfig,
    /// Location being requested, kept so sign-in can return to it.
    path: String,
    on_redirect: EventHandler<Redirect>,
    children: Element,
) -> Element {
    let auth = use_auth();
    let session = auth();
    let decision = evaluate(&session, config, &path);

    let pending = match &decision {
        Decision::Redirect(redirect) => Some(redirect.clone()),
        Decision::Loading | Decision::Allow => None,
    };
    use_effect(use_reactive((&pending,), move |(pending,)| {
        if let Some(redirect) = pending {
            tracing::debug!("Guard redirecting to {:?}", redirect.target);
            on_redirect.call(redirect);
        }
    }));

    match decision {
        Decision::Loading => rsx! {
            Spinner { label: "Loading…" }
        },
        Decision::Allow => rsx! {
            {children}
        },
        Decision::Redirect(_) => rsx! {},
    }
}
