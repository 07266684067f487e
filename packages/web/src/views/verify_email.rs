//! Email verification page.
//!
//! Opened two ways: right after signup (no token, offers a resend) and from
//! the emailed link (`?token=…`, exchanged once on mount).

use std::time::Duration;

use dioxus::prelude::*;
use session::ResumeQuery;
use ui::{use_auth, use_session_store};

use crate::Route;

const CONTINUE_DELAY: Duration = Duration::from_secs(2);

#[derive(Clone, Debug, PartialEq)]
enum Status {
    Waiting,
    Verifying,
    Verified,
    Failed(String),
}

#[component]
pub fn VerifyEmail(token: String) -> Element {
    let auth = use_auth();
    let store = use_session_store();
    let nav = use_navigator();
    let mut status = use_signal(|| Status::Waiting);
    let mut resend_note = use_signal(|| Option::<String>::None);

    use_hook({
        let store = store.clone();
        move || {
            if token.trim().is_empty() {
                return;
            }
            status.set(Status::Verifying);
            spawn(async move {
                match store.verify_email(&token).await {
                    Ok(()) => {
                        status.set(Status::Verified);
                        sleep(CONTINUE_DELAY).await;
                        let onboarded = store.user().map(|u| u.onboarding_completed);
                        match onboarded {
                            Some(false) => nav.replace(Route::Onboarding {}),
                            _ => nav.replace(Route::Home {}),
                        };
                    }
                    Err(e) => status.set(Status::Failed(e.message)),
                }
            });
        }
    });

    let handle_resend = move |_| {
        let store = store.clone();
        spawn(async move {
            resend_note.set(None);
            let note = match store.resend_verification().await {
                Ok(()) => "Verification email sent!".to_string(),
                Err(e) => e.message,
            };
            resend_note.set(Some(note));
        });
    };

    let email = auth().user.map(|u| u.email);
    let busy = auth().is_loading;

    rsx! {
        div {
            class: "flex flex-col items-center justify-center min-h-[80vh] p-8 gap-4 text-center",
            h1 { class: "text-neutral-800 font-bold text-[1.75rem]", "Verify your email" }

            {match status() {
                Status::Waiting => rsx! {
                    p {
                        class: "text-neutral-600 max-w-[360px]",
                        if let Some(email) = email.clone() {
                            "We sent a verification link to {email}. Open it to continue."
                        } else {
                            "Open the link in your verification email to continue."
                        }
                    }
                },
                Status::Verifying => rsx! {
                    p { class: "text-neutral-600", "Verifying your email…" }
                },
                Status::Verified => rsx! {
                    p { class: "text-green-700", "Email verified successfully!" }
                },
                Status::Failed(message) => rsx! {
                    p { class: "text-red-600", role: "alert", "{message}" }
                },
            }}

            if status() != Status::Verified && email.is_some() {
                button {
                    class: "rounded border px-4 py-2 disabled:opacity-50",
                    disabled: busy,
                    onclick: handle_resend,
                    "Resend verification email"
                }
            }
            if let Some(note) = resend_note() {
                p { class: "text-sm text-neutral-600", "{note}" }
            }

            if email.is_none() {
                Link { class: "text-sm", to: Route::Login { query: ResumeQuery::default() }, "Back to sign in" }
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}
