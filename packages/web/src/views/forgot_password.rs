use api::{AuthError, Field};
use dioxus::prelude::*;
use session::ResumeQuery;
use ui::{use_auth, use_session_store};

use super::form::{field_message, general_message, Banner, TextField};
use crate::Route;

#[component]
pub fn ForgotPassword() -> Element {
    let auth = use_auth();
    let store = use_session_store();
    let email = use_signal(String::new);
    let mut error = use_signal(|| Option::<AuthError>::None);
    let mut sent = use_signal(|| false);

    let handle_reset = move |evt: FormEvent| {
        evt.prevent_default();
        let store = store.clone();
        spawn(async move {
            error.set(None);
            match store.reset_password(&email()).await {
                Ok(()) => sent.set(true),
                Err(e) => error.set(Some(e)),
            }
        });
    };

    let busy = auth().is_loading;
    let current = error();

    rsx! {
        div {
            class: "flex flex-col items-center justify-center min-h-[80vh] p-8",
            h1 { class: "mb-2 text-neutral-800 font-bold text-[1.75rem]", "Reset password" }

            if sent() {
                p {
                    class: "mb-6 text-neutral-600 text-center max-w-[320px]",
                    "If an account exists for {email}, a reset link is on its way."
                }
            } else {
                form {
                    onsubmit: handle_reset,
                    class: "flex flex-col gap-3 w-full max-w-[320px]",
                    Banner { message: general_message(current.as_ref()) }
                    TextField {
                        label: "Email",
                        kind: "email",
                        value: email,
                        error: field_message(current.as_ref(), Field::Email),
                    }
                    button {
                        class: "rounded bg-neutral-900 text-white py-2 disabled:opacity-50",
                        r#type: "submit",
                        disabled: busy,
                        if busy { "Sending…" } else { "Send reset link" }
                    }
                }
            }

            Link { class: "mt-6 text-sm", to: Route::Login { query: ResumeQuery::default() }, "Back to sign in" }
        }
    }
}
