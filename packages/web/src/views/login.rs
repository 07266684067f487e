//! Sign-in page.

use api::{AuthError, Field};
use dioxus::prelude::*;
use session::ResumeQuery;
use ui::{use_auth, use_session_store};

use super::form::{field_message, general_message, Banner, TextField};
use crate::Route;

#[component]
pub fn Login(query: ResumeQuery) -> Element {
    let auth = use_auth();
    let store = use_session_store();
    let nav = use_navigator();
    let email = use_signal(String::new);
    let password = use_signal(String::new);
    let mut error = use_signal(|| Option::<AuthError>::None);

    // Signed in already, or just now: continue where the user was headed.
    let target = query.target();
    use_effect(use_reactive((&target,), move |(target,)| {
        let session = auth();
        if !session.is_loading && session.is_authenticated() {
            nav.replace(target);
        }
    }));

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let store = store.clone();
        spawn(async move {
            error.set(None);
            if let Err(e) = store.login(&email(), &password()).await {
                error.set(Some(e));
            }
        });
    };

    let session = auth();
    let busy = session.is_loading;
    let busy_label = session.activity.map(|op| op.label()).unwrap_or("Signing in…");
    let current = error();

    rsx! {
        div {
            class: "flex flex-col items-center justify-center min-h-[80vh] p-8",

            h1 { class: "mb-2 text-neutral-800 font-bold text-[1.75rem]", "Welcome back" }
            p { class: "mb-8 text-neutral-600 text-[0.9375rem]", "Sign in to your household" }

            form {
                onsubmit: handle_login,
                class: "flex flex-col gap-3 w-full max-w-[320px]",

                Banner { message: general_message(current.as_ref()) }
                TextField {
                    label: "Email",
                    kind: "email",
                    value: email,
                    error: field_message(current.as_ref(), Field::Email),
                }
                TextField {
                    label: "Password",
                    kind: "password",
                    value: password,
                    error: field_message(current.as_ref(), Field::Password),
                }

                button {
                    class: "rounded bg-neutral-900 text-white py-2 disabled:opacity-50",
                    r#type: "submit",
                    disabled: busy,
                    if busy { "{busy_label}" } else { "Sign in" }
                }
            }

            div {
                class: "mt-6 flex flex-col items-center gap-2 text-sm",
                Link { to: Route::ForgotPassword {}, "Forgot your password?" }
                Link { to: Route::Signup {}, "New here? Create an account" }
            }
        }
    }
}
