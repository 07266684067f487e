//! Account creation page.

use api::{AuthError, Field};
use dioxus::prelude::*;
use session::ResumeQuery;
use ui::{use_auth, use_session_store};

use super::form::{field_message, general_message, Banner, TextField};
use crate::Route;

#[component]
pub fn Signup() -> Element {
    let auth = use_auth();
    let store = use_session_store();
    let nav = use_navigator();
    let name = use_signal(String::new);
    let email = use_signal(String::new);
    let password = use_signal(String::new);
    let confirm_password = use_signal(String::new);
    let mut error = use_signal(|| Option::<AuthError>::None);

    let handle_signup = move |evt: FormEvent| {
        evt.prevent_default();
        let store = store.clone();
        spawn(async move {
            error.set(None);
            match store
                .signup(&name(), &email(), &password(), &confirm_password())
                .await
            {
                Ok(()) => {
                    tracing::info!("Account created, awaiting email verification");
                    nav.replace(Route::VerifyEmail { token: String::new() });
                }
                Err(e) => error.set(Some(e)),
            }
        });
    };

    let busy = auth().is_loading;
    let current = error();

    rsx! {
        div {
            class: "flex flex-col items-center justify-center min-h-[80vh] p-8",

            h1 { class: "mb-2 text-neutral-800 font-bold text-[1.75rem]", "Create Account" }
            p { class: "mb-8 text-neutral-600 text-[0.9375rem]", "Start sharing your home with Roomly" }

            form {
                onsubmit: handle_signup,
                class: "flex flex-col gap-3 w-full max-w-[320px]",

                Banner { message: general_message(current.as_ref()) }
                TextField {
                    label: "Name",
                    value: name,
                    error: field_message(current.as_ref(), Field::Name),
                }
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
                TextField {
                    label: "Confirm password",
                    kind: "password",
                    value: confirm_password,
                    error: field_message(current.as_ref(), Field::ConfirmPassword),
                }

                button {
                    class: "rounded bg-neutral-900 text-white py-2 disabled:opacity-50",
                    r#type: "submit",
                    disabled: busy,
                    if busy { "Creating account…" } else { "Sign up" }
                }
            }

            p {
                class: "mt-6 text-sm",
                "Already have an account? "
                Link { to: Route::Login { query: ResumeQuery::default() }, "Sign in" }
            }
        }
    }
}
