//! First-run household setup.

use api::UserUpdate;
use dioxus::prelude::*;
use ui::{use_auth, use_session_store};

use crate::Route;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Mode {
    Create,
    Join,
}

#[component]
pub fn Onboarding() -> Element {
    let auth = use_auth();
    let store = use_session_store();
    let nav = use_navigator();
    let mut mode = use_signal(|| Mode::Create);
    let mut value = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);

    let handle_finish = move |evt: FormEvent| {
        evt.prevent_default();
        let household = match mode() {
            Mode::Create => household_slug(&value()),
            Mode::Join => Some(value().trim().to_string()).filter(|code| !code.is_empty()),
        };
        let Some(household) = household else {
            error.set(Some(match mode() {
                Mode::Create => "Give your household a name".to_string(),
                Mode::Join => "Enter the invite code you received".to_string(),
            }));
            return;
        };
        store.update_user(
            UserUpdate::default()
                .household(household)
                .onboarding_completed(true),
        );
        nav.replace(Route::Home {});
    };

    let name = auth().user.map(|u| u.display_name().to_string()).unwrap_or_default();
    let (field_label, submit_label) = match mode() {
        Mode::Create => ("Household name", "Create household"),
        Mode::Join => ("Invite code", "Join household"),
    };

    rsx! {
        div {
            class: "flex flex-col items-center justify-center min-h-[80vh] p-8 gap-4",
            h1 { class: "text-neutral-800 font-bold text-[1.75rem]", "Welcome, {name}" }
            p { class: "text-neutral-600", "Set up your household to get started." }

            div {
                class: "flex gap-2",
                button {
                    class: if mode() == Mode::Create { "rounded px-3 py-1 bg-neutral-900 text-white" } else { "rounded px-3 py-1 border" },
                    onclick: move |_| {
                        mode.set(Mode::Create);
                        error.set(None);
                    },
                    "Create"
                }
                button {
                    class: if mode() == Mode::Join { "rounded px-3 py-1 bg-neutral-900 text-white" } else { "rounded px-3 py-1 border" },
                    onclick: move |_| {
                        mode.set(Mode::Join);
                        error.set(None);
                    },
                    "Join"
                }
            }

            form {
                onsubmit: handle_finish,
                class: "flex flex-col gap-3 w-full max-w-[320px]",
                label {
                    class: "flex flex-col gap-1 text-sm",
                    span { "{field_label}" }
                    input {
                        class: "border rounded px-3 py-2",
                        value: value(),
                        oninput: move |evt: FormEvent| value.set(evt.value()),
                    }
                }
                if let Some(message) = error() {
                    span { class: "text-red-600 text-xs", "{message}" }
                }
                button {
                    class: "rounded bg-neutral-900 text-white py-2",
                    r#type: "submit",
                    "{submit_label}"
                }
            }
        }
    }
}

/// Identifier for a new household derived from its name.
fn household_slug(name: &str) -> Option<String> {
    let slug = name
        .trim()
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    (!slug.is_empty()).then_some(slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_household_slug() {
        assert_eq!(household_slug("The Flat on 5th").as_deref(), Some("the-flat-on-5th"));
        assert_eq!(household_slug("  Casa   Verde!! ").as_deref(), Some("casa-verde"));
        assert_eq!(household_slug(" -- "), None);
    }
}
