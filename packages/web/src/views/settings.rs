use api::UserUpdate;
use dioxus::prelude::*;
use ui::{use_auth, use_session_store, use_sidebar, LogoutButton};

#[component]
pub fn Settings() -> Element {
    let auth = use_auth();
    let store = use_session_store();
    let mut sidebar = use_sidebar();
    let user = auth().user;
    let mut name = use_signal(|| user.as_ref().map(|u| u.name.clone()).unwrap_or_default());
    let mut save_status = use_signal(|| Option::<&str>::None);

    let handle_save = move |evt: FormEvent| {
        evt.prevent_default();
        let trimmed = name().trim().to_string();
        if trimmed.is_empty() {
            save_status.set(Some("Name cannot be empty"));
            return;
        }
        store.update_user(UserUpdate::default().name(trimmed));
        save_status.set(Some("Saved"));
    };

    let nav = sidebar.state();

    rsx! {
        section {
            class: "flex flex-col gap-6 max-w-[480px]",
            h1 { class: "text-2xl font-bold", "Settings" }

            form {
                onsubmit: handle_save,
                class: "flex flex-col gap-2",
                h2 { class: "font-semibold", "Profile" }
                if let Some(user) = user {
                    p { class: "text-sm text-neutral-600", "{user.email}" }
                }
                input {
                    class: "border rounded px-3 py-2",
                    value: name(),
                    oninput: move |evt: FormEvent| {
                        name.set(evt.value());
                        save_status.set(None);
                    },
                }
                button { class: "self-start rounded border px-3 py-1", r#type: "submit", "Save" }
                if let Some(status) = save_status() {
                    span { class: "text-xs text-neutral-600", "{status}" }
                }
            }

            if !nav.is_mobile() {
                label {
                    class: "flex items-center gap-2",
                    input {
                        r#type: "checkbox",
                        checked: nav.is_collapsed,
                        onchange: move |_| sidebar.toggle(),
                    }
                    "Collapse the sidebar"
                }
            }

            LogoutButton { class: "self-start rounded border px-3 py-1 text-red-600" }
        }
    }
}
