//! Shared pieces of the auth forms.

use api::{AuthError, Field};
use dioxus::prelude::*;

/// Message to show next to `field`, if the error blames it.
pub(crate) fn field_message(error: Option<&AuthError>, field: Field) -> Option<String> {
    error
        .filter(|e| e.field == Some(field))
        .map(|e| e.message.clone())
}

/// Message for the banner above the form: any error not tied to a field.
pub(crate) fn general_message(error: Option<&AuthError>) -> Option<String> {
    error.filter(|e| e.field.is_none()).map(|e| e.message.clone())
}

#[component]
pub(crate) fn Banner(message: Option<String>) -> Element {
    rsx! {
        if let Some(message) = message {
            div {
                class: "px-2.5 py-2.5 bg-red-50 border border-red-200 rounded text-red-600 text-[0.8125rem]",
                role: "alert",
                "{message}"
            }
        }
    }
}

#[component]
pub(crate) fn TextField(
    label: &'static str,
    #[props(default = "text")] kind: &'static str,
    value: Signal<String>,
    error: Option<String>,
) -> Element {
    let mut value = value;
    let input_class = input_class(error.is_some());
    rsx! {
        label {
            class: "flex flex-col gap-1 text-sm",
            span { "{label}" }
            input {
                class: input_class,
                r#type: kind,
                value: value(),
                oninput: move |evt: FormEvent| value.set(evt.value()),
            }
            if let Some(error) = error.as_deref() {
                span { class: "text-red-600 text-xs", "{error}" }
            }
        }
    }
}

fn input_class(invalid: bool) -> &'static str {
    if invalid {
        "border border-red-400 rounded px-3 py-2"
    } else {
        "border rounded px-3 py-2"
    }
}
