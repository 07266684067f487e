//! Household pages. Their content lives outside the session layer; each one
//! only shows who is signed in.

use dioxus::prelude::*;
use ui::use_auth;

use crate::Route;

#[component]
fn Placeholder(title: &'static str, blurb: &'static str) -> Element {
    rsx! {
        section {
            class: "flex flex-col gap-2",
            h1 { class: "text-2xl font-bold", "{title}" }
            p { class: "text-neutral-600", "{blurb}" }
        }
    }
}

#[component]
pub fn Home() -> Element {
    let auth = use_auth();
    let name = auth().user.map(|u| u.display_name().to_string()).unwrap_or_default();

    rsx! {
        section {
            class: "flex flex-col gap-2",
            h1 { class: "text-2xl font-bold", "Hi, {name}" }
            p { class: "text-neutral-600", "Here's what's happening in your household." }
        }
    }
}

#[component]
pub fn Tasks() -> Element {
    rsx! {
        Placeholder { title: "Tasks", blurb: "Chores and to-dos shared with your roommates." }
    }
}

#[component]
pub fn Expenses() -> Element {
    rsx! {
        Placeholder { title: "Expenses", blurb: "Bills, splits and who owes whom." }
    }
}

#[component]
pub fn Events() -> Element {
    rsx! {
        Placeholder { title: "Events", blurb: "House meetings, parties and the shared calendar." }
    }
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));
    rsx! {
        div {
            class: "flex flex-col items-center justify-center min-h-screen gap-4",
            h1 { class: "text-4xl font-bold", "404" }
            p { class: "text-neutral-600", "Nothing lives at {path}." }
            Link { to: Route::Home {}, "Go home" }
        }
    }
}
