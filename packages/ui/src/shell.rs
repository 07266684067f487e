//! Application chrome: headers, sidebar, mobile drawer and bottom tab bar.
//!
//! [`AppShell`] renders whatever [`session::compose`] decides for the current
//! session and navigation state, and keeps the active tab and notification
//! badge up to date.

use std::time::Duration;

use dioxus::prelude::*;
use session::{compose, HeaderModel, NavItem, Shell, SidebarMode, NAV_ITEMS};

use crate::auth::{use_auth, use_session_store, LogoutButton};
use crate::icons::{
    FaAnglesLeft, FaAnglesRight, FaBars, FaBell, FaCalendarDays, FaGear, FaHouse, FaListCheck,
    FaWallet, FaXmark,
};
use crate::sidebar::use_sidebar;
use crate::Icon;

const NOTIFICATION_POLL: Duration = Duration::from_secs(60);

#[component]
pub fn AppShell(
    /// Current route path, used for the active tab.
    active_path: String,
    children: Element,
) -> Element {
    let auth = use_auth();
    let store = use_session_store();
    let mut sidebar = use_sidebar();

    use_effect(use_reactive((&active_path,), move |(path,)| {
        sidebar.navigate(&path);
    }));

    // Poll the unread count while signed in.
    use_future(move || {
        let store = store.clone();
        async move {
            loop {
                if auth.peek().is_authenticated() {
                    match store.api().unread_count().await {
                        Ok(count) => sidebar.set_notifications(count),
                        Err(e) => tracing::debug!("Unread count unavailable: {e}"),
                    }
                } else {
                    sidebar.clear_notifications();
                }

                #[cfg(target_arch = "wasm32")]
                gloo_timers::future::sleep(NOTIFICATION_POLL).await;
                #[cfg(not(target_arch = "wasm32"))]
                tokio::time::sleep(NOTIFICATION_POLL).await;
            }
        }
    });

    let session = auth();
    let nav = sidebar.state();

    match compose(&session, &nav) {
        Shell::Splash => {
            let label = session.activity.map(|op| op.label()).unwrap_or("Loading…");
            rsx! {
                Spinner { label }
            }
        }
        Shell::Public => rsx! {
            div {
                class: "flex flex-col min-h-screen",
                PublicHeader {}
                main { class: "flex-1", {children} }
            }
        },
        Shell::Desktop { header, sidebar: mode } => rsx! {
            div {
                class: "flex min-h-screen",
                DesktopSidebar { mode, active_tab: nav.active_tab.clone() }
                div {
                    class: "flex flex-col flex-1 min-w-0",
                    ProtectedHeader { header }
                    main { class: "flex-1 p-6", {children} }
                }
            }
        },
        Shell::Mobile { header, drawer_open } => rsx! {
            div {
                class: "flex flex-col min-h-screen",
                ProtectedHeader { header }
                MobileDrawer { open: drawer_open, active_tab: nav.active_tab.clone() }
                main { class: "flex-1 p-4 pb-20", {children} }
                BottomNav { active_tab: nav.active_tab.clone() }
            }
        },
    }
}

/// Full-screen loading indicator.
#[component]
pub fn Spinner(#[props(into)] label: String) -> Element {
    rsx! {
        div {
            class: "flex items-center justify-center min-h-screen",
            role: "status",
            span { class: "animate-pulse text-neutral-500", "{label}" }
        }
    }
}

#[component]
fn PublicHeader() -> Element {
    rsx! {
        header {
            class: "flex items-center justify-between px-6 h-14 border-b",
            Link { to: "/", class: "font-bold text-lg", "Roomly" }
            nav {
                class: "flex gap-4 text-sm",
                Link { to: "/auth/login", "Log in" }
                Link { to: "/auth/signup", "Sign up" }
            }
        }
    }
}

#[component]
fn ProtectedHeader(header: HeaderModel) -> Element {
    let mut sidebar = use_sidebar();

    rsx! {
        header {
            class: "flex items-center gap-3 px-4 h-14 border-b",
            if header.show_menu_button {
                button {
                    class: "p-2",
                    aria_label: "Toggle navigation",
                    onclick: move |_| sidebar.toggle(),
                    Icon { icon: FaBars, width: 18, height: 18 }
                }
            }
            span { class: "font-bold text-lg flex-1", "Roomly" }
            if !header.has_household {
                Link { to: "/onboarding", class: "text-sm text-amber-600", "Set up your household" }
            }
            button {
                class: "relative p-2",
                aria_label: "Notifications",
                onclick: move |_| sidebar.clear_notifications(),
                Icon { icon: FaBell, width: 18, height: 18 }
                if let Some(badge) = header.badge.clone() {
                    span {
                        class: "absolute -top-1 -right-1 rounded-full bg-red-500 text-white text-xs px-1",
                        "{badge}"
                    }
                }
            }
            Avatar { initial: header.initial, avatar: header.avatar.clone(), name: header.display_name.clone() }
            LogoutButton { class: "text-sm text-neutral-600" }
        }
    }
}

#[component]
fn Avatar(initial: char, avatar: Option<String>, name: String) -> Element {
    rsx! {
        div {
            class: "flex items-center gap-2",
            title: "{name}",
            if let Some(src) = avatar {
                img { class: "w-8 h-8 rounded-full", src: "{src}", alt: "{name}" }
            } else {
                span {
                    class: "flex items-center justify-center w-8 h-8 rounded-full bg-neutral-200 font-semibold",
                    "{initial}"
                }
            }
        }
    }
}

#[component]
fn DesktopSidebar(mode: SidebarMode, active_tab: String) -> Element {
    let mut sidebar = use_sidebar();
    let collapsed = mode == SidebarMode::Collapsed;
    let (width, toggle_label) = if collapsed {
        ("flex flex-col w-16 border-r", "Expand sidebar")
    } else {
        ("flex flex-col w-60 border-r", "Collapse sidebar")
    };

    rsx! {
        aside {
            class: width,
            nav {
                class: "flex flex-col gap-1 p-2 flex-1",
                for item in NAV_ITEMS {
                    NavLink { key: "{item.path}", item, active: item.is_active(&active_tab), show_label: !collapsed }
                }
            }
            button {
                class: "p-3 border-t",
                aria_label: toggle_label,
                onclick: move |_| sidebar.toggle(),
                if collapsed {
                    Icon { icon: FaAnglesRight, width: 14, height: 14 }
                } else {
                    Icon { icon: FaAnglesLeft, width: 14, height: 14 }
                }
            }
        }
    }
}

#[component]
fn MobileDrawer(open: bool, active_tab: String) -> Element {
    let mut sidebar = use_sidebar();

    if !open {
        return rsx! {};
    }

    rsx! {
        div {
            class: "fixed inset-0 z-40 bg-black/40",
            onclick: move |_| sidebar.set_mobile_open(false),
        }
        aside {
            class: "fixed inset-y-0 left-0 z-50 w-64 bg-white shadow-lg flex flex-col",
            button {
                class: "self-end p-3",
                aria_label: "Close navigation",
                onclick: move |_| sidebar.set_mobile_open(false),
                Icon { icon: FaXmark, width: 16, height: 16 }
            }
            nav {
                class: "flex flex-col gap-1 p-2",
                for item in NAV_ITEMS {
                    NavLink { key: "{item.path}", item, active: item.is_active(&active_tab), show_label: true }
                }
            }
        }
    }
}

#[component]
fn BottomNav(active_tab: String) -> Element {
    let mut sidebar = use_sidebar();

    rsx! {
        nav {
            class: "fixed bottom-0 inset-x-0 flex justify-around border-t bg-white h-16",
            for item in NAV_ITEMS {
                Link {
                    key: "{item.path}",
                    to: item.path,
                    class: tab_class(item.is_active(&active_tab)),
                    onclick: move |_| sidebar.navigate(item.path),
                    NavIcon { path: item.path }
                    span { "{item.label}" }
                }
            }
        }
    }
}

#[component]
fn NavLink(item: NavItem, active: bool, show_label: bool) -> Element {
    let mut sidebar = use_sidebar();

    rsx! {
        Link {
            to: item.path,
            class: link_class(active),
            // Tapping the current page still has to close the drawer.
            onclick: move |_| sidebar.navigate(item.path),
            NavIcon { path: item.path }
            if show_label {
                span { "{item.label}" }
            }
        }
    }
}

fn link_class(active: bool) -> &'static str {
    if active {
        "flex items-center gap-3 rounded px-3 py-2 bg-neutral-100 font-medium"
    } else {
        "flex items-center gap-3 rounded px-3 py-2"
    }
}

fn tab_class(active: bool) -> &'static str {
    if active {
        "flex flex-col items-center text-xs text-blue-600"
    } else {
        "flex flex-col items-center text-xs text-neutral-500"
    }
}

#[component]
fn NavIcon(path: &'static str) -> Element {
    match path {
        "/tasks" => rsx! { Icon { icon: FaListCheck, width: 16, height: 16 } },
        "/expenses" => rsx! { Icon { icon: FaWallet, width: 16, height: 16 } },
        "/events" => rsx! { Icon { icon: FaCalendarDays, width: 16, height: 16 } },
        "/settings" => rsx! { Icon { icon: FaGear, width: 16, height: 16 } },
        _ => rsx! { Icon { icon: FaHouse, width: 16, height: 16 } },
    }
}
