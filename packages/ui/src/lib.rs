//! This crate contains all shared UI for the workspace.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod platform;
pub use platform::{load_config, make_storage, PlatformStore};

mod auth;
pub use auth::{use_auth, use_session_store, AppSession, AuthProvider, LogoutButton, SessionHandle};

mod sidebar;
pub use sidebar::{use_sidebar, SidebarHandle, SidebarProvider};

mod guard;
pub use guard::ProtectedRoute;

mod shell;
pub use shell::{AppShell, Spinner};

#[cfg(test)]
mod testing;
