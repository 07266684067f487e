//! # Sidebar and navigation state
//!
//! [`Navigation`] tracks the desktop sidebar (collapsed or expanded, persisted
//! under `sidebar-collapsed`), the mobile drawer (open or closed, never
//! persisted), the active tab and the notification badge count.
//!
//! Viewport rules:
//!
//! | Event | Effect |
//! |-------|--------|
//! | startup on desktop | `is_collapsed` read from storage (`false` if absent or unparsable) |
//! | desktop → mobile | `is_collapsed = false`, `is_mobile_open = false` |
//! | mobile → desktop | drawer closed, `is_collapsed` re-read from storage |
//! | route change | `active_tab` recorded; on mobile the drawer closes |
//! | `toggle_sidebar` | mobile: flip the drawer; desktop: flip and persist the collapse |

use store::{KeyValueStore, SidebarPrefs};

/// Viewport classification driving responsive navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Viewport {
    Mobile,
    Desktop,
}

impl Viewport {
    /// Mobile when `width_px` is strictly below `breakpoint_px`.
    pub fn classify(width_px: f64, breakpoint_px: u32) -> Self {
        if width_px < f64::from(breakpoint_px) {
            Viewport::Mobile
        } else {
            Viewport::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        self == Viewport::Mobile
    }
}

/// Snapshot of the navigation state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavState {
    pub viewport: Viewport,
    /// Desktop-only; always `false` on mobile.
    pub is_collapsed: bool,
    pub is_mobile_open: bool,
    pub active_tab: String,
    pub notification_count: u32,
}

impl NavState {
    pub fn is_mobile(&self) -> bool {
        self.viewport.is_mobile()
    }
}

/// A primary navigation destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
}

pub const NAV_ITEMS: [NavItem; 5] = [
    NavItem { label: "Home", path: "/" },
    NavItem { label: "Tasks", path: "/tasks" },
    NavItem { label: "Expenses", path: "/expenses" },
    NavItem { label: "Events", path: "/events" },
    NavItem { label: "Settings", path: "/settings" },
];

impl NavItem {
    /// Exact path match; query strings and fragments are ignored.
    pub fn is_active(&self, active_tab: &str) -> bool {
        strip_query(active_tab) == self.path
    }
}

fn strip_query(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    match &path[..end] {
        "" => "/",
        p if p.len() > 1 => p.trim_end_matches('/'),
        p => p,
    }
}

/// Badge label for `count`: hidden at zero, capped at `9+`.
pub fn badge_text(count: u32) -> Option<String> {
    match count {
        0 => None,
        1..=9 => Some(count.to_string()),
        _ => Some("9+".to_string()),
    }
}

/// Owner of the navigation state. Mutated only through its methods.
#[derive(Debug)]
pub struct Navigation<S: KeyValueStore> {
    prefs: SidebarPrefs<S>,
    state: NavState,
}

impl<S: KeyValueStore> Navigation<S> {
    pub fn new(storage: S, viewport: Viewport) -> Self {
        let prefs = SidebarPrefs::new(storage);
        let is_collapsed = match viewport {
            Viewport::Desktop => prefs.collapsed(),
            Viewport::Mobile => false,
        };
        Self {
            prefs,
            state: NavState {
                viewport,
                is_collapsed,
                is_mobile_open: false,
                active_tab: "/".to_string(),
                notification_count: 0,
            },
        }
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    pub fn toggle_sidebar(&mut self) {
        match self.state.viewport {
            Viewport::Mobile => self.state.is_mobile_open = !self.state.is_mobile_open,
            Viewport::Desktop => self.set_collapsed(!self.state.is_collapsed),
        }
    }

    /// Apply a viewport reclassification. Returns whether anything changed.
    pub fn set_viewport(&mut self, viewport: Viewport) -> bool {
        if viewport == self.state.viewport {
            return false;
        }
        tracing::debug!("Viewport changed to {viewport:?}");
        self.state.viewport = viewport;
        self.state.is_mobile_open = false;
        self.state.is_collapsed = match viewport {
            Viewport::Mobile => false,
            Viewport::Desktop => self.prefs.collapsed(),
        };
        true
    }

    /// Record a route change.
    pub fn navigate(&mut self, path: &str) {
        self.state.active_tab = path.to_string();
        if self.state.is_mobile() {
            self.state.is_mobile_open = false;
        }
    }

    /// Set the desktop collapse flag and persist it. Ignored on mobile.
    pub fn set_collapsed(&mut self, collapsed: bool) {
        if self.state.is_mobile() {
            return;
        }
        self.state.is_collapsed = collapsed;
        if let Err(e) = self.prefs.set_collapsed(collapsed) {
            tracing::warn!("Failed to persist sidebar preference: {e}");
        }
    }

    pub fn set_mobile_open(&mut self, open: bool) {
        self.state.is_mobile_open = open && self.state.is_mobile();
    }

    pub fn set_notifications(&mut self, count: u32) {
        self.state.notification_count = count;
    }

    pub fn clear_notifications(&mut self) {
        self.state.notification_count = 0;
    }
}
