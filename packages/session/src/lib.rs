//! # Session crate: authentication and navigation state for the Roomly client
//!
//! Headless state machines shared by every frontend. Nothing here renders; the
//! `ui` crate binds these types to Dioxus signals and components.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | [`SessionStore`]: identity lifecycle, auth operations, persistence of the session record |
//! | [`guard`] | [`evaluate`]: pure access decision for protected views, plus resume-path handling |
//! | [`nav`] | [`Navigation`]: sidebar collapse, mobile drawer, active tab, notification badge |
//! | [`shell`] | [`compose`]: which header and navigation chrome surround a page |

pub mod auth;
pub mod guard;
pub mod nav;
pub mod shell;

pub use auth::{Operation, Session, SessionStore};
pub use guard::{evaluate, resume_target, Decision, GuardConfig, GuardTarget, Redirect, ResumeQuery};
pub use nav::{badge_text, NavItem, NavState, Navigation, Viewport, NAV_ITEMS};
pub use shell::{compose, HeaderModel, Shell, SidebarMode};
