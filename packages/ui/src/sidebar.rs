//! Navigation context: sidebar, mobile drawer, active tab and badge.

use dioxus::prelude::*;
use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender};
use futures::StreamExt;
use session::{NavState, Navigation, Viewport};

use crate::platform::PlatformStore;

/// Copyable handle to the shared [`Navigation`] state.
#[derive(Clone, Copy)]
pub struct SidebarHandle {
    nav: Signal<Navigation<PlatformStore>>,
}

impl SidebarHandle {
    pub fn state(&self) -> NavState {
        self.nav.read().state().clone()
    }

    pub fn toggle(&mut self) {
        self.nav.write().toggle_sidebar();
    }

    /// Record a route change. Closes the mobile drawer even when `path` is
    /// already the active tab.
    pub fn navigate(&mut self, path: &str) {
        let stale = {
            let nav = self.nav.peek();
            nav.state().active_tab != path || nav.state().is_mobile_open
        };
        if stale {
            self.nav.write().navigate(path);
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        if self.nav.peek().state().viewport != viewport {
            self.nav.write().set_viewport(viewport);
        }
    }

    pub fn set_mobile_open(&mut self, open: bool) {
        self.nav.write().set_mobile_open(open);
    }

    pub fn set_notifications(&mut self, count: u32) {
        if self.nav.peek().state().notification_count != count {
            self.nav.write().set_notifications(count);
        }
    }

    pub fn clear_notifications(&mut self) {
        self.set_notifications(0);
    }
}

pub fn use_sidebar() -> SidebarHandle {
    use_context::<SidebarHandle>()
}

/// Provider for navigation state. Watches the viewport on web.
#[component]
pub fn SidebarProvider(
    /// Where the collapse preference is kept.
    storage: PlatformStore,
    /// Widths below this many pixels are treated as mobile.
    #[props(default = 768)]
    breakpoint: u32,
    children: Element,
) -> Element {
    let nav = use_signal(|| Navigation::new(storage.clone(), current_viewport(breakpoint)));
    let mut handle = use_context_provider(|| SidebarHandle { nav });

    let resize = use_coroutine(move |mut widths: UnboundedReceiver<f64>| async move {
        while let Some(width) = widths.next().await {
            handle.set_viewport(Viewport::classify(width, breakpoint));
        }
    });

    use_hook(move || watch_viewport(resize.tx()));

    rsx! {
        {children}
    }
}

#[cfg(target_arch = "wasm32")]
fn current_viewport(breakpoint: u32) -> Viewport {
    viewport_width()
        .map(|width| Viewport::classify(width, breakpoint))
        .unwrap_or(Viewport::Desktop)
}

#[cfg(not(target_arch = "wasm32"))]
fn current_viewport(_breakpoint: u32) -> Viewport {
    Viewport::Desktop
}

#[cfg(target_arch = "wasm32")]
fn viewport_width() -> Option<f64> {
    web_sys::window()?.inner_width().ok()?.as_f64()
}

/// Forward window widths to `tx` on every resize.
#[cfg(target_arch = "wasm32")]
fn watch_viewport(tx: UnboundedSender<f64>) {
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = Closure::wrap(Box::new(move || {
        if let Some(width) = viewport_width() {
            let _ = tx.unbounded_send(width);
        }
    }) as Box<dyn FnMut()>);

    if let Err(e) =
        window.add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
    {
        tracing::warn!("Failed to watch viewport: {e:?}");
    }
    // Listener lives as long as the page.
    callback.forget();
}

#[cfg(not(target_arch = "wasm32"))]
fn watch_viewport(_tx: UnboundedSender<f64>) {}
