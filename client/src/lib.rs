//! # repaint-console
//!
//! Leptos + WASM operator console for the device repair workshop.
//!
//! This crate contains pages, components, application state, and the typed
//! REST client. The `repaint-server` binary renders it on the server and
//! proxies `/api` to the upstream repair-tracking service.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: attach to the server-rendered markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
