//! Checkout Web Frontend
//!
//! Leptos-based WASM checkout page. Form state is a
//! [`checkout_core::CheckoutState`] held in a signal; gateway calls go
//! through [`checkout_gateway::HttpGateway`].

mod api;
mod app;
mod components;
mod pages;
mod store;

pub use app::App;
pub use store::Store;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
