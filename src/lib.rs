mod api;
mod app;
mod components;
mod config;
mod content;
mod enhance;
mod logging;
mod models;
mod pages;
mod state;
mod storage;
mod util;

use crate::app::App;
use crate::config::EnvConfig;
use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// WASM-only tests live next to the code they cover (run with
// `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner).
#[cfg(all(test, target_arch = "wasm32"))]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    let config = EnvConfig::new();
    logging::init(&config.log_level);
    tracing::info!(api_url = %config.api_url, "starting notes app");
    mount_to_body(App);
}
