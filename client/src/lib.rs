pub mod engine;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    init_logging();
}

#[cfg(feature = "browser_log")]
fn init_logging() {
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::warn_1(&"logger already installed".into());
    }
}

#[cfg(not(feature = "browser_log"))]
fn init_logging() {}
