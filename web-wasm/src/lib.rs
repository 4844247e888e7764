//! Resume AI Web App (Leptos + WASM)

mod api;
mod app;
mod components;
mod dispatch;
mod logging;
mod storage;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    logging::init();
    leptos::mount::mount_to_body(app::App);
}
