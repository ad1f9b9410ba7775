//! PlantAI Web App (Leptos + WASM)

mod api;
mod app;
mod blob_url;
mod components;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    leptos::mount::mount_to_body(app::App);
}
