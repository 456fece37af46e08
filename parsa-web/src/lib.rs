//! Parsa Web
//!
//! Yew front end of the Parsa language institute site. All routing, selection
//! and overlay rules live in `parsa-core`; this crate wires them to the
//! browser: location fragment, `fetch`, storage and rendering.

#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod a11y;
pub mod api;
pub mod app;
pub mod components;
pub mod dom;
pub mod i18n;
pub mod paths;
pub mod storage;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    dom::init_logging(if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    });
    // Apply <html lang, dir> for the saved locale before the first render
    crate::i18n::set_lang(&crate::i18n::current_lang());
    yew::Renderer::<app::App>::new().render();
}
