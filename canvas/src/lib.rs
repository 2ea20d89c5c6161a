//! Browser shell for the wardrobe drawing engine.
//!
//! This crate is compiled to WebAssembly. It binds
//! [`wardrobe_draft::engine::EngineCore`] to an `HtmlCanvasElement`: the host
//! page forwards DOM events and `requestAnimationFrame` timestamps, and the
//! engine decides when to repaint. All geometry stays in CSS pixels; the
//! backing store is sized by the device pixel ratio and the context scaled to
//! match.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | `#[wasm_bindgen]` [`engine::Engine`] and host callbacks |
//! | [`paint`] | [`wardrobe_draft::render::Surface`] over `CanvasRenderingContext2d` |

pub mod engine;
pub mod paint;

use wasm_bindgen::prelude::*;

/// Module start: panic messages and engine logs go to the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    match console_log::init_with_level(log::Level::Info) {
        Ok(()) => tracing::debug!("console logging installed"),
        Err(err) => tracing::warn!(%err, "console logger already installed"),
    }
}
