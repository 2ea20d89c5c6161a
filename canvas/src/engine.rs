use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use wardrobe_draft::camera::Point;
use wardrobe_draft::engine::{Action, EngineCore};
use wardrobe_draft::input::ZoomDirection;
use wardrobe_draft::profile::ViewerProfile;
use wardrobe_draft::render::{RedrawOutcome, Surface};

use crate::paint::CanvasSurface;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Backing-store pixels for a CSS length at the given device pixel ratio.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn backing_px(css: f64, dpr: f64) -> u32 {
    let px = (css * dpr).round();
    if px.is_finite() && px > 0.0 { px.min(f64::from(u32::MAX)) as u32 } else { 0 }
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// The drawing engine bound to one canvas element.
///
/// Every method that depends on time takes `now` in milliseconds
/// (`performance.now()` or the `requestAnimationFrame` timestamp).
#[wasm_bindgen]
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    core: EngineCore,
    on_clear_highlight: Option<js_sys::Function>,
    on_view_change: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl Engine {
    /// Bind to `canvas` with the `rich` or `simple` viewer profile.
    ///
    /// # Errors
    ///
    /// Fails if the element has no 2D context.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, profile: &str) -> Result<Engine, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let profile = ViewerProfile::by_name(profile).unwrap_or_else(|| {
            tracing::warn!(profile, "unknown viewer profile, using rich");
            ViewerProfile::rich()
        });
        Ok(Self { canvas, ctx, core: EngineCore::new(profile), on_clear_highlight: None, on_view_change: None })
    }

    // --- Host callbacks ---

    /// Called with no arguments when a click asks for the active field to be cleared.
    #[wasm_bindgen(js_name = onClearHighlight)]
    pub fn on_clear_highlight(&mut self, callback: js_sys::Function) {
        self.on_clear_highlight = Some(callback);
    }

    /// Called with the new view name (`front`, `top`, `left`, `right`).
    #[wasm_bindgen(js_name = onViewChange)]
    pub fn on_view_change(&mut self, callback: js_sys::Function) {
        self.on_view_change = Some(callback);
    }

    fn handle(&self, actions: Vec<Action>) {
        for action in actions {
            let result = match (&action, &self.on_clear_highlight, &self.on_view_change) {
                (Action::ClearHighlight, Some(callback), _) => callback.call0(&JsValue::NULL),
                (Action::ViewChanged(view), _, Some(callback)) => {
                    callback.call1(&JsValue::NULL, &JsValue::from_str(view.as_str()))
                }
                _ => continue,
            };
            if let Err(err) = result {
                tracing::warn!(?action, ?err, "host callback failed");
            }
        }
    }

    // --- Data inputs ---

    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&mut self, json: &str, now: f64) {
        let actions = self.core.set_config_json(json, now);
        self.handle(actions);
    }

    /// Name of the focused form control, or `undefined` when none.
    #[wasm_bindgen(js_name = setActiveField)]
    pub fn set_active_field(&mut self, name: Option<String>, now: f64) {
        self.core.set_active_field(name.as_deref(), now);
    }

    /// # Errors
    ///
    /// Fails for an unknown view name.
    #[wasm_bindgen(js_name = setView)]
    pub fn set_view(&mut self, name: &str, now: f64) -> Result<(), JsValue> {
        let actions = self.core.set_view_name(name, now).map_err(to_js)?;
        self.handle(actions);
        Ok(())
    }

    #[wasm_bindgen(js_name = setHideViewSwitch)]
    pub fn set_hide_view_switch(&mut self, hide: bool) {
        self.core.hide_view_switch = hide;
    }

    #[wasm_bindgen(js_name = viewSwitchVisible)]
    #[must_use]
    pub fn view_switch_visible(&self) -> bool {
        self.core.view_switch_visible()
    }

    // --- Viewport ---

    /// Re-read the element's CSS size and the device pixel ratio and size the
    /// backing store to match.
    pub fn resize(&mut self, now: f64) {
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        let width = f64::from(self.canvas.client_width());
        let height = f64::from(self.canvas.client_height());
        self.core.set_viewport(width, height, dpr, now);
        self.canvas.set_width(backing_px(width, self.core.dpr));
        self.canvas.set_height(backing_px(height, self.core.dpr));
    }

    // --- Input events ---

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f64, y: f64, now: f64) {
        let actions = self.core.on_pointer_down(Point::new(x, y), now);
        self.handle(actions);
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64, now: f64) {
        let actions = self.core.on_pointer_move(Point::new(x, y), now);
        self.handle(actions);
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, now: f64) {
        let actions = self.core.on_pointer_up(now);
        self.handle(actions);
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self, now: f64) {
        let actions = self.core.on_pointer_leave(now);
        self.handle(actions);
    }

    /// `deltaY` of a wheel event; positive zooms out.
    pub fn wheel(&mut self, delta_y: f64, now: f64) {
        let actions = self.core.on_wheel(delta_y, now);
        self.handle(actions);
    }

    #[wasm_bindgen(js_name = zoomIn)]
    pub fn zoom_in(&mut self, now: f64) {
        let actions = self.core.on_zoom_button(ZoomDirection::In, now);
        self.handle(actions);
    }

    #[wasm_bindgen(js_name = zoomOut)]
    pub fn zoom_out(&mut self, now: f64) {
        let actions = self.core.on_zoom_button(ZoomDirection::Out, now);
        self.handle(actions);
    }

    // --- Render ---

    /// Drive from `requestAnimationFrame`. Repaints when something is due and
    /// returns whether it did.
    pub fn frame(&mut self, now: f64) -> bool {
        if !self.core.frame(now) {
            return false;
        }
        self.render();
        true
    }

    /// Repaint immediately.
    pub fn render(&self) {
        let mut surface = CanvasSurface::new(&self.canvas, &self.ctx);
        if let Err(error) = surface.set_pixel_ratio(self.core.dpr) {
            tracing::error!(%error, "could not set pixel ratio");
            return;
        }
        match self.core.render(&mut surface) {
            RedrawOutcome::Drawn => {}
            RedrawOutcome::Skipped => tracing::debug!(size = ?surface.size(), "canvas hidden"),
            RedrawOutcome::Failed(error) => tracing::debug!(%error, "frame dropped"),
        }
    }

    // --- Queries ---

    /// The current scene (geometry and dimension lines) as JSON.
    ///
    /// # Errors
    ///
    /// Fails if the scene cannot be serialized.
    #[wasm_bindgen(js_name = sceneJson)]
    pub fn scene_json(&self) -> Result<String, JsValue> {
        self.core.scene_json().map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.core.camera().zoom
    }

    #[wasm_bindgen(getter)]
    #[must_use]
    pub fn view(&self) -> String {
        self.core.view().as_str().to_owned()
    }
}
