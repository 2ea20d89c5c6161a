//! Painting onto a 2D canvas context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! Callers set the device-pixel-ratio transform before handing the surface to
//! the engine, so every coordinate here is in CSS pixels.

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use wardrobe_draft::camera::Point;
use wardrobe_draft::error::RenderError;
use wardrobe_draft::geometry::Rect;
use wardrobe_draft::render::Surface;
use wardrobe_draft::scale::Viewport;

fn surface_error(value: JsValue) -> RenderError {
    RenderError::Surface(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

fn font(px: f64) -> String {
    format!("{px:.0}px sans-serif")
}

pub struct CanvasSurface<'a> {
    canvas: &'a HtmlCanvasElement,
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasSurface<'a> {
    #[must_use]
    pub fn new(canvas: &'a HtmlCanvasElement, ctx: &'a CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }

    /// Scale the context so one unit is one CSS pixel.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Surface` if the context rejects the transform.
    pub fn set_pixel_ratio(&self, dpr: f64) -> Result<(), RenderError> {
        self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0).map_err(surface_error)
    }
}

impl Surface for CanvasSurface<'_> {
    /// CSS size of the element as laid out right now.
    fn size(&self) -> Viewport {
        Viewport::new(f64::from(self.canvas.client_width()), f64::from(self.canvas.client_height()))
    }

    fn clear(&mut self, width: f64, height: f64) -> Result<(), RenderError> {
        self.ctx.clear_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) -> Result<(), RenderError> {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, color: &str, line_width: f64) -> Result<(), RenderError> {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width);
        self.ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
        Ok(())
    }

    fn line(&mut self, from: Point, to: Point, color: &str, line_width: f64) -> Result<(), RenderError> {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width);
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
        Ok(())
    }

    fn measure_text(&mut self, text: &str, font_px: f64) -> Result<f64, RenderError> {
        self.ctx.set_font(&font(font_px));
        let metrics = self.ctx.measure_text(text).map_err(surface_error)?;
        Ok(metrics.width())
    }

    fn fill_text(&mut self, text: &str, at: Point, font_px: f64, color: &str) -> Result<(), RenderError> {
        self.ctx.set_font(&font(font_px));
        self.ctx.set_fill_style_str(color);
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx.fill_text(text, at.x, at.y).map_err(surface_error)
    }
}
