//! Browser backend over `CanvasRenderingContext2d`.

use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{
    style::Rgba,
    surface::{DrawSurface, Rect, TextStyle},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanvasError {
    #[error("document unavailable")]
    NoDocument,
    #[error("no canvas element with id `{0}`")]
    MissingElement(String),
    #[error("element `{0}` is not a canvas")]
    NotACanvas(String),
    #[error("2d context unavailable on `{0}`")]
    NoContext(String),
}

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn from_element_id(id: &str) -> Result<Self, CanvasError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(CanvasError::NoDocument)?;
        let canvas = document
            .get_element_by_id(id)
            .ok_or_else(|| CanvasError::MissingElement(id.to_string()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| CanvasError::NotACanvas(id.to_string()))?;
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or_else(|| CanvasError::NoContext(id.to_string()))?;
        Ok(Self { canvas, ctx })
    }

    /// Rendered CSS size of the element, used as the logical chart size.
    pub fn client_size(&self) -> (f64, f64) {
        (
            self.canvas.client_width() as f64,
            self.canvas.client_height() as f64,
        )
    }
}

impl DrawSurface for CanvasSurface {
    fn resize(&mut self, width_px: u32, height_px: u32) {
        // Assigning the size resets the context state and transform.
        self.canvas.set_width(width_px);
        self.canvas.set_height(height_px);
    }

    fn set_scale(&mut self, scale: f64) {
        self.ctx.set_transform(scale, 0.0, 0.0, scale, 0.0, 0.0).ok();
    }

    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Rgba) {
        let ctx = &self.ctx;
        ctx.set_stroke_style_str(&color.to_css());
        ctx.set_line_width(width);
        ctx.begin_path();
        ctx.move_to(from.0, from.1);
        ctx.line_to(to.0, to.1);
        ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) {
        let ctx = &self.ctx;
        let weight = if style.bold { "bold " } else { "" };
        ctx.set_font(&format!("{weight}{}px sans-serif", style.size_px));
        ctx.set_text_align(style.align.as_css());
        ctx.set_text_baseline("alphabetic");
        ctx.set_fill_style_str(&style.color.to_css());
        ctx.fill_text(text, x, y).unwrap_or_default();
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }
}
