//! Browser 2d-context canvas.

use std::f64::consts::TAU;

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::Canvas;
use crate::host::Viewport;

/// A `<canvas>` element and its 2d context.
pub struct Canvas2d {
    element: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl Canvas2d {
    pub fn new(element: HtmlCanvasElement, context: CanvasRenderingContext2d) -> Self {
        Self { element, context }
    }

    /// The underlying element.
    pub fn element(&self) -> &HtmlCanvasElement {
        &self.element
    }
}

impl Canvas for Canvas2d {
    fn configure(&mut self, viewport: &Viewport) {
        let (width, height) = viewport.backing_size();
        self.element.set_width(width);
        self.element.set_height(height);

        // Resizing the buffer resets the transform; draw in logical units.
        let s = f64::from(viewport.scale);
        if let Err(err) = self.context.set_transform(s, 0.0, 0.0, s, 0.0, 0.0) {
            log::warn!("setTransform failed: {:?}", err);
        }
    }

    fn clear(&mut self, width: f32, height: f32) {
        self.context
            .clear_rect(0.0, 0.0, f64::from(width), f64::from(height));
    }

    fn set_line_width(&mut self, width: f32) {
        self.context.set_line_width(f64::from(width));
    }

    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, style: &str) {
        let ctx = &self.context;
        ctx.set_stroke_style_str(style);
        ctx.begin_path();
        ctx.move_to(f64::from(x0), f64::from(y0));
        ctx.line_to(f64::from(x1), f64::from(y1));
        ctx.stroke();
    }

    fn set_fill(&mut self, style: &str) {
        self.context.set_fill_style_str(style);
    }

    fn fill_circle(&mut self, x: f32, y: f32, r: f32) {
        let ctx = &self.context;
        ctx.begin_path();
        // arc only fails for a negative radius
        if ctx
            .arc(f64::from(x), f64::from(y), f64::from(r), 0.0, TAU)
            .is_ok()
        {
            ctx.fill();
        }
    }
}
