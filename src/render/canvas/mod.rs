//! Canvas 2D paint surface.
//!
//! Paints the grid into an HTML canvas via web-sys. The context is expected
//! to already carry any device-pixel-ratio scaling, so all coordinates are
//! logical (CSS) pixels.

use web_sys::CanvasRenderingContext2d;

use super::{Color, PaintSurface};
use crate::types::Rect;

/// Default font used for cell text.
const DEFAULT_FONT: &str = "13px sans-serif";

/// Helper to get crisp pixel position for 1px lines
fn crisp(x: f64) -> f64 {
    x.floor() + 0.5
}

/// `PaintSurface` backed by a `CanvasRenderingContext2d`.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    font: String,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self {
            ctx,
            font: DEFAULT_FONT.to_string(),
        }
    }

    /// Use a CSS font string for subsequent text.
    pub fn set_font(&mut self, font: &str) {
        self.font = font.to_string();
    }

    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }
}

impl PaintSurface for CanvasSurface {
    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        let _ = self.ctx.translate(f64::from(dx), f64::from(dy));
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.ctx.begin_path();
        self.ctx.rect(
            f64::from(rect.x),
            f64::from(rect.y),
            f64::from(rect.width),
            f64::from(rect.height),
        );
        self.ctx.clip();
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.set_fill_style_str(&color.to_hex());
        self.ctx.fill_rect(
            f64::from(rect.x),
            f64::from(rect.y),
            f64::from(rect.width),
            f64::from(rect.height),
        );
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, width: i32, color: Color) {
        let (mut fx1, mut fy1, mut fx2, mut fy2) = (
            f64::from(x1),
            f64::from(y1),
            f64::from(x2),
            f64::from(y2),
        );
        // Odd widths straddle pixel centres
        if width % 2 == 1 {
            if x1 == x2 {
                fx1 = crisp(fx1);
                fx2 = fx1;
            }
            if y1 == y2 {
                fy1 = crisp(fy1);
                fy2 = fy1;
            }
        }
        self.ctx.set_stroke_style_str(&color.to_hex());
        self.ctx.set_line_width(f64::from(width));
        self.ctx.begin_path();
        self.ctx.move_to(fx1, fy1);
        self.ctx.line_to(fx2, fy2);
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, x: i32, y: i32, color: Color) {
        self.ctx.set_font(&self.font);
        self.ctx.set_text_baseline("top");
        self.ctx.set_fill_style_str(&color.to_hex());
        if let Err(e) = self.ctx.fill_text(text, f64::from(x), f64::from(y)) {
            tracing::warn!(target: "grid.paint", error = ?e, "fill_text failed");
        }
    }
}
