//! Paint surface trait for pluggable rendering implementations.
//!
//! The grid paints through `PaintSurface` so that the same paint pass can
//! target a Canvas 2D context, a test recorder, or any other backend.

use crate::render::Color;
use crate::types::Rect;

/// Drawing primitives the grid needs.
///
/// `save`/`restore` bracket transform and clip changes; implementations keep
/// a stack. The grid guarantees every `save` it issues is matched by a
/// `restore`, including when a cell view fails mid-paint.
pub trait PaintSurface {
    /// Push the current transform and clip.
    fn save(&mut self);

    /// Pop the transform and clip pushed by the matching `save`.
    fn restore(&mut self);

    /// Shift the origin of subsequent drawing.
    fn translate(&mut self, dx: i32, dy: i32);

    /// Intersect the clip with `rect` (in current coordinates).
    fn clip_rect(&mut self, rect: Rect);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Axis-aligned line of the given thickness.
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, width: i32, color: Color);

    /// Draw `text` with its top-left corner at `(x, y)`.
    fn fill_text(&mut self, text: &str, x: i32, y: i32, color: Color);
}
