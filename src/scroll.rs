//! Scroll state of the grid viewport.
//!
//! Offsets are content offsets: `(0, 0)` shows the top-left of the content
//! and scrolling toward the end makes them negative. They are clamped so the
//! content never scrolls past its trailing edge.

use crate::types::{Rect, Size};

/// Previous offsets, reported by every call that moved the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollChange {
    pub prev_x: i32,
    pub prev_y: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollManager {
    sx: i32,
    sy: i32,
    min_x: i32,
    min_y: i32,
}

impl ScrollManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn sx(&self) -> i32 {
        self.sx
    }

    pub const fn sy(&self) -> i32 {
        self.sy
    }

    /// Most negative offsets currently allowed.
    pub const fn limits(&self) -> (i32, i32) {
        (self.min_x, self.min_y)
    }

    /// Derive the limits from the content and viewport sizes and pull the
    /// current offsets back inside them.
    pub fn set_limits(&mut self, content: Size, viewport: Size) -> Option<ScrollChange> {
        self.min_x = -(content.width - viewport.width).max(0);
        self.min_y = -(content.height - viewport.height).max(0);
        self.scroll_to(self.sx, self.sy)
    }

    pub fn scroll_to(&mut self, x: i32, y: i32) -> Option<ScrollChange> {
        let x = x.clamp(self.min_x, 0);
        let y = y.clamp(self.min_y, 0);
        if x == self.sx && y == self.sy {
            return None;
        }
        let change = ScrollChange {
            prev_x: self.sx,
            prev_y: self.sy,
        };
        self.sx = x;
        self.sy = y;
        Some(change)
    }

    pub fn scroll_by(&mut self, dx: i32, dy: i32) -> Option<ScrollChange> {
        self.scroll_to(self.sx.saturating_add(dx), self.sy.saturating_add(dy))
    }

    /// Scroll just enough for `target` (unscrolled content coordinates) to
    /// lie inside `area`.
    pub fn make_visible(&mut self, target: Rect, area: Rect) -> Option<ScrollChange> {
        let (x, y) = calc_origin(target, area, self.sx, self.sy);
        self.scroll_to(x, y)
    }
}

/// Offsets that bring `target` into `area`, moving as little as possible
/// from `(sx, sy)`. When the target is larger than the area its top-left
/// corner wins. An empty area yields `(0, 0)`.
pub fn calc_origin(target: Rect, area: Rect, sx: i32, sy: i32) -> (i32, i32) {
    if area.is_empty() {
        return (0, 0);
    }
    let (mut px, mut py) = (sx, sy);
    if target.right() + px > area.right() {
        px -= target.right() + px - area.right();
    }
    if target.bottom() + py > area.bottom() {
        py -= target.bottom() + py - area.bottom();
    }
    if target.x + px < area.x {
        px += area.x - target.x - px;
    }
    if target.y + py < area.y {
        py += area.y - target.y - py;
    }
    (px, py)
}
