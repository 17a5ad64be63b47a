//! Headless paint surface that records draw calls.
//!
//! Used for tests and for hosts that replay the paint list on their own
//! renderer. Coordinates are recorded after the current translation.

use super::{Color, PaintSurface};
use crate::types::Rect;

/// A recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillRect { rect: Rect, color: Color },
    Line {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        width: i32,
        color: Color,
    },
    Text {
        text: String,
        x: i32,
        y: i32,
        color: Color,
    },
    Clip(Rect),
}

#[derive(Debug, Clone, Copy, Default)]
struct State {
    dx: i32,
    dy: i32,
}

/// Surface that stores every operation in `ops`.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
    state: State,
    stack: Vec<State>,
    max_depth: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `save` calls not yet matched by `restore`.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Deepest save nesting seen so far.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Texts drawn so far, in paint order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Filled rectangles of the given color.
    pub fn fills_of(&self, color: Color) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect { rect, color: c } if *c == color => Some(*rect),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl PaintSurface for RecordingSurface {
    fn save(&mut self) {
        self.stack.push(self.state);
        self.max_depth = self.max_depth.max(self.stack.len());
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.state.dx += dx;
        self.state.dy += dy;
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.ops
            .push(DrawOp::Clip(rect.translate(self.state.dx, self.state.dy)));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::FillRect {
            rect: rect.translate(self.state.dx, self.state.dy),
            color,
        });
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, width: i32, color: Color) {
        let (dx, dy) = (self.state.dx, self.state.dy);
        self.ops.push(DrawOp::Line {
            x1: x1 + dx,
            y1: y1 + dy,
            x2: x2 + dx,
            y2: y2 + dy,
            width,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, x: i32, y: i32, color: Color) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x: x + self.state.dx,
            y: y + self.state.dy,
            color,
        });
    }
}
