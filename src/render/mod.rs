//! Painting primitives with pluggable surfaces.
//!
//! This module provides:
//! - The backend-agnostic `PaintSurface` trait the grid paints through
//! - A recording surface for headless hosts and tests
//! - Canvas 2D surface (wasm32 only)
//! - Color handling

pub mod backend;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod colors;
pub mod recording;

pub use backend::PaintSurface;
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use colors::{palette, Color};
pub use recording::{DrawOp, RecordingSurface};
