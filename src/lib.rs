//! gridview - virtualized grid widget engine
//!
//! Renders an arbitrarily large matrix through a fixed viewport, measuring
//! and painting only the rows and columns that intersect it:
//! - Incrementally maintained visible window (scrolls cost O(delta))
//! - Fixed or content-derived row heights and column widths
//! - Row or cell cursor navigation over a single flat offset
//! - Single-row selection and in-place editing with commit/cancel
//! - Proportional column stretching
//!
//! # Usage
//!
//! ```
//! use gridview::{Grid, GridConfig, Rect, RecordingSurface};
//!
//! let mut grid = Grid::with_dimensions(1_000, 5, GridConfig::default());
//! grid.set_bounds(Rect::new(0, 0, 400, 300));
//! grid.scroll_to(0, -2_000);
//!
//! let mut surface = RecordingSurface::new();
//! grid.paint(&mut surface).unwrap();
//! assert!(grid.window().has_visible_cells());
//! ```

pub mod config;
pub mod cursor;
pub mod editor;
pub mod error;
pub mod grid;
pub mod layout;
pub mod model;
pub mod provider;
pub mod render;
pub mod scroll;
pub mod stretch;
pub mod types;

pub use config::{FontMetrics, GridConfig};
pub use cursor::{Cursor, GridMetric, LineDirection, NavigationMode, PosChange, PositionMetric};
pub use editor::{EditState, EditingSession};
pub use error::{GridError, Result};
pub use grid::{Caption, Damage, Grid, GridEvent, HitTarget};
pub use layout::{Anchor, CellMetrics, Sizing, VisibilityWindow};
pub use model::{Matrix, MatrixModel, ModelEvent, SortInfo};
pub use provider::{
    Align, Commitable, DefaultViewProvider, Editor, EditorProvider, TextEditor,
    TextEditorProvider, TextView, View, ViewProvider,
};
pub use render::{palette, Color, DrawOp, PaintSurface, RecordingSurface};
pub use scroll::{ScrollChange, ScrollManager};
pub use stretch::StretchLayout;

pub use types::*;
