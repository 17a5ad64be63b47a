//! Layout engine for cell sizes and the visible cell window.
//!
//! This module handles:
//! - Row heights and column widths, fixed or derived from content
//! - Pixel positions walked from the nearest known anchor
//! - The incrementally maintained window of visible rows and columns

mod metrics;
mod window;

pub use metrics::{CellMetrics, Sizing};
pub use window::{scan, Anchor, AxisSpan, AxisWindow, Direction, Pending, ScanMode, VisibilityWindow};

use std::fmt;

/// One of the two grid axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Rows,
    Cols,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rows => f.write_str("row"),
            Self::Cols => f.write_str("column"),
        }
    }
}
