//! Proportional column stretching.
//!
//! `StretchLayout` owns a grid and keeps its column widths summing to the
//! available width exactly. Each column keeps its share of the total across
//! container resizes; the shares are re-derived only after a column was
//! resized by hand or changed from outside.

use crate::error::Result;
use crate::grid::Grid;
use crate::types::{Rect, Size};

/// Caption drag in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColDrag {
    col: usize,
    start_x: i32,
    start_width: i32,
}

#[derive(Debug)]
pub struct StretchLayout {
    grid: Grid,
    proportions: Vec<f64>,
    dirty: bool,
    /// Metrics revision after the layout's own last write
    seen_revision: Option<u64>,
    drag: Option<ColDrag>,
}

impl StretchLayout {
    /// Take over `grid`. Stretched widths are explicit sizes, so the grid is
    /// switched to fixed sizing.
    pub fn new(mut grid: Grid) -> Self {
        grid.set_use_ps_metric(false);
        Self {
            grid,
            proportions: Vec::new(),
            dirty: true,
            seen_revision: None,
            drag: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable grid access. Column widths changed through it are noticed on
    /// the next layout and become the new proportions.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Current column shares, summing to 1.
    pub fn proportions(&self) -> &[f64] {
        &self.proportions
    }

    /// Resize the container and stretch the columns to the new width.
    pub fn set_size(&mut self, width: i32, height: i32) -> Result<()> {
        let b = self.grid.bounds();
        self.grid.set_bounds(Rect::new(b.x, b.y, width, height));
        self.do_layout()
    }

    /// Width left for the columns once grid insets and lines are taken.
    pub fn available_width(&self) -> i32 {
        let metrics = self.grid.metrics();
        let cols = i32::try_from(metrics.cols()).unwrap_or(i32::MAX);
        let lines = metrics.line_size().saturating_mul(cols.saturating_add(1));
        (self.grid.bounds().width - self.grid.config().insets.horizontal() - lines).max(0)
    }

    pub fn calc_preferred_size(&mut self) -> Size {
        self.grid.calc_preferred_size()
    }

    pub fn do_layout(&mut self) -> Result<()> {
        self.grid.validate();
        let cols = self.grid.metrics().cols();
        if cols == 0 {
            self.proportions.clear();
            return Ok(());
        }
        let external = self.seen_revision != Some(self.grid.metrics().revision());
        if self.dirty || external || self.proportions.len() != cols {
            self.recalc_proportions();
        }

        let available = self.available_width();
        let widths = distribute(available, &self.proportions);
        for (col, width) in widths.into_iter().enumerate() {
            self.grid.set_col_width(col, width)?;
        }
        self.seen_revision = Some(self.grid.metrics().revision());
        tracing::trace!(target: "grid.stretch", available, cols, "columns stretched");
        Ok(())
    }

    fn recalc_proportions(&mut self) {
        let widths: Vec<i32> = self
            .grid
            .metrics()
            .col_widths()
            .iter()
            .enumerate()
            .map(|(col, &w)| if w > 0 { w } else { self.grid.preferred_col_width(col) })
            .collect();
        let total: i64 = widths.iter().map(|&w| i64::from(w.max(0))).sum();
        let count = widths.len();
        self.proportions = if total > 0 {
            #[allow(clippy::cast_precision_loss)]
            let total = total as f64;
            widths.iter().map(|&w| f64::from(w.max(0)) / total).collect()
        } else {
            #[allow(clippy::cast_precision_loss)]
            let share = 1.0 / count as f64;
            vec![share; count]
        };
        self.dirty = false;
        tracing::trace!(target: "grid.stretch", ?widths, "proportions recomputed");
    }

    /// Resize `col` by hand. The difference is taken from (or given to) the
    /// next column, which never drops below the minimum width; if it would,
    /// `col` is clamped instead. The last column cannot be resized.
    pub fn resize_col(&mut self, col: usize, width: i32) -> Result<()> {
        let metrics = self.grid.metrics();
        if col + 1 >= metrics.cols() {
            return Ok(());
        }
        let min = self.grid.config().min_col_width;
        let current = metrics.col_width(col);
        let next = metrics.col_width(col + 1);
        let width = width.max(min);
        let (width, next_width) = match next - (width - current) {
            n if n < min => (current + next - min, min),
            n => (width, n),
        };
        self.grid.set_col_width(col, width)?;
        self.grid.set_col_width(col + 1, next_width)?;
        self.seen_revision = Some(self.grid.metrics().revision());
        self.dirty = true;
        Ok(())
    }

    /// Start a caption drag when the pointer is on a column edge.
    pub fn pointer_pressed(&mut self, x: i32, y: i32) -> bool {
        self.drag = self.grid.caption_edge_at(x, y).map(|col| ColDrag {
            col,
            start_x: x,
            start_width: self.grid.metrics().col_width(col),
        });
        self.drag.is_some()
    }

    pub fn pointer_dragged(&mut self, x: i32, _y: i32) -> Result<bool> {
        let Some(drag) = self.drag else {
            return Ok(false);
        };
        self.resize_col(drag.col, drag.start_width + (x - drag.start_x))?;
        Ok(true)
    }

    pub fn pointer_released(&mut self) -> bool {
        self.drag.take().is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}

/// Split `available` by `proportions`. Every column but the last is rounded;
/// the last takes the remainder so the sum is exact. Rounding overshoot is
/// taken back from the widest columns.
fn distribute(available: i32, proportions: &[f64]) -> Vec<i32> {
    let Some((_, head)) = proportions.split_last() else {
        return Vec::new();
    };
    let mut widths: Vec<i32> = head
        .iter()
        .map(|&p| round_px(p * f64::from(available)))
        .collect();
    let mut last = available - widths.iter().sum::<i32>();
    while last < 0 {
        let Some(widest) = widths.iter_mut().max_by_key(|w| **w) else {
            break;
        };
        let take = (-last).min(*widest);
        if take == 0 {
            break;
        }
        *widest -= take;
        last += take;
    }
    widths.push(last.max(0));
    widths
}

#[allow(clippy::cast_possible_truncation)]
fn round_px(v: f64) -> i32 {
    v.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}
