//! Row heights, column widths and the two sizing strategies.
//!
//! Sizes live in two plain arrays whose lengths always match the model's row
//! and column counts. Totals are cached and kept current by applying the
//! delta of every mutation, so no setter ever re-sums an axis.

use std::ops::Range;

use super::{Anchor, Axis};
use crate::config::GridConfig;
use crate::error::{GridError, Result};
use crate::model::MatrixModel;
use crate::provider::ViewProvider;
use crate::types::{Insets, Size};

/// How row and column sizes are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sizing {
    /// Default sizes, changed only through explicit setters.
    #[default]
    Fixed,
    /// Largest preferred size of the cell views on each line, plus insets.
    Preferred,
}

/// Per-row and per-column pixel sizes of a grid.
#[derive(Debug, Clone)]
pub struct CellMetrics {
    col_widths: Vec<i32>,
    row_heights: Vec<i32>,
    cell_insets: Insets,
    line_size: i32,
    default_col_width: i32,
    default_row_height: i32,
    sum_widths: i64,
    sum_heights: i64,
    sizing: Sizing,
    /// Bumped on every column width change
    revision: u64,
}

impl CellMetrics {
    pub fn new(config: &GridConfig) -> Self {
        Self {
            col_widths: Vec::new(),
            row_heights: Vec::new(),
            cell_insets: config.cell_insets,
            line_size: config.line_size.max(0),
            default_col_width: config.default_col_width.max(0),
            default_row_height: config.default_row_height.max(0),
            sum_widths: 0,
            sum_heights: 0,
            sizing: if config.use_ps_metric {
                Sizing::Preferred
            } else {
                Sizing::Fixed
            },
            revision: 0,
        }
    }

    pub fn rows(&self) -> usize {
        self.row_heights.len()
    }

    pub fn cols(&self) -> usize {
        self.col_widths.len()
    }

    pub const fn line_size(&self) -> i32 {
        self.line_size
    }

    pub const fn cell_insets(&self) -> Insets {
        self.cell_insets
    }

    pub const fn sizing(&self) -> Sizing {
        self.sizing
    }

    pub fn set_sizing(&mut self, sizing: Sizing) {
        self.sizing = sizing;
    }

    pub const fn revision(&self) -> u64 {
        self.revision
    }

    pub fn col_widths(&self) -> &[i32] {
        &self.col_widths
    }

    pub fn row_heights(&self) -> &[i32] {
        &self.row_heights
    }

    pub fn sizes(&self, axis: Axis) -> &[i32] {
        match axis {
            Axis::Rows => &self.row_heights,
            Axis::Cols => &self.col_widths,
        }
    }

    /// Column width, 0 when out of range.
    pub fn col_width(&self, col: usize) -> i32 {
        self.col_widths.get(col).copied().unwrap_or(0)
    }

    /// Row height, 0 when out of range.
    pub fn row_height(&self, row: usize) -> i32 {
        self.row_heights.get(row).copied().unwrap_or(0)
    }

    /// Sum of all column widths, excluding grid lines.
    pub fn sum_widths(&self) -> i64 {
        self.sum_widths
    }

    /// Sum of all row heights, excluding grid lines.
    pub fn sum_heights(&self) -> i64 {
        self.sum_heights
    }

    /// Full content extent along an axis: sizes plus a line before every
    /// cell and one after the last. Zero for an empty axis.
    pub fn extent(&self, axis: Axis) -> i32 {
        let (count, sum) = match axis {
            Axis::Rows => (self.row_heights.len(), self.sum_heights),
            Axis::Cols => (self.col_widths.len(), self.sum_widths),
        };
        if count == 0 {
            return 0;
        }
        let lines = i64::from(self.line_size) * i64::try_from(count + 1).unwrap_or(i64::MAX);
        i32::try_from(sum.saturating_add(lines)).unwrap_or(i32::MAX)
    }

    /// Resize both arrays to the model dimensions. New slots take the
    /// default sizes; shrinking truncates. Returns whether anything changed.
    pub fn sync_dims(&mut self, rows: usize, cols: usize) -> bool {
        let rows_changed = resize_axis(
            &mut self.row_heights,
            &mut self.sum_heights,
            rows,
            self.default_row_height,
        );
        let cols_changed = resize_axis(
            &mut self.col_widths,
            &mut self.sum_widths,
            cols,
            self.default_col_width,
        );
        if cols_changed {
            self.revision += 1;
        }
        if rows_changed || cols_changed {
            tracing::debug!(target: "grid.metrics", rows, cols, "metrics resized");
        }
        rows_changed || cols_changed
    }

    /// Set one column width. Returns the pixel delta applied.
    pub fn set_col_width(&mut self, col: usize, width: i32) -> Result<i32> {
        let len = self.col_widths.len();
        let slot = self
            .col_widths
            .get_mut(col)
            .ok_or_else(|| GridError::out_of_range(Axis::Cols, col, len))?;
        let delta = width.max(0) - *slot;
        *slot += delta;
        self.sum_widths += i64::from(delta);
        if delta != 0 {
            self.revision += 1;
            tracing::debug!(target: "grid.metrics", col, width, delta, "column width set");
        }
        Ok(delta)
    }

    /// Set one row height. Returns the pixel delta applied.
    pub fn set_row_height(&mut self, row: usize, height: i32) -> Result<i32> {
        let len = self.row_heights.len();
        let slot = self
            .row_heights
            .get_mut(row)
            .ok_or_else(|| GridError::out_of_range(Axis::Rows, row, len))?;
        let delta = height.max(0) - *slot;
        *slot += delta;
        self.sum_heights += i64::from(delta);
        if delta != 0 {
            tracing::debug!(target: "grid.metrics", row, height, delta, "row height set");
        }
        Ok(delta)
    }

    /// Set a range of columns to the same width. Returns the summed delta.
    pub fn set_cols_width(&mut self, cols: Range<usize>, width: i32) -> Result<i32> {
        self.check_range(Axis::Cols, &cols)?;
        cols.map(|c| self.set_col_width(c, width)).sum()
    }

    /// Set a range of rows to the same height. Returns the summed delta.
    pub fn set_rows_height(&mut self, rows: Range<usize>, height: i32) -> Result<i32> {
        self.check_range(Axis::Rows, &rows)?;
        rows.map(|r| self.set_row_height(r, height)).sum()
    }

    fn check_range(&self, axis: Axis, range: &Range<usize>) -> Result<()> {
        let len = self.sizes(axis).len();
        if range.end > len {
            return Err(GridError::out_of_range(axis, range.end.saturating_sub(1), len));
        }
        Ok(())
    }

    /// Position of `index` along `axis`.
    ///
    /// Walks from `anchor` when given (normally the first visible index),
    /// otherwise from `origin`, the position of index 0. The cost is
    /// proportional to the distance from the starting point.
    pub fn position(&self, axis: Axis, anchor: Option<Anchor>, origin: i32, index: usize) -> i32 {
        let sizes = self.sizes(axis);
        let step = |i: usize| sizes.get(i).copied().unwrap_or(0) + self.line_size;
        let start = anchor.unwrap_or(Anchor::new(0, origin));
        if index >= start.index {
            start.pos + (start.index..index).map(step).sum::<i32>()
        } else {
            start.pos - (index..start.index).map(step).sum::<i32>()
        }
    }

    /// Recompute every size from the preferred sizes of the cell views.
    ///
    /// O(rows × cols): only run when the preferred-size strategy is active
    /// and the layout was invalidated. `caption` holds per-column title
    /// sizes folded into the column widths.
    pub fn recalc_preferred(
        &mut self,
        model: &dyn MatrixModel,
        views: &dyn ViewProvider,
        caption: Option<&[Size]>,
    ) {
        let rows = model.rows();
        let cols = model.cols();
        let mut widths = vec![0; cols];
        let mut heights = vec![0; rows];
        let add_w = self.cell_insets.horizontal();
        let add_h = self.cell_insets.vertical();

        for (row, height) in heights.iter_mut().enumerate() {
            for (col, width) in widths.iter_mut().enumerate() {
                let Some(view) = views.view(row, col, model.get(row, col)) else {
                    continue;
                };
                let ps = view.preferred_size();
                *width = (*width).max(ps.width + add_w);
                *height = (*height).max(ps.height + add_h);
            }
        }

        if let Some(titles) = caption {
            for (width, title) in widths.iter_mut().zip(titles) {
                *width = (*width).max(title.width);
            }
        }

        self.sum_widths = widths.iter().map(|&w| i64::from(w)).sum();
        self.sum_heights = heights.iter().map(|&h| i64::from(h)).sum();
        self.col_widths = widths;
        self.row_heights = heights;
        self.revision += 1;
        tracing::debug!(target: "grid.metrics", rows, cols, "preferred sizes recomputed");
    }
}

fn resize_axis(sizes: &mut Vec<i32>, sum: &mut i64, len: usize, default: i32) -> bool {
    let old = sizes.len();
    if old == len {
        return false;
    }
    if len < old {
        *sum -= sizes.drain(len..).map(i64::from).sum::<i64>();
    } else {
        sizes.resize(len, default);
        *sum += i64::from(default) * i64::try_from(len - old).unwrap_or(0);
    }
    true
}
