//! Offset cursor.
//!
//! The cursor addresses the grid with one flat offset. In row navigation an
//! offset is a row; in cell navigation it is `row * cols + col`. The mapping
//! between offsets and `(line, col)` pairs comes from a [`PositionMetric`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// How the cursor moves over the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationMode {
    /// One offset per row
    #[default]
    Row,
    /// One offset per cell
    Cell,
}

impl FromStr for NavigationMode {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "row" => Ok(Self::Row),
            "cell" => Ok(Self::Cell),
            _ => Err(GridError::UnsupportedNavigationMode(s.to_string())),
        }
    }
}

impl fmt::Display for NavigationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row => f.write_str("row"),
            Self::Cell => f.write_str("cell"),
        }
    }
}

/// Line structure the cursor walks over.
pub trait PositionMetric {
    /// Number of lines.
    fn lines(&self) -> usize;

    /// Number of offsets on `line`.
    fn line_size(&self, line: usize) -> usize;

    /// Largest valid offset, `None` when there is nothing to address.
    fn max_offset(&self) -> Option<usize> {
        let total: usize = (0..self.lines()).map(|l| self.line_size(l)).sum();
        total.checked_sub(1)
    }

    /// `(line, col)` of an offset.
    fn locate(&self, offset: usize) -> (usize, usize) {
        let mut rest = offset;
        for line in 0..self.lines() {
            let size = self.line_size(line);
            if rest < size {
                return (line, rest);
            }
            rest -= size;
        }
        (self.lines().saturating_sub(1), rest)
    }

    /// Offset of `(line, col)`.
    fn offset_at(&self, line: usize, col: usize) -> usize {
        (0..line).map(|l| self.line_size(l)).sum::<usize>() + col
    }
}

/// Row or cell addressing over a `rows × cols` grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridMetric {
    pub rows: usize,
    pub cols: usize,
    pub mode: NavigationMode,
}

impl GridMetric {
    pub const fn new(rows: usize, cols: usize, mode: NavigationMode) -> Self {
        Self { rows, cols, mode }
    }

    const fn per_line(&self) -> usize {
        match self.mode {
            NavigationMode::Row => 1,
            NavigationMode::Cell => self.cols,
        }
    }
}

impl PositionMetric for GridMetric {
    fn lines(&self) -> usize {
        self.rows
    }

    fn line_size(&self, _line: usize) -> usize {
        self.per_line()
    }

    fn max_offset(&self) -> Option<usize> {
        self.rows.checked_mul(self.per_line())?.checked_sub(1)
    }

    fn locate(&self, offset: usize) -> (usize, usize) {
        match self.per_line() {
            0 => (0, 0),
            n => (offset / n, offset % n),
        }
    }

    fn offset_at(&self, line: usize, col: usize) -> usize {
        line * self.per_line() + col
    }
}

/// Previous cursor position, reported by every mutation that moved it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PosChange {
    pub prev_offset: Option<usize>,
    pub prev_line: Option<usize>,
    pub prev_col: Option<usize>,
}

/// Vertical direction for [`Cursor::seek_line_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDirection {
    Up,
    Down,
}

/// Flat offset cursor. `None` means no cursor.
#[derive(Debug, Clone, Default)]
pub struct Cursor<M = GridMetric> {
    offset: Option<usize>,
    line: Option<usize>,
    col: Option<usize>,
    metric: M,
}

impl<M: PositionMetric> Cursor<M> {
    pub fn new(metric: M) -> Self {
        Self {
            offset: None,
            line: None,
            col: None,
            metric,
        }
    }

    pub const fn offset(&self) -> Option<usize> {
        self.offset
    }

    pub const fn line(&self) -> Option<usize> {
        self.line
    }

    pub const fn col(&self) -> Option<usize> {
        self.col
    }

    pub const fn metric(&self) -> &M {
        &self.metric
    }

    pub fn max_offset(&self) -> Option<usize> {
        self.metric.max_offset()
    }

    /// Move to `offset`, clamped to the largest valid offset.
    pub fn set_offset(&mut self, offset: Option<usize>) -> Option<PosChange> {
        let target = match (offset, self.metric.max_offset()) {
            (Some(o), Some(max)) => Some(o.min(max)),
            _ => None,
        };
        if target == self.offset {
            return None;
        }
        let change = PosChange {
            prev_offset: self.offset,
            prev_line: self.line,
            prev_col: self.col,
        };
        self.offset = target;
        match target.map(|o| self.metric.locate(o)) {
            Some((line, col)) => {
                self.line = Some(line);
                self.col = Some(col);
            }
            None => {
                self.line = None;
                self.col = None;
            }
        }
        Some(change)
    }

    /// Move by `delta` offsets, saturating at the first and last offset.
    /// Seeking forward from no cursor lands on offset `delta - 1`.
    pub fn seek(&mut self, delta: isize) -> Option<PosChange> {
        let max = self.metric.max_offset()?;
        let target = match self.offset {
            Some(o) => o.saturating_add_signed(delta),
            None if delta > 0 => delta.unsigned_abs() - 1,
            None => 0,
        };
        self.set_offset(Some(target.min(max)))
    }

    /// Move `count` lines up or down, keeping the column where the target
    /// line is wide enough. Stops at the first and last line.
    pub fn seek_line_to(&mut self, dir: LineDirection, count: usize) -> Option<PosChange> {
        let lines = self.metric.lines();
        if lines == 0 {
            return None;
        }
        let (Some(line), Some(col)) = (self.line, self.col) else {
            return self.set_offset(Some(0));
        };
        let target = match dir {
            LineDirection::Up => line.saturating_sub(count),
            LineDirection::Down => line.saturating_add(count).min(lines - 1),
        };
        self.set_row_col(target, col)
    }

    /// Move to `(line, col)`, clamping both to the metric.
    pub fn set_row_col(&mut self, line: usize, col: usize) -> Option<PosChange> {
        let lines = self.metric.lines();
        if lines == 0 {
            return self.set_offset(None);
        }
        let line = line.min(lines - 1);
        let col = col.min(self.metric.line_size(line).saturating_sub(1));
        self.set_offset(Some(self.metric.offset_at(line, col)))
    }

    /// Replace the metric, keeping the `(line, col)` position where it
    /// still exists.
    pub fn set_metric(&mut self, metric: M) -> Option<PosChange> {
        let (line, col) = (self.line, self.col);
        self.metric = metric;
        match (line, col) {
            (Some(line), Some(col)) => {
                let lines = self.metric.lines();
                if lines == 0 || self.metric.max_offset().is_none() {
                    return self.force(None);
                }
                let line = line.min(lines - 1);
                let col = col.min(self.metric.line_size(line).saturating_sub(1));
                self.force(Some(self.metric.offset_at(line, col)))
            }
            _ => self.force(None),
        }
    }

    /// Like `set_offset`, but also reports a change when only the derived
    /// `(line, col)` moved under an unchanged offset.
    fn force(&mut self, offset: Option<usize>) -> Option<PosChange> {
        let prev = PosChange {
            prev_offset: self.offset,
            prev_line: self.line,
            prev_col: self.col,
        };
        self.offset = None;
        self.line = None;
        self.col = None;
        self.set_offset(offset);
        let moved = prev.prev_offset != self.offset
            || prev.prev_line != self.line
            || prev.prev_col != self.col;
        moved.then_some(prev)
    }
}
