//! Matrix data model consumed by the grid.
//!
//! The grid only needs dimensions, cell access, a write path for committed
//! edits, and the model's change notifications. Notifications are queued by
//! the model and drained by the grid before any layout, paint or hit test,
//! so the grid never reads a window computed for stale dimensions.

use crate::error::{GridError, Result};
use crate::layout::Axis;
use crate::types::CellValue;

/// Sort applied to a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortInfo {
    pub col: usize,
    pub ascending: bool,
}

/// Change notification emitted by a model.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelEvent {
    Resized { prev_rows: usize, prev_cols: usize },
    CellModified {
        row: usize,
        col: usize,
        prev: CellValue,
    },
    Sorted(SortInfo),
}

/// Data source behind a grid.
pub trait MatrixModel {
    fn rows(&self) -> usize;

    fn cols(&self) -> usize;

    /// Cell value, `None` outside the model.
    fn get(&self, row: usize, col: usize) -> Option<&CellValue>;

    /// Write a cell. Implementations queue a `CellModified` event.
    fn put(&mut self, row: usize, col: usize, value: CellValue) -> Result<()>;

    /// Take the notifications queued since the last call.
    fn drain_events(&mut self) -> Vec<ModelEvent>;
}

/// Dense in-memory matrix.
#[derive(Debug, Clone, Default)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    cells: Vec<CellValue>,
    events: Vec<ModelEvent>,
}

impl Matrix {
    /// Empty-valued matrix of the given size.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![CellValue::Empty; rows.saturating_mul(cols)],
            events: Vec::new(),
        }
    }

    /// Build from row vectors. Short rows are padded with empty cells.
    pub fn from_rows(data: Vec<Vec<CellValue>>) -> Self {
        let rows = data.len();
        let cols = data.iter().map(Vec::len).max().unwrap_or(0);
        let mut cells = Vec::with_capacity(rows * cols);
        for mut row in data {
            row.resize(cols, CellValue::Empty);
            cells.extend(row);
        }
        Self {
            rows,
            cols,
            cells,
            events: Vec::new(),
        }
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// Change the row count, keeping existing values.
    pub fn set_rows(&mut self, rows: usize) {
        self.resize(rows, self.cols);
    }

    /// Change the column count, keeping existing values.
    pub fn set_cols(&mut self, cols: usize) {
        self.resize(self.rows, cols);
    }

    /// Change both dimensions, keeping the values that still fit.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        if rows == self.rows && cols == self.cols {
            return;
        }
        let mut cells = vec![CellValue::Empty; rows.saturating_mul(cols)];
        for r in 0..rows.min(self.rows) {
            for c in 0..cols.min(self.cols) {
                if let (Some(src), Some(dst)) = (self.index(r, c), cells.get_mut(r * cols + c)) {
                    if let Some(v) = self.cells.get_mut(src) {
                        *dst = std::mem::take(v);
                    }
                }
            }
        }
        let (prev_rows, prev_cols) = (self.rows, self.cols);
        self.rows = rows;
        self.cols = cols;
        self.cells = cells;
        self.events.push(ModelEvent::Resized {
            prev_rows,
            prev_cols,
        });
    }

    /// Reorder rows by the values in `col`.
    pub fn sort_by_column(&mut self, col: usize, ascending: bool) -> Result<()> {
        if col >= self.cols {
            return Err(GridError::out_of_range(Axis::Cols, col, self.cols));
        }
        let mut rows: Vec<Vec<CellValue>> =
            self.cells.chunks(self.cols).map(<[CellValue]>::to_vec).collect();
        rows.sort_by(|a, b| {
            let ord = match (a.get(col), b.get(col)) {
                (Some(x), Some(y)) => x.sort_cmp(y),
                _ => std::cmp::Ordering::Equal,
            };
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        });
        self.cells = rows.into_iter().flatten().collect();
        self.events.push(ModelEvent::Sorted(SortInfo { col, ascending }));
        Ok(())
    }
}

impl MatrixModel for Matrix {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn get(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.index(row, col).and_then(|i| self.cells.get(i))
    }

    fn put(&mut self, row: usize, col: usize, value: CellValue) -> Result<()> {
        let (rows, cols) = (self.rows, self.cols);
        let slot = self
            .index(row, col)
            .and_then(|i| self.cells.get_mut(i))
            .ok_or_else(|| {
                if row >= rows {
                    GridError::out_of_range(Axis::Rows, row, rows)
                } else {
                    GridError::out_of_range(Axis::Cols, col, cols)
                }
            })?;
        if *slot == value {
            return Ok(());
        }
        let prev = std::mem::replace(slot, value);
        self.events.push(ModelEvent::CellModified { row, col, prev });
        Ok(())
    }

    fn drain_events(&mut self) -> Vec<ModelEvent> {
        std::mem::take(&mut self.events)
    }
}
