//! Grid engine.
//!
//! `Grid` owns the metrics, visibility window, cursor, scroll state and
//! selection, and delegates to a model, a view provider and an optional
//! editor provider. Input handlers live in `events.rs`, painting in
//! `paint.rs`, and the editing protocol in [`crate::editor`].
//!
//! All positions returned by `col_x`/`row_y` are unscrolled content
//! coordinates; `cell_rect` and the hit tests work in grid coordinates,
//! i.e. with the scroll offsets applied.

mod events;
mod paint;

use std::ops::Range;

use unicode_width::UnicodeWidthStr;

use crate::config::GridConfig;
use crate::cursor::{Cursor, GridMetric, NavigationMode};
use crate::editor::EditState;
use crate::error::{GridError, Result};
use crate::layout::{AxisSpan, Axis, CellMetrics, Sizing, VisibilityWindow};
use crate::model::{Matrix, MatrixModel, ModelEvent};
use crate::provider::{DefaultViewProvider, EditorProvider, ViewProvider};
use crate::scroll::{ScrollChange, ScrollManager};
use crate::types::{Rect, Selection, SelectionChange, Size};

/// Column titles painted above the cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caption {
    titles: Vec<String>,
}

impl Caption {
    pub fn new<S: Into<String>>(titles: impl IntoIterator<Item = S>) -> Self {
        Self {
            titles: titles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn title(&self, col: usize) -> Option<&str> {
        self.titles.get(col).map(String::as_str)
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }
}

/// Notification emitted by the grid, drained with [`Grid::drain_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridEvent {
    SelectionChanged(SelectionChange),
    EditingStarted { row: usize, col: usize },
    EditingStopped { row: usize, col: usize, applied: bool },
}

/// Region the host should repaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Damage {
    Full,
    /// Inclusive row range
    Rows { first: usize, last: usize },
}

/// Target of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// A visible cell at (row, col)
    Cell(usize, usize),
    /// A caption title
    Caption(usize),
    /// Close enough to the right edge of a caption title to resize it
    CaptionEdge(usize),
    None,
}

/// Pixel frame of the cell area, derived from bounds, insets and caption.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frame {
    /// Unscrolled position of column 0 and row 0
    pub col_origin: i32,
    pub row_origin: i32,
    /// Visible cell area in grid coordinates
    pub area: Rect,
    /// Caption band, empty without a caption
    pub caption: Rect,
}

/// Virtualized grid widget.
pub struct Grid {
    config: GridConfig,
    pub(crate) model: Box<dyn MatrixModel>,
    views: Box<dyn ViewProvider>,
    pub(crate) editors: Option<Box<dyn EditorProvider>>,
    metrics: CellMetrics,
    window: VisibilityWindow,
    cursor: Cursor,
    scroll: ScrollManager,
    selection: Selection,
    caption: Option<Caption>,
    bounds: Rect,
    visible: bool,
    /// Layout (sizes, scroll limits) is current
    valid: bool,
    pub(crate) edit: EditState,
    pub(crate) focused: bool,
    events: Vec<GridEvent>,
    damage: Vec<Damage>,
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("rows", &self.model.rows())
            .field("cols", &self.model.cols())
            .field("bounds", &self.bounds)
            .field("window", &self.window)
            .field("cursor", &self.cursor.offset())
            .field("selection", &self.selection)
            .field("editing", &self.editing_cell())
            .finish_non_exhaustive()
    }
}

impl Grid {
    /// Grid over an existing model.
    pub fn from_model(model: impl MatrixModel + 'static, config: GridConfig) -> Self {
        let mut model: Box<dyn MatrixModel> = Box::new(model);
        // Notifications queued before binding describe states the grid never saw
        model.drain_events();
        let (rows, cols) = (model.rows(), model.cols());
        let mut metrics = CellMetrics::new(&config);
        metrics.sync_dims(rows, cols);
        let views = DefaultViewProvider::new(config.font, config.text_color);
        let cursor = Cursor::new(GridMetric::new(rows, cols, config.navigation_mode));
        Self {
            model,
            views: Box::new(views),
            editors: None,
            metrics,
            window: VisibilityWindow::new(),
            cursor,
            scroll: ScrollManager::new(),
            selection: Selection::none(),
            caption: None,
            bounds: Rect::default(),
            visible: true,
            valid: false,
            edit: EditState::Idle,
            focused: false,
            events: Vec::new(),
            damage: vec![Damage::Full],
            config,
        }
    }

    /// Grid over an empty in-memory matrix of the given size.
    pub fn with_dimensions(rows: usize, cols: usize, config: GridConfig) -> Self {
        Self::from_model(Matrix::new(rows, cols), config)
    }

    /// Grid without rows or columns.
    pub fn new(config: GridConfig) -> Self {
        Self::with_dimensions(0, 0, config)
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn model(&self) -> &dyn MatrixModel {
        self.model.as_ref()
    }

    /// Mutable model access. Changes are picked up from the model's queued
    /// notifications before the next layout, paint or hit test.
    pub fn model_mut(&mut self) -> &mut dyn MatrixModel {
        self.model.as_mut()
    }

    pub fn metrics(&self) -> &CellMetrics {
        &self.metrics
    }

    /// The visible window as of the last [`validate`](Self::validate).
    pub fn window(&self) -> &VisibilityWindow {
        &self.window
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn scroll(&self) -> &ScrollManager {
        &self.scroll
    }

    pub fn caption(&self) -> Option<&Caption> {
        self.caption.as_ref()
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn has_focus(&self) -> bool {
        self.focused
    }

    /// Give input focus to the grid. Hosts call this when the widget gains
    /// focus; the editing protocol calls it when a session ends.
    pub fn request_focus(&mut self) {
        self.focused = true;
    }

    pub fn focus_lost(&mut self) {
        self.focused = false;
    }

    pub fn navigation_mode(&self) -> NavigationMode {
        self.cursor.metric().mode
    }

    pub fn selected_row(&self) -> Option<usize> {
        self.selection.row()
    }

    /// Take the notifications emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<GridEvent> {
        std::mem::take(&mut self.events)
    }

    /// Take the regions invalidated since the last call.
    pub fn take_damage(&mut self) -> Vec<Damage> {
        std::mem::take(&mut self.damage)
    }

    // ---- setters ----

    /// Bind a new model. Any open edit is committed to the old model first;
    /// selection and cursor are reset.
    pub fn set_model(&mut self, model: impl MatrixModel + 'static) -> Result<()> {
        let committed = self.stop_editing(true);
        let mut model: Box<dyn MatrixModel> = Box::new(model);
        model.drain_events();
        self.model = model;
        let (rows, cols) = (self.model.rows(), self.model.cols());
        self.metrics.sync_dims(rows, cols);
        self.cursor = Cursor::new(GridMetric::new(rows, cols, self.navigation_mode()));
        self.clear_select();
        self.scroll.scroll_to(0, 0);
        self.invalidate_layout();
        tracing::debug!(target: "grid.model", rows, cols, "model bound");
        committed
    }

    pub fn set_view_provider(&mut self, views: impl ViewProvider + 'static) -> Result<()> {
        let committed = self.stop_editing(true);
        self.views = Box::new(views);
        self.invalidate_layout();
        committed
    }

    /// Swap the editor provider. An open session is committed through the
    /// old provider before the swap.
    pub fn set_editor_provider(
        &mut self,
        editors: Option<Box<dyn EditorProvider>>,
    ) -> Result<()> {
        let committed = self.stop_editing(true);
        self.editors = editors;
        self.invalidate_layout();
        committed
    }

    /// Switch between `"row"` and `"cell"` navigation. The cursor keeps its
    /// row and column.
    pub fn set_navigation_mode(&mut self, mode: &str) -> Result<()> {
        let mode: NavigationMode = mode.parse()?;
        if mode != self.navigation_mode() {
            self.sync_model();
            let metric = GridMetric::new(self.model.rows(), self.model.cols(), mode);
            let change = self.cursor.set_metric(metric);
            self.repaint();
            self.cursor_moved(change);
        }
        Ok(())
    }

    /// Choose between fixed sizes and sizes derived from the cell views.
    /// Turning the preferred metric off keeps the last computed sizes.
    pub fn set_use_ps_metric(&mut self, on: bool) {
        let sizing = if on { Sizing::Preferred } else { Sizing::Fixed };
        if sizing != self.metrics.sizing() {
            self.metrics.set_sizing(sizing);
            self.invalidate_layout();
        }
    }

    pub fn set_caption(&mut self, caption: Option<Caption>) {
        self.caption = caption;
        self.invalidate_layout();
    }

    /// Set the grid rectangle in host coordinates. Only the size affects
    /// the layout; the position anchors popup editors.
    pub fn set_bounds(&mut self, bounds: Rect) {
        let resized = bounds.width != self.bounds.width || bounds.height != self.bounds.height;
        self.bounds = bounds;
        if resized {
            self.invalidate_layout();
        }
    }

    /// Hidden grids report an empty window.
    pub fn set_visible(&mut self, visible: bool) {
        if visible != self.visible {
            self.visible = visible;
            if visible {
                self.invalidate_layout();
            } else {
                self.window.cancel();
            }
        }
    }

    /// Set one row height. Ignored while the preferred metric is active.
    pub fn set_row_height(&mut self, row: usize, height: i32) -> Result<()> {
        self.set_rows_height(row..row + 1, height)
    }

    /// Set one column width. Ignored while the preferred metric is active.
    pub fn set_col_width(&mut self, col: usize, width: i32) -> Result<()> {
        self.set_cols_width(col..col + 1, width)
    }

    pub fn set_rows_height(&mut self, rows: Range<usize>, height: i32) -> Result<()> {
        self.set_sizes(Axis::Rows, rows, height)
    }

    pub fn set_cols_width(&mut self, cols: Range<usize>, width: i32) -> Result<()> {
        self.set_sizes(Axis::Cols, cols, width)
    }

    fn set_sizes(&mut self, axis: Axis, range: Range<usize>, size: i32) -> Result<()> {
        self.sync_model();
        if self.metrics.sizing() == Sizing::Preferred {
            return Ok(());
        }
        let delta = match axis {
            Axis::Rows => self.metrics.set_rows_height(range, size)?,
            Axis::Cols => self.metrics.set_cols_width(range, size)?,
        };
        if delta == 0 {
            return Ok(());
        }
        // The edited cell may move
        let committed = self.stop_editing(true);
        match axis {
            Axis::Rows => self.window.invalidate_rows(),
            Axis::Cols => self.window.invalidate_cols(),
        }
        self.valid = false;
        self.repaint();
        committed
    }

    // ---- model notifications ----

    /// Apply the model's queued notifications.
    pub(crate) fn sync_model(&mut self) {
        for event in self.model.drain_events() {
            tracing::debug!(target: "grid.model", ?event, "model notification");
            match event {
                ModelEvent::Resized { .. } => self.model_resized(),
                ModelEvent::CellModified { row, .. } => {
                    self.repaint_rows(row, row);
                    if self.metrics.sizing() == Sizing::Preferred {
                        self.invalidate_layout();
                    }
                }
                ModelEvent::Sorted(_) => {
                    self.commit_for_structure_change();
                    self.clear_select();
                    self.repaint();
                }
            }
        }
        if self.metrics.rows() != self.model.rows() || self.metrics.cols() != self.model.cols() {
            self.model_resized();
        }
    }

    fn model_resized(&mut self) {
        self.commit_for_structure_change();
        let (rows, cols) = (self.model.rows(), self.model.cols());
        self.metrics.sync_dims(rows, cols);
        let change = self
            .cursor
            .set_metric(GridMetric::new(rows, cols, self.navigation_mode()));
        if self.selection.row().is_some_and(|r| r >= rows) {
            self.clear_select();
        }
        self.invalidate_layout();
        self.cursor_moved(change);
    }

    /// Commit an open edit before a structural change. There is no caller
    /// to hand a failure to, so it is logged.
    fn commit_for_structure_change(&mut self) {
        if let Err(error) = self.stop_editing(true) {
            tracing::warn!(target: "grid.edit", %error, "edit dropped by model change");
        }
    }

    // ---- layout ----

    fn invalidate_layout(&mut self) {
        self.valid = false;
        self.window.invalidate();
        self.repaint();
    }

    pub(crate) fn repaint(&mut self) {
        self.damage.clear();
        self.damage.push(Damage::Full);
    }

    pub(crate) fn repaint_rows(&mut self, a: usize, b: usize) {
        let (lo, hi) = (a.min(b), a.max(b));
        let covered = self.damage.iter().any(|d| match *d {
            Damage::Full => true,
            Damage::Rows { first, last } => first <= lo && hi <= last,
        });
        if !covered {
            self.damage.push(Damage::Rows { first: lo, last: hi });
        }
    }

    fn caption_height(&self) -> i32 {
        match self.caption {
            Some(_) => self.config.font.line_height + self.config.cell_insets.vertical(),
            None => 0,
        }
    }

    fn caption_sizes(&self) -> Option<Vec<Size>> {
        let caption = self.caption.as_ref()?;
        let height = self.caption_height();
        let sizes = (0..self.metrics.cols())
            .map(|col| {
                let text = caption.title(col).unwrap_or("");
                let columns = i32::try_from(text.width()).unwrap_or(i32::MAX);
                Size::new(
                    columns.saturating_mul(self.config.font.char_width)
                        + self.config.cell_insets.horizontal(),
                    height,
                )
            })
            .collect();
        Some(sizes)
    }

    pub(crate) fn frame(&self) -> Frame {
        let insets = self.config.insets;
        let line = self.metrics.line_size();
        let caption_h = self.caption_height();
        let top = insets.top + caption_h;
        let width = (self.bounds.width - insets.horizontal()).max(0);
        Frame {
            col_origin: insets.left + line,
            row_origin: top + line,
            area: Rect::new(
                insets.left,
                top,
                width,
                (self.bounds.height - insets.bottom - top).max(0),
            ),
            caption: Rect::new(insets.left, insets.top, width, caption_h),
        }
    }

    /// Recompute sizes (when the preferred metric is active) and scroll
    /// limits for the current model and bounds.
    pub fn do_layout(&mut self) {
        self.sync_model();
        if self.metrics.sizing() == Sizing::Preferred {
            let caption = self.caption_sizes();
            self.metrics
                .recalc_preferred(self.model.as_ref(), self.views.as_ref(), caption.as_deref());
            self.window.invalidate();
        }
        let frame = self.frame();
        let content = Size::new(self.metrics.extent(Axis::Cols), self.metrics.extent(Axis::Rows));
        let viewport = Size::new(frame.area.width, frame.area.height);
        if let Some(change) = self.scroll.set_limits(content, viewport) {
            self.scrolled(change);
        }
        self.valid = true;
        self.place_editor(false);
    }

    pub(crate) fn ensure_layout(&mut self) {
        self.sync_model();
        if !self.valid {
            self.do_layout();
        }
    }

    /// Bring everything up to date: model notifications, layout and the
    /// visible window.
    pub fn validate(&mut self) {
        self.ensure_layout();
        if !self.visible {
            self.window.cancel();
            return;
        }
        let frame = self.frame();
        let line = self.metrics.line_size();
        let rows = AxisSpan {
            sizes: self.metrics.row_heights(),
            line_size: line,
            origin: frame.row_origin,
            scroll: self.scroll.sy(),
            lo: frame.area.y,
            hi: frame.area.bottom(),
        };
        let cols = AxisSpan {
            sizes: self.metrics.col_widths(),
            line_size: line,
            origin: frame.col_origin,
            scroll: self.scroll.sx(),
            lo: frame.area.x,
            hi: frame.area.right(),
        };
        self.window.update(&rows, &cols);
    }

    /// Size that shows every cell without scrolling.
    pub fn calc_preferred_size(&mut self) -> Size {
        self.ensure_layout();
        let insets = self.config.insets;
        Size::new(
            insets.horizontal() + self.metrics.extent(Axis::Cols),
            insets.vertical() + self.caption_height() + self.metrics.extent(Axis::Rows),
        )
    }

    /// Preferred width of one column: the widest cell view plus insets.
    pub fn preferred_col_width(&self, col: usize) -> i32 {
        let add = self.config.cell_insets.horizontal();
        (0..self.model.rows())
            .filter_map(|row| self.views.view(row, col, self.model.get(row, col)))
            .map(|view| view.preferred_size().width + add)
            .max()
            .unwrap_or(0)
    }

    // Anchors are only trusted while the window is current; a pending full
    // recompute may follow a size change that moved them.
    fn anchors_current(&self) -> bool {
        !self.window.needs_update()
    }

    /// Unscrolled x of a column.
    pub fn col_x(&self, col: usize) -> i32 {
        let anchor = self.window.first_col().filter(|_| self.anchors_current());
        self.metrics
            .position(Axis::Cols, anchor, self.frame().col_origin, col)
    }

    /// Unscrolled y of a row.
    pub fn row_y(&self, row: usize) -> i32 {
        let anchor = self.window.first_row().filter(|_| self.anchors_current());
        self.metrics
            .position(Axis::Rows, anchor, self.frame().row_origin, row)
    }

    /// Cell rectangle in grid coordinates.
    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        Rect::new(
            self.col_x(col) + self.scroll.sx(),
            self.row_y(row) + self.scroll.sy(),
            self.metrics.col_width(col),
            self.metrics.row_height(row),
        )
    }

    /// Indices of every visible cell, row by row.
    pub fn visible_cells(&mut self) -> impl Iterator<Item = (usize, usize)> {
        self.validate();
        let rows = self.window.row_range();
        let cols = self.window.col_range();
        rows.into_iter().flatten().flat_map(move |row| {
            cols.clone()
                .into_iter()
                .flatten()
                .map(move |col| (row, col))
        })
    }

    // ---- hit testing ----

    /// Visible cell under `(x, y)`. Only the visible window is scanned;
    /// points on grid lines or outside the cell area hit nothing.
    pub fn cell_by_location(&mut self, x: i32, y: i32) -> Option<(usize, usize)> {
        self.validate();
        if !self.frame().area.contains(x, y) {
            return None;
        }
        let row = self.row_at(y)?;
        let col = self.col_at(x)?;
        Some((row, col))
    }

    fn row_at(&self, y: i32) -> Option<usize> {
        let first = self.window.first_row()?;
        let last = self.window.last_row()?;
        let line = self.metrics.line_size();
        let mut top = first.pos + self.scroll.sy();
        for row in first.index..=last.index {
            let h = self.metrics.row_height(row);
            if y >= top && y < top + h {
                return Some(row);
            }
            top += h + line;
        }
        None
    }

    fn col_at(&self, x: i32) -> Option<usize> {
        let first = self.window.first_col()?;
        let last = self.window.last_col()?;
        let line = self.metrics.line_size();
        let mut left = first.pos + self.scroll.sx();
        for col in first.index..=last.index {
            let w = self.metrics.col_width(col);
            if x >= left && x < left + w {
                return Some(col);
            }
            left += w + line;
        }
        None
    }

    /// Column whose caption right edge lies within the resize margin of
    /// `(x, y)`.
    pub fn caption_edge_at(&mut self, x: i32, y: i32) -> Option<usize> {
        self.validate();
        let frame = self.frame();
        if self.caption.is_none() || !frame.caption.contains(x, y) {
            return None;
        }
        let first = self.window.first_col()?;
        let last = self.window.last_col()?;
        let margin = self.config.caption_resize_margin;
        let line = self.metrics.line_size();
        let mut left = first.pos + self.scroll.sx();
        for col in first.index..=last.index {
            let right = left + self.metrics.col_width(col);
            if (x - right).abs() <= margin {
                return Some(col);
            }
            left = right + line;
        }
        None
    }

    /// Classify the point under `(x, y)`.
    pub fn hit_test(&mut self, x: i32, y: i32) -> HitTarget {
        if let Some(col) = self.caption_edge_at(x, y) {
            return HitTarget::CaptionEdge(col);
        }
        if self.caption.is_some() && self.frame().caption.contains(x, y) {
            return match self.col_at(x) {
                Some(col) => HitTarget::Caption(col),
                None => HitTarget::None,
            };
        }
        match self.cell_by_location(x, y) {
            Some((row, col)) => HitTarget::Cell(row, col),
            None => HitTarget::None,
        }
    }

    // ---- selection ----

    /// Select or deselect a row. Selecting replaces any previous selection.
    pub fn select(&mut self, row: usize, on: bool) -> Result<()> {
        self.sync_model();
        let rows = self.model.rows();
        if row >= rows {
            return Err(GridError::out_of_range(Axis::Rows, row, rows));
        }
        let prev = self.selection.row();
        let changes = self.selection.set(row, on);
        if changes.is_empty() {
            return Ok(());
        }
        if let Some(prev) = prev {
            self.repaint_rows(prev, prev);
        }
        self.repaint_rows(row, row);
        self.events
            .extend(changes.into_iter().map(GridEvent::SelectionChanged));
        Ok(())
    }

    pub fn clear_select(&mut self) {
        let prev = self.selection.row();
        if let Some(change) = self.selection.clear() {
            if let Some(prev) = prev {
                self.repaint_rows(prev, prev);
            }
            self.events.push(GridEvent::SelectionChanged(change));
        }
    }

    // ---- internals shared with events/paint/editor ----

    pub(crate) fn push_event(&mut self, event: GridEvent) {
        self.events.push(event);
    }

    /// Record a scroll change: the window slides in the scroll direction,
    /// inline editors follow the cell.
    pub(crate) fn scrolled(&mut self, change: ScrollChange) {
        let dx = self.scroll.sx() - change.prev_x;
        let dy = self.scroll.sy() - change.prev_y;
        self.window.scrolled(dx, dy);
        self.place_editor(false);
        self.repaint();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::Insets;

    fn grid(rows: usize, cols: usize) -> Grid {
        let config = GridConfig::default()
            .with_line_size(0)
            .with_default_sizes(50, 20);
        let mut grid = Grid::with_dimensions(rows, cols, config);
        grid.set_bounds(Rect::new(0, 0, 200, 100));
        grid
    }

    #[test]
    fn test_visible_cells_follow_window() {
        let mut g = grid(10, 10);
        let cells: Vec<_> = g.visible_cells().collect();
        assert_eq!(cells.len(), 5 * 4);
        assert_eq!(cells[0], (0, 0));
        assert_eq!(cells[cells.len() - 1], (4, 3));
    }

    #[test]
    fn test_cell_by_location() {
        let mut g = grid(10, 10);
        assert_eq!(g.cell_by_location(0, 0), Some((0, 0)));
        assert_eq!(g.cell_by_location(120, 45), Some((2, 2)));
        assert_eq!(g.cell_by_location(250, 45), None);
    }

    #[test]
    fn test_cell_by_location_skips_grid_lines() {
        let config = GridConfig::default()
            .with_line_size(2)
            .with_default_sizes(50, 20)
            .with_cell_insets(Insets::uniform(0));
        let mut g = Grid::with_dimensions(5, 5, config);
        g.set_bounds(Rect::new(0, 0, 200, 100));
        // Column 0 spans x 2..52, the line 52..54
        assert_eq!(g.cell_by_location(10, 10), Some((0, 0)));
        assert_eq!(g.cell_by_location(53, 10), None);
        assert_eq!(g.cell_by_location(54, 10), Some((0, 1)));
    }

    #[test]
    fn test_selection_single_row() {
        let mut g = grid(5, 2);
        g.select(1, true).unwrap();
        g.select(3, true).unwrap();
        assert_eq!(g.selected_row(), Some(3));
        g.select(3, false).unwrap();
        assert_eq!(g.selected_row(), None);
        assert!(g.select(7, true).is_err());
        let events = g.drain_events();
        assert_eq!(events.len(), 4);
        assert_eq!(
            events[3],
            GridEvent::SelectionChanged(SelectionChange {
                row: None,
                count: 0,
                selected: false
            })
        );
    }

    #[test]
    fn test_set_col_width_ignored_with_preferred_metric() {
        let mut g = grid(2, 2);
        g.set_use_ps_metric(true);
        g.set_col_width(0, 5).unwrap();
        g.validate();
        assert_ne!(g.metrics().col_width(0), 5);
    }

    #[test]
    fn test_cell_modified_damages_row() {
        let mut g = grid(3, 3);
        g.model_mut().put(0, 0, 1.into()).unwrap();
        g.validate();
        assert_eq!(g.take_damage(), vec![Damage::Full]);
        g.validate();
        assert!(g.take_damage().is_empty());
        g.model_mut().put(1, 0, 2.into()).unwrap();
        g.validate();
        assert_eq!(g.take_damage(), vec![Damage::Rows { first: 1, last: 1 }]);
    }

    #[test]
    fn test_invisible_grid_has_empty_window() {
        let mut g = grid(3, 3);
        g.set_visible(false);
        assert_eq!(g.visible_cells().count(), 0);
        g.set_visible(true);
        assert_eq!(g.visible_cells().count(), 9);
    }
}
