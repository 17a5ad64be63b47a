//! Shared helpers for the integration tests.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::rc::Rc;

use gridview::{
    CellValue, Commitable, Editor, EditorProvider, Grid, GridConfig, GridError, InputEvent,
    Insets, Key, Matrix, MatrixModel, ModelEvent, Rect, Result, Size, SortInfo,
};

/// Install a fmt subscriber once; `RUST_LOG=grid=trace` shows the traces.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Config without insets or grid lines, so positions are plain sums.
pub fn plain_config(col_width: i32, row_height: i32) -> GridConfig {
    GridConfig::default()
        .with_line_size(0)
        .with_default_sizes(col_width, row_height)
        .with_cell_insets(Insets::uniform(0))
}

pub fn grid(rows: usize, cols: usize, config: GridConfig, width: i32, height: i32) -> Grid {
    let mut grid = Grid::with_dimensions(rows, cols, config);
    grid.set_bounds(Rect::new(0, 0, width, height));
    grid
}

/// Grid with explicit row heights and column widths.
pub fn sized_grid(
    heights: &[i32],
    widths: &[i32],
    config: GridConfig,
    width: i32,
    height: i32,
) -> Grid {
    let mut g = grid(heights.len(), widths.len(), config, width, height);
    for (row, &h) in heights.iter().enumerate() {
        g.set_row_height(row, h).unwrap();
    }
    for (col, &w) in widths.iter().enumerate() {
        g.set_col_width(col, w).unwrap();
    }
    g
}

/// Cells reported by the grid's window.
pub fn window_cells(grid: &mut Grid) -> BTreeSet<(usize, usize)> {
    grid.visible_cells().collect()
}

/// Cells whose rectangle intersects the cell area, found by summing every
/// size from index 0. Assumes no caption.
pub fn brute_force_cells(grid: &Grid) -> BTreeSet<(usize, usize)> {
    let insets = grid.config().insets;
    let bounds = grid.bounds();
    let metrics = grid.metrics();
    let line = metrics.line_size();
    let (sx, sy) = (grid.scroll().sx(), grid.scroll().sy());

    let area_x = (insets.left, bounds.width - insets.right);
    let area_y = (insets.top, bounds.height - insets.bottom);
    if area_x.1 <= area_x.0 || area_y.1 <= area_y.0 {
        return BTreeSet::new();
    }
    let inside = |sizes: &[i32], origin: i32, scroll: i32, (lo, hi): (i32, i32)| {
        let mut pos = origin;
        let mut hits = Vec::new();
        for (i, &size) in sizes.iter().enumerate() {
            if pos + scroll < hi && pos + size + scroll > lo {
                hits.push(i);
            }
            pos += size + line;
        }
        hits
    };
    let rows = inside(metrics.row_heights(), insets.top + line, sy, area_y);
    let cols = inside(metrics.col_widths(), insets.left + line, sx, area_x);
    rows.iter()
        .flat_map(|&r| cols.iter().map(move |&c| (r, c)))
        .collect()
}

/// Knobs shared between a test and the [`SharedModel`] it handed to a grid.
#[derive(Clone, Default)]
pub struct ModelHandle {
    pub puts: Rc<Cell<usize>>,
    pub fail: Rc<Cell<bool>>,
    visible_rows: Rc<Cell<Option<usize>>>,
    pending: Rc<RefCell<Vec<ModelEvent>>>,
}

impl ModelHandle {
    /// Hide every row from `rows` on and announce the resize.
    pub fn truncate_rows(&self, rows: usize, prev_rows: usize, prev_cols: usize) {
        self.visible_rows.set(Some(rows));
        self.pending.borrow_mut().push(ModelEvent::Resized {
            prev_rows,
            prev_cols,
        });
    }

    pub fn announce_sort(&self, col: usize) {
        self.pending
            .borrow_mut()
            .push(ModelEvent::Sorted(SortInfo { col, ascending: true }));
    }
}

/// Model that counts writes, can refuse them, and can change shape from
/// the outside through its [`ModelHandle`].
pub struct SharedModel {
    inner: Matrix,
    handle: ModelHandle,
}

impl SharedModel {
    pub fn new(inner: Matrix) -> (Self, ModelHandle) {
        let handle = ModelHandle::default();
        let model = Self {
            inner,
            handle: handle.clone(),
        };
        (model, handle)
    }
}

impl MatrixModel for SharedModel {
    fn rows(&self) -> usize {
        let rows = self.inner.rows();
        self.handle.visible_rows.get().map_or(rows, |r| r.min(rows))
    }

    fn cols(&self) -> usize {
        self.inner.cols()
    }

    fn get(&self, row: usize, col: usize) -> Option<&CellValue> {
        if row >= self.rows() {
            return None;
        }
        self.inner.get(row, col)
    }

    fn put(&mut self, row: usize, col: usize, value: CellValue) -> Result<()> {
        if self.handle.fail.get() {
            return Err(GridError::ReadOnly);
        }
        self.handle.puts.set(self.handle.puts.get() + 1);
        self.inner.put(row, col, value)
    }

    fn drain_events(&mut self) -> Vec<ModelEvent> {
        let mut events = self.inner.drain_events();
        events.append(&mut self.handle.pending.borrow_mut());
        events
    }
}

/// Shared record of what a scripted editor saw.
#[derive(Debug, Default)]
pub struct EditorLog {
    pub bounds: Option<Rect>,
    pub focused: bool,
    pub commits: usize,
    /// Commits seen when the provider fetched the edited value
    pub commits_at_fetch: Option<usize>,
    pub editors_created: usize,
}

/// Editor with a fixed value, optionally a popup and optionally holding
/// nested state that must be committed.
pub struct ScriptedEditor {
    value: CellValue,
    popup: bool,
    nested: bool,
    bounds: Rect,
    log: Rc<RefCell<EditorLog>>,
}

impl Editor for ScriptedEditor {
    fn preferred_size(&self) -> Size {
        Size::new(120, 60)
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.log.borrow_mut().bounds = Some(bounds);
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn is_popup(&self) -> bool {
        self.popup
    }

    fn request_focus(&mut self) {
        self.log.borrow_mut().focused = true;
    }

    fn value(&self) -> Result<CellValue> {
        Ok(self.value.clone())
    }

    fn as_commitable(&mut self) -> Option<&mut dyn Commitable> {
        if self.nested {
            Some(self)
        } else {
            None
        }
    }
}

impl Commitable for ScriptedEditor {
    fn commit(&mut self) -> Result<()> {
        self.log.borrow_mut().commits += 1;
        Ok(())
    }
}

/// Editor provider handing out [`ScriptedEditor`]s. Double click starts,
/// Escape cancels, Enter finishes.
pub struct ScriptedProvider {
    pub value: CellValue,
    pub popup: bool,
    pub nested: bool,
    pub log: Rc<RefCell<EditorLog>>,
}

impl ScriptedProvider {
    pub fn new(value: impl Into<CellValue>) -> Self {
        Self {
            value: value.into(),
            popup: false,
            nested: false,
            log: Rc::new(RefCell::new(EditorLog::default())),
        }
    }
}

impl EditorProvider for ScriptedProvider {
    fn editor(
        &mut self,
        _row: usize,
        _col: usize,
        _value: Option<&CellValue>,
    ) -> Option<Box<dyn Editor>> {
        self.log.borrow_mut().editors_created += 1;
        Some(Box::new(ScriptedEditor {
            value: self.value.clone(),
            popup: self.popup,
            nested: self.nested,
            bounds: Rect::default(),
            log: Rc::clone(&self.log),
        }))
    }

    fn fetch_edited_value(
        &mut self,
        _row: usize,
        _col: usize,
        _original: Option<&CellValue>,
        editor: &mut dyn Editor,
    ) -> Result<CellValue> {
        let commits = self.log.borrow().commits;
        self.log.borrow_mut().commits_at_fetch = Some(commits);
        editor.value()
    }

    fn should_start(&self, _row: usize, _col: usize, event: &InputEvent) -> bool {
        matches!(event, InputEvent::PointerClicked(p) if p.clicks == 2)
    }

    fn should_cancel(&self, _row: usize, _col: usize, event: &InputEvent) -> bool {
        matches!(event, InputEvent::KeyPressed(k) if k.key == Key::Escape)
    }

    fn should_finish(&self, _row: usize, _col: usize, event: &InputEvent) -> bool {
        matches!(event, InputEvent::KeyPressed(k) if k.key == Key::Enter)
    }
}
