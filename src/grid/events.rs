//! Pointer, keyboard and scroll handling for `Grid`.
//!
//! Every cursor move goes through [`Grid::cursor_moved`], which scrolls the
//! new position into view, repaints the rows between the old and new line
//! and moves the row selection along, in that order.

use super::Grid;
use crate::cursor::{LineDirection, NavigationMode, PosChange};
use crate::error::Result;
use crate::types::{CursorIcon, InputEvent, Key, KeyEvent, PointerEvent, Rect};

impl Grid {
    // ---- scrolling ----

    /// Scroll to content offsets `(x, y)`, clamped to the content.
    pub fn scroll_to(&mut self, x: i32, y: i32) {
        self.ensure_layout();
        if let Some(change) = self.scroll.scroll_to(x, y) {
            self.scrolled(change);
        }
    }

    pub fn scroll_by(&mut self, dx: i32, dy: i32) {
        self.ensure_layout();
        if let Some(change) = self.scroll.scroll_by(dx, dy) {
            self.scrolled(change);
        }
    }

    /// Scroll just enough for the cell to be fully visible.
    pub fn make_visible(&mut self, row: usize, col: Option<usize>) {
        self.validate();
        let (rows, cols) = (self.model.rows(), self.model.cols());
        if row >= rows {
            return;
        }
        let area = self.frame().area;
        let y = self.row_y(row);
        let h = self.metrics.row_height(row);
        // Without a column only the vertical offset may change
        let target = match col.filter(|&c| c < cols) {
            Some(col) => Rect::new(self.col_x(col), y, self.metrics.col_width(col), h),
            None => Rect::new(area.x - self.scroll.sx(), y, 0, h),
        };
        if let Some(change) = self.scroll.make_visible(target, area) {
            self.scrolled(change);
        }
    }

    // ---- cursor ----

    pub fn set_cursor_offset(&mut self, offset: Option<usize>) {
        self.sync_model();
        let change = self.cursor.set_offset(offset);
        self.cursor_moved(change);
    }

    pub fn seek(&mut self, delta: isize) {
        self.sync_model();
        let change = self.cursor.seek(delta);
        self.cursor_moved(change);
    }

    pub fn seek_line_to(&mut self, dir: LineDirection, count: usize) {
        self.sync_model();
        let change = self.cursor.seek_line_to(dir, count);
        self.cursor_moved(change);
    }

    /// Put the cursor on a cell. In row navigation only the row counts.
    pub fn set_row_col(&mut self, row: usize, col: usize) {
        self.sync_model();
        let change = self.cursor.set_row_col(row, col);
        self.cursor_moved(change);
    }

    pub(super) fn cursor_moved(&mut self, change: Option<PosChange>) {
        let Some(change) = change else {
            return;
        };
        let Some(line) = self.cursor.line() else {
            if let Some(prev) = change.prev_line {
                self.repaint_rows(prev, prev);
            }
            return;
        };
        let col = match self.navigation_mode() {
            NavigationMode::Row => None,
            NavigationMode::Cell => self.cursor.col(),
        };
        self.make_visible(line, col);
        self.repaint_rows(change.prev_line.unwrap_or(line), line);
        if let Err(error) = self.select(line, true) {
            tracing::warn!(target: "grid.model", %error, line, "cursor line outside the model");
        }
    }

    /// Number of lines a page up (`Up`) or page down (`Down`) moves: rows
    /// are counted from the cursor until their heights fill the cell area.
    pub fn page_size(&mut self, dir: LineDirection) -> usize {
        self.validate();
        let Some(start) = self.cursor.line() else {
            return 0;
        };
        if !self.window.has_visible_cells() {
            return 0;
        }
        let height = self.frame().area.height;
        let line = self.metrics.line_size();
        let rows = self.model.rows();
        let mut sum = 0;
        let mut count = 0;
        let mut row = Some(start);
        while let Some(r) = row.filter(|&r| r < rows) {
            if sum >= height {
                break;
            }
            sum += self.metrics.row_height(r) + line;
            count += 1;
            row = match dir {
                LineDirection::Up => r.checked_sub(1),
                LineDirection::Down => Some(r + 1),
            };
        }
        count
    }

    // ---- input ----

    /// Handle a key press. Returns whether the grid consumed it.
    pub fn key_pressed(&mut self, event: KeyEvent) -> Result<bool> {
        self.validate();
        let input = InputEvent::KeyPressed(event);
        if let Some((row, col)) = self.editing_cell() {
            let (cancel, finish) = self.editors.as_ref().map_or((false, false), |p| {
                (
                    p.should_cancel(row, col, &input),
                    p.should_finish(row, col, &input),
                )
            });
            if cancel {
                self.stop_editing(false)?;
            } else if finish {
                self.stop_editing(true)?;
            } else if let Some(editor) = self.editor_mut() {
                editor.key_pressed(&event);
            }
            return Ok(true);
        }

        let ctrl = event.modifiers.ctrl;
        let consumed = match event.key {
            Key::Left => {
                self.seek(-1);
                true
            }
            Key::Right => {
                self.seek(1);
                true
            }
            Key::Up => {
                self.seek_line_to(LineDirection::Up, 1);
                true
            }
            Key::Down => {
                self.seek_line_to(LineDirection::Down, 1);
                true
            }
            Key::PageUp => {
                let n = self.page_size(LineDirection::Up);
                self.seek_line_to(LineDirection::Up, n);
                true
            }
            Key::PageDown => {
                let n = self.page_size(LineDirection::Down);
                self.seek_line_to(LineDirection::Down, n);
                true
            }
            Key::Home if ctrl => {
                self.set_cursor_offset(Some(0));
                true
            }
            Key::End if ctrl => {
                let max = self.cursor.max_offset();
                self.set_cursor_offset(max);
                true
            }
            _ => false,
        };

        let started = self.start_editing_on(&input)?;
        Ok(consumed || started)
    }

    /// Key releases are not used by the grid itself.
    pub fn key_released(&mut self, _event: KeyEvent) -> bool {
        false
    }

    /// Handle a typed character: fed to an open editor, or offered to the
    /// editor provider as an edit trigger.
    pub fn key_typed(&mut self, ch: char) -> Result<bool> {
        self.validate();
        if let Some(editor) = self.editor_mut() {
            editor.key_typed(ch);
            return Ok(true);
        }
        let started = self.start_editing_on(&InputEvent::KeyTyped(ch))?;
        if started {
            if let Some(editor) = self.editor_mut() {
                editor.key_typed(ch);
            }
        }
        Ok(started)
    }

    /// Handle a click: moves the cursor to the clicked cell and may start
    /// editing it. Clicking another cell while editing commits the edit.
    pub fn pointer_clicked(&mut self, event: PointerEvent) -> Result<()> {
        let Some((row, col)) = self.cell_by_location(event.x, event.y) else {
            return Ok(());
        };
        if self.editing_cell().is_some_and(|cell| cell != (row, col)) {
            self.stop_editing(true)?;
        }
        if !self.is_editing() {
            self.focused = true;
        }
        self.set_row_col(row, col);

        let input = InputEvent::PointerClicked(event);
        let start = !self.is_editing()
            && self
                .editors
                .as_ref()
                .is_some_and(|p| p.should_start(row, col, &input));
        if start {
            self.start_editing(row, col)?;
        }
        Ok(())
    }

    /// Pointer shape for `(x, y)`: a resize cursor over caption edges.
    pub fn pointer_moved(&mut self, x: i32, y: i32) -> CursorIcon {
        match self.caption_edge_at(x, y) {
            Some(_) => CursorIcon::ColResize,
            None => CursorIcon::Default,
        }
    }

    /// Start editing the cursor cell when the provider accepts `input` as a
    /// trigger.
    fn start_editing_on(&mut self, input: &InputEvent) -> Result<bool> {
        let (Some(row), Some(col)) = (self.cursor.line(), self.cursor.col()) else {
            return Ok(false);
        };
        let start = self
            .editors
            .as_ref()
            .is_some_and(|p| p.should_start(row, col, input));
        if !start {
            return Ok(false);
        }
        self.start_editing(row, col)
    }
}
