//! In-place cell editing.
//!
//! A grid is either idle or editing exactly one cell. Starting a session
//! always commits the previous one first, so at most one editor exists and
//! the editor provider is never asked for a second editor while one is
//! open. Stopping a session always clears it, repaints its row and hands
//! focus back to the grid, even when writing the edited value fails.

use crate::error::{GridError, Result};
use crate::grid::{Grid, GridEvent};
use crate::layout::{Axis, Sizing};
use crate::provider::Editor;
use crate::types::Rect;

/// An open editing session.
pub struct EditingSession {
    pub(crate) row: usize,
    pub(crate) col: usize,
    pub(crate) editor: Box<dyn Editor>,
}

impl EditingSession {
    pub fn cell(&self) -> (usize, usize) {
        (self.row, self.col)
    }
}

/// Editing state of a grid.
#[derive(Default)]
pub enum EditState {
    #[default]
    Idle,
    Editing(EditingSession),
}

impl Grid {
    pub fn is_editing(&self) -> bool {
        matches!(self.edit, EditState::Editing(_))
    }

    /// Cell of the open session.
    pub fn editing_cell(&self) -> Option<(usize, usize)> {
        match &self.edit {
            EditState::Editing(session) => Some(session.cell()),
            EditState::Idle => None,
        }
    }

    /// Editor of the open session.
    pub fn editor(&self) -> Option<&dyn Editor> {
        match &self.edit {
            EditState::Editing(session) => Some(session.editor.as_ref()),
            EditState::Idle => None,
        }
    }

    pub fn editor_mut(&mut self) -> Option<&mut dyn Editor> {
        match &mut self.edit {
            EditState::Editing(session) => Some(session.editor.as_mut()),
            EditState::Idle => None,
        }
    }

    /// Open an editor on `(row, col)`.
    ///
    /// Any open session is committed first. Returns `false` when there is
    /// no editor provider or it declines the cell.
    pub fn start_editing(&mut self, row: usize, col: usize) -> Result<bool> {
        self.stop_editing(true)?;
        self.ensure_layout();
        let (rows, cols) = (self.model.rows(), self.model.cols());
        if row >= rows {
            return Err(GridError::out_of_range(Axis::Rows, row, rows));
        }
        if col >= cols {
            return Err(GridError::out_of_range(Axis::Cols, col, cols));
        }
        let Some(provider) = self.editors.as_mut() else {
            return Ok(false);
        };
        let Some(editor) = provider.editor(row, col, self.model.get(row, col)) else {
            return Ok(false);
        };

        self.edit = EditState::Editing(EditingSession { row, col, editor });
        self.place_editor(true);
        if let Some(editor) = self.editor_mut() {
            editor.request_focus();
        }
        self.focused = false;
        self.repaint_rows(row, row);
        self.push_event(GridEvent::EditingStarted { row, col });
        tracing::debug!(target: "grid.edit", row, col, "editing started");
        Ok(true)
    }

    /// Close the open session, writing the edited value back when `apply`
    /// is set. Without a session this does nothing.
    ///
    /// The session is cleared, its row repainted and focus returned to the
    /// grid before any error from committing or writing is returned.
    pub fn stop_editing(&mut self, apply: bool) -> Result<()> {
        let EditState::Editing(mut session) = std::mem::take(&mut self.edit) else {
            return Ok(());
        };
        let (row, col) = session.cell();
        let result = if apply {
            self.apply_edit(&mut session)
        } else {
            Ok(())
        };

        self.repaint_rows(row, row);
        self.focused = true;
        self.push_event(GridEvent::EditingStopped {
            row,
            col,
            applied: apply && result.is_ok(),
        });
        match &result {
            Ok(()) => tracing::debug!(target: "grid.edit", row, col, apply, "editing stopped"),
            Err(error) => tracing::warn!(target: "grid.edit", row, col, %error, "commit failed"),
        }
        result
    }

    fn apply_edit(&mut self, session: &mut EditingSession) -> Result<()> {
        let (row, col) = session.cell();
        if let Some(nested) = session.editor.as_commitable() {
            nested.commit()?;
        }
        let value = match self.editors.as_mut() {
            Some(provider) => provider.fetch_edited_value(
                row,
                col,
                self.model.get(row, col),
                session.editor.as_mut(),
            )?,
            None => session.editor.value()?,
        };
        self.model.put(row, col, value)
    }

    /// Position the open editor. Inline editors cover their cell (minus the
    /// cell insets under the preferred metric) and follow scrolling; popup
    /// editors are placed once, at the cell's position in host coordinates.
    pub(crate) fn place_editor(&mut self, initial: bool) {
        let Some((row, col)) = self.editing_cell() else {
            return;
        };
        let cell = self.cell_rect(row, col);
        let preferred = self.metrics().sizing() == Sizing::Preferred;
        let insets = self.config().cell_insets;
        let origin = self.bounds();
        let Some(editor) = self.editor_mut() else {
            return;
        };
        if editor.is_popup() {
            if initial {
                let ps = editor.preferred_size();
                editor.set_bounds(Rect::new(
                    origin.x + cell.x,
                    origin.y + cell.y,
                    ps.width,
                    ps.height,
                ));
            }
        } else if preferred {
            editor.set_bounds(cell.inset(&insets));
        } else {
            editor.set_bounds(cell);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::GridConfig;
    use crate::provider::TextEditorProvider;
    use crate::types::CellValue;

    fn grid() -> Grid {
        let config = GridConfig::default()
            .with_line_size(1)
            .with_default_sizes(50, 20);
        let mut g = Grid::with_dimensions(4, 3, config);
        g.set_bounds(Rect::new(0, 0, 200, 100));
        g.set_editor_provider(Some(Box::new(TextEditorProvider::default())))
            .unwrap();
        g
    }

    #[test]
    fn test_inline_editor_covers_cell() {
        let mut g = grid();
        assert!(g.start_editing(1, 2).unwrap());
        assert_eq!(g.editing_cell(), Some((1, 2)));
        // Column 2 starts after three lines and two columns
        assert_eq!(g.editor().unwrap().bounds(), Rect::new(103, 22, 50, 20));
        assert!(!g.has_focus());
    }

    #[test]
    fn test_inline_editor_follows_scroll() {
        let mut g = grid();
        g.set_bounds(Rect::new(0, 0, 100, 40));
        g.start_editing(1, 0).unwrap();
        g.scroll_by(0, -10);
        assert_eq!(g.editor().unwrap().bounds().y, 12);
    }

    #[test]
    fn test_stop_without_session_is_noop() {
        let mut g = grid();
        g.stop_editing(true).unwrap();
        assert!(g.drain_events().is_empty());
    }

    #[test]
    fn test_commit_writes_parsed_value() {
        let mut g = grid();
        g.start_editing(0, 0).unwrap();
        g.key_typed('4').unwrap();
        g.key_typed('2').unwrap();
        g.stop_editing(true).unwrap();
        assert_eq!(g.model().get(0, 0), Some(&CellValue::from(42)));
        assert!(!g.is_editing());
        assert!(g.has_focus());
    }

    #[test]
    fn test_start_out_of_range() {
        let mut g = grid();
        assert!(g.start_editing(9, 0).is_err());
        assert!(!g.is_editing());
    }
}
