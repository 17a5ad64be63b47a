use unicode_width::UnicodeWidthStr;

use crate::config::FontMetrics;
use crate::error::{GridError, Result};
use crate::types::{CellValue, InputEvent, Key, KeyEvent, Rect, Size};

/// An editor widget placed over (or next to) the cell being edited.
pub trait Editor {
    fn preferred_size(&self) -> Size;

    fn set_bounds(&mut self, bounds: Rect);

    fn bounds(&self) -> Rect;

    /// Popup editors float at the cell position with their preferred size
    /// instead of covering the cell.
    fn is_popup(&self) -> bool {
        false
    }

    fn request_focus(&mut self) {}

    /// Current edited value.
    fn value(&self) -> Result<CellValue>;

    fn key_pressed(&mut self, _event: &KeyEvent) {}

    fn key_typed(&mut self, _ch: char) {}

    /// Editors holding nested uncommitted state expose it here so the grid
    /// can commit it before fetching the value.
    fn as_commitable(&mut self) -> Option<&mut dyn Commitable> {
        None
    }
}

/// Capability of an editor that buffers its own pending changes.
pub trait Commitable {
    fn commit(&mut self) -> Result<()>;
}

/// Decides whether and how cells are edited.
///
/// The three predicates are the only trigger policy: the grid holds no key
/// bindings for editing of its own.
pub trait EditorProvider {
    /// Editor for the cell, `None` when the cell is not editable.
    fn editor(&mut self, row: usize, col: usize, value: Option<&CellValue>)
        -> Option<Box<dyn Editor>>;

    /// Value to write back into the model.
    fn fetch_edited_value(
        &mut self,
        _row: usize,
        _col: usize,
        _original: Option<&CellValue>,
        editor: &mut dyn Editor,
    ) -> Result<CellValue> {
        editor.value()
    }

    fn should_start(&self, row: usize, col: usize, event: &InputEvent) -> bool;

    fn should_cancel(&self, row: usize, col: usize, event: &InputEvent) -> bool;

    fn should_finish(&self, row: usize, col: usize, event: &InputEvent) -> bool;
}

/// Inline single-line text editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEditor {
    text: String,
    bounds: Rect,
    focused: bool,
    font: FontMetrics,
    /// Only numbers (or an empty cell) are accepted
    numeric: bool,
}

impl TextEditor {
    pub fn new(text: impl Into<String>, font: FontMetrics) -> Self {
        Self {
            text: text.into(),
            bounds: Rect::default(),
            focused: false,
            font,
            numeric: false,
        }
    }

    /// Reject edits that do not parse as a number.
    pub fn numeric(mut self, numeric: bool) -> Self {
        self.numeric = numeric;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn has_focus(&self) -> bool {
        self.focused
    }
}

impl Editor for TextEditor {
    fn preferred_size(&self) -> Size {
        // One spare column for the caret
        let columns = i32::try_from(self.text.width() + 1).unwrap_or(i32::MAX);
        Size::new(
            columns.saturating_mul(self.font.char_width),
            self.font.line_height,
        )
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn request_focus(&mut self) {
        self.focused = true;
    }

    fn value(&self) -> Result<CellValue> {
        let value = CellValue::parse(&self.text);
        if self.numeric && !matches!(value, CellValue::Number(_) | CellValue::Empty) {
            return Err(GridError::Edit(format!("not a number: {:?}", self.text.trim())));
        }
        Ok(value)
    }

    fn key_pressed(&mut self, event: &KeyEvent) {
        if matches!(event.key, Key::Backspace) {
            self.text.pop();
        }
    }

    fn key_typed(&mut self, ch: char) {
        if !ch.is_control() {
            self.text.push(ch);
        }
    }
}

/// Text editing for every cell: double click, Enter or F2 starts, Enter
/// commits, Escape cancels. Number cells only accept numbers.
#[derive(Debug, Clone, Default)]
pub struct TextEditorProvider {
    font: FontMetrics,
}

impl TextEditorProvider {
    pub fn new(font: FontMetrics) -> Self {
        Self { font }
    }
}

impl EditorProvider for TextEditorProvider {
    fn editor(
        &mut self,
        _row: usize,
        _col: usize,
        value: Option<&CellValue>,
    ) -> Option<Box<dyn Editor>> {
        let text = value.map(ToString::to_string).unwrap_or_default();
        let numeric = value.is_some_and(CellValue::is_number);
        Some(Box::new(TextEditor::new(text, self.font).numeric(numeric)))
    }

    fn should_start(&self, _row: usize, _col: usize, event: &InputEvent) -> bool {
        match event {
            InputEvent::PointerClicked(p) => p.clicks == 2,
            InputEvent::KeyPressed(k) => matches!(k.key, Key::Enter | Key::F2),
            InputEvent::KeyTyped(_) => false,
        }
    }

    fn should_cancel(&self, _row: usize, _col: usize, event: &InputEvent) -> bool {
        matches!(event, InputEvent::KeyPressed(k) if k.key == Key::Escape)
    }

    fn should_finish(&self, _row: usize, _col: usize, event: &InputEvent) -> bool {
        matches!(event, InputEvent::KeyPressed(k) if k.key == Key::Enter)
    }
}
