use unicode_width::UnicodeWidthStr;

use crate::config::FontMetrics;
use crate::error::Result;
use crate::render::{Color, PaintSurface};
use crate::types::{CellValue, Rect, Size};

/// Placement of a view inside its cell along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
}

impl Align {
    /// Offset of an item of length `size` inside `available` pixels.
    pub fn offset(self, available: i32, size: i32) -> i32 {
        let free = available - size;
        match self {
            Self::Start => 0,
            Self::Center => free / 2,
            Self::End => free,
        }
    }
}

/// Something paintable inside a cell.
pub trait View {
    fn preferred_size(&self) -> Size;

    /// Paint into `rect`, already sized to the preferred size and placed
    /// according to the cell alignment.
    fn paint(&self, surface: &mut dyn PaintSurface, rect: Rect) -> Result<()>;
}

/// Maps cells to views.
///
/// Only `view` is required; content defaults to the start of the cell,
/// vertically centered, over the grid's own background.
pub trait ViewProvider {
    fn view(&self, row: usize, col: usize, value: Option<&CellValue>) -> Option<Box<dyn View>>;

    fn x_alignment(&self, _row: usize, _col: usize, _value: Option<&CellValue>) -> Align {
        Align::Start
    }

    fn y_alignment(&self, _row: usize, _col: usize, _value: Option<&CellValue>) -> Align {
        Align::Center
    }

    /// Background for a cell, `None` for none.
    fn cell_color(&self, _row: usize, _col: usize) -> Option<Color> {
        None
    }
}

/// Single-line text measured in display columns.
#[derive(Debug, Clone, PartialEq)]
pub struct TextView {
    text: String,
    font: FontMetrics,
    color: Color,
}

impl TextView {
    pub fn new(text: impl Into<String>, font: FontMetrics, color: Color) -> Self {
        Self {
            text: text.into(),
            font,
            color,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl View for TextView {
    fn preferred_size(&self) -> Size {
        let columns = i32::try_from(self.text.width()).unwrap_or(i32::MAX);
        Size::new(
            columns.saturating_mul(self.font.char_width),
            self.font.line_height,
        )
    }

    fn paint(&self, surface: &mut dyn PaintSurface, rect: Rect) -> Result<()> {
        surface.fill_text(&self.text, rect.x, rect.y, self.color);
        Ok(())
    }
}

/// Renders the display form of every non-empty value as text. Numbers are
/// right aligned and booleans centered.
#[derive(Debug, Clone, Default)]
pub struct DefaultViewProvider {
    font: FontMetrics,
    color: Color,
}

impl DefaultViewProvider {
    pub fn new(font: FontMetrics, color: Color) -> Self {
        Self { font, color }
    }
}

impl ViewProvider for DefaultViewProvider {
    fn view(&self, _row: usize, _col: usize, value: Option<&CellValue>) -> Option<Box<dyn View>> {
        match value? {
            CellValue::Empty => None,
            v => Some(Box::new(TextView::new(v.to_string(), self.font, self.color))),
        }
    }

    fn x_alignment(&self, _row: usize, _col: usize, value: Option<&CellValue>) -> Align {
        match value {
            Some(CellValue::Number(_)) => Align::End,
            Some(CellValue::Bool(_)) => Align::Center,
            _ => Align::Start,
        }
    }
}
