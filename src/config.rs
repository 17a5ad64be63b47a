//! Grid configuration.
//!
//! All sizing and color defaults live here instead of in module globals. A
//! config is handed to the grid at construction and can be loaded from JSON;
//! missing fields take their defaults.

use serde::{Deserialize, Serialize};

use crate::cursor::NavigationMode;
use crate::error::Result;
use crate::render::{palette, Color};
use crate::types::Insets;

/// Default column width in pixels
pub const DEFAULT_COL_WIDTH: i32 = 80;

/// Default row height in pixels
pub const DEFAULT_ROW_HEIGHT: i32 = 25;

/// Glyph metrics used by the built-in text views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontMetrics {
    /// Advance of one display column
    pub char_width: i32,
    pub line_height: i32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            char_width: 7,
            line_height: 16,
        }
    }
}

/// Construction-time grid settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Width seeded into new column slots
    pub default_col_width: i32,
    /// Height seeded into new row slots
    pub default_row_height: i32,
    /// Grid line thickness, also the gap between cells
    pub line_size: i32,
    /// Padding applied inside every cell
    pub cell_insets: Insets,
    /// Padding around the whole grid
    pub insets: Insets,
    pub navigation_mode: NavigationMode,
    /// Size rows and columns from their content instead of fixed values
    pub use_ps_metric: bool,
    /// Lower bound for column widths in the stretch layout
    pub min_col_width: i32,
    /// Distance from a caption column edge that still grabs it for resizing
    pub caption_resize_margin: i32,
    pub font: FontMetrics,
    pub line_color: Color,
    pub select_color: Color,
    pub marker_color: Color,
    pub caption_color: Color,
    pub text_color: Color,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            default_col_width: DEFAULT_COL_WIDTH,
            default_row_height: DEFAULT_ROW_HEIGHT,
            line_size: 1,
            cell_insets: Insets::new(1, 3, 1, 3),
            insets: Insets::default(),
            navigation_mode: NavigationMode::Row,
            use_ps_metric: false,
            min_col_width: 12,
            caption_resize_margin: 4,
            font: FontMetrics::default(),
            line_color: palette::GRID_LINE,
            select_color: palette::SELECTION,
            marker_color: palette::MARKER,
            caption_color: palette::CAPTION_BG,
            text_color: palette::TEXT,
        }
    }
}

impl GridConfig {
    /// Load a config from JSON. Unknown navigation modes and malformed
    /// colors are rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builder-style setter for the grid line thickness.
    #[must_use]
    pub fn with_line_size(mut self, line_size: i32) -> Self {
        self.line_size = line_size.max(0);
        self
    }

    #[must_use]
    pub fn with_cell_insets(mut self, insets: Insets) -> Self {
        self.cell_insets = insets;
        self
    }

    #[must_use]
    pub fn with_default_sizes(mut self, col_width: i32, row_height: i32) -> Self {
        self.default_col_width = col_width;
        self.default_row_height = row_height;
        self
    }

    #[must_use]
    pub fn with_navigation_mode(mut self, mode: NavigationMode) -> Self {
        self.navigation_mode = mode;
        self
    }
}
