//! Structured error types for gridview.
//!
//! Every fallible grid operation returns [`Result`]; empty models, zero-size
//! viewports and "no selection" are valid states, not errors.

use crate::layout::Axis;

/// All errors that can occur while configuring, painting or editing a grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Navigation mode string other than `"row"` or `"cell"`.
    #[error("Unsupported navigation mode '{0}'")]
    UnsupportedNavigationMode(String),

    /// Row or column index outside the current model dimensions.
    #[error("{axis} index {index} out of range (len {len})")]
    IndexOutOfRange {
        axis: Axis,
        index: usize,
        len: usize,
    },

    /// Configuration could not be deserialized.
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Color string is not `#RRGGBB`.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// A view failed while painting a cell.
    #[error("Render error: {0}")]
    Render(String),

    /// An editor failed to commit or produce its value.
    #[error("Edit error: {0}")]
    Edit(String),

    /// The model refused a write.
    #[error("Model is read-only")]
    ReadOnly,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl GridError {
    pub(crate) fn out_of_range(axis: Axis, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { axis, index, len }
    }
}

