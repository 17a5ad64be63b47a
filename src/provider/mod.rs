//! Collaborator traits the grid delegates to.
//!
//! - [`ViewProvider`] turns a cell value into something paintable
//! - [`EditorProvider`] decides if, how and with which widget a cell is edited
//!
//! Providers receive all context as parameters and never hold a reference
//! to the grid, so the grid can call them while it is mutably borrowed.

mod editor;
mod view;

pub use editor::{Commitable, Editor, EditorProvider, TextEditor, TextEditorProvider};
pub use view::{Align, DefaultViewProvider, TextView, View, ViewProvider};
