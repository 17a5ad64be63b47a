//! Plain data types shared by the grid engine and its collaborators.

mod cell;
mod geometry;
mod input;
mod selection;

pub use cell::*;
pub use geometry::*;
pub use input::*;
pub use selection::*;
