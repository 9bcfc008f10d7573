//! In-memory display model for `otty-decoder`.

mod cell;
mod error;
mod grid;
mod screen;

pub use cell::Cell;
pub use error::{Result, ScreenError};
pub use grid::{Line, TextLine};
pub use screen::{Screen, ScreenConfig};
