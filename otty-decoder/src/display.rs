//! Display model collaborator consumed by the decoder.
//!
//! The decoder never owns rows or the real cursor. Everything it does ends up
//! as calls on a [`Display`] implementation, which is free to store rows,
//! coalesce redraw hints or clamp cursor positions however it likes.
//! Coordinates on this interface are 0-based; the decoder works in a 1-based
//! logical space and converts through [`crate::cursor`].

use std::ops::{Add, Sub};

use crate::color::Color;

/// Position of a cell, `line` first.
///
/// Signed on purpose: a backspace at column 1 yields a real column of `-1`
/// and it is up to the display to clamp it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub line: i32,
    pub column: i32,
}

impl Point {
    pub const fn new(line: i32, column: i32) -> Self {
        Self { line, column }
    }

    #[must_use]
    pub const fn with_column(self, column: i32) -> Self {
        Self {
            line: self.line,
            column,
        }
    }

    #[must_use]
    pub const fn with_line(self, line: i32) -> Self {
        Self {
            line,
            column: self.column,
        }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Self::Output {
        Point::new(self.line + rhs.line, self.column + rhs.column)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Self::Output {
        Point::new(self.line - rhs.line, self.column - rhs.column)
    }
}

/// A fixed-width row of text cells.
pub trait TextRow {
    /// Number of cells in the row.
    fn width(&self) -> usize;

    /// Write `element` (a scalar or a grapheme cluster) into `column`.
    fn insert(
        &mut self,
        column: usize,
        element: &str,
        foreground: Color,
        background: Color,
    );
}

/// A row handed out by [`Display::row_mut`].
pub enum Row<'a> {
    /// Row that accepts character insertion.
    Text(&'a mut dyn TextRow),
    /// Any other row kind. The string names the kind for error reporting.
    Other(&'static str),
}

/// The display model the decoder mutates.
pub trait Display {
    /// Real (0-based) cursor position.
    fn cursor(&self) -> Point;

    fn set_cursor(&mut self, point: Point);

    /// Largest addressable position: the last row and the last column.
    fn max_cursor(&self) -> Point;

    fn set_cursor_enabled(&mut self, enabled: bool);

    /// Keep the cursor glyph solid for the next `cycles` blink cycles.
    fn keep_cursor_visible(&mut self, cycles: u32);

    fn default_foreground(&self) -> Color;

    fn default_background(&self) -> Color;

    fn set_default_foreground(&mut self, color: Color);

    fn set_default_background(&mut self, color: Color);

    /// Append a blank fixed-width text row after the last row.
    fn append_row(&mut self);

    fn row_mut(&mut self, index: usize) -> Option<Row<'_>>;

    /// Number of rows that fit on the screen.
    fn visible_rows(&self) -> usize;

    /// Hint that the display should be repainted. May be coalesced.
    fn request_redraw(&mut self);
}
