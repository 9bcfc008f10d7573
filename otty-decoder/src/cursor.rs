//! Conversion between the decoder's logical cursor and the display cursor.
//!
//! Logical coordinates are 1-based on both axes, real ones are 0-based. The
//! helpers here only take the display as a parameter, so any command handler
//! can use them without holding on to decoder state.

use crate::display::{Display, Point};

/// Offset added to a real position to get the logical one.
pub const SHIFT: Point = Point::new(1, 1);

/// Logical cursor position.
#[inline]
pub fn position<D: Display + ?Sized>(display: &D) -> Point {
    display.cursor() + SHIFT
}

/// Move the cursor to a logical position.
///
/// The display is only touched when the real position changes; in that case
/// it is also told to keep the cursor visible for `blink_cycles`. Returns
/// whether anything was written.
pub fn set_position<D: Display + ?Sized>(
    display: &mut D,
    logical: Point,
    blink_cycles: u32,
) -> bool {
    let real = logical - SHIFT;
    if real == display.cursor() {
        return false;
    }

    display.set_cursor(real);
    display.keep_cursor_visible(blink_cycles);
    true
}

/// Logical line of the first visible row.
pub fn screen_top<D: Display + ?Sized>(display: &D) -> i32 {
    let rows = display.max_cursor().line + 1;
    (rows - display.visible_rows() as i32).max(0) + SHIFT.line
}

/// Logical line of the last row.
#[inline]
pub fn screen_bottom<D: Display + ?Sized>(display: &D) -> i32 {
    display.max_cursor().line + SHIFT.line
}

/// Logical column of the last cell in a row.
#[inline]
pub fn last_column<D: Display + ?Sized>(display: &D) -> i32 {
    display.max_cursor().column + SHIFT.column
}

/// Top-left cell of the visible screen.
#[inline]
pub fn origin<D: Display + ?Sized>(display: &D) -> Point {
    Point::new(screen_top(display), 1)
}

/// Move to the row below, appending a blank row first when the cursor is on
/// the last one. `column` keeps the current column when `None`.
pub fn next_line<D: Display + ?Sized>(
    display: &mut D,
    column: Option<i32>,
    blink_cycles: u32,
) -> bool {
    if display.cursor().line >= display.max_cursor().line {
        display.append_row();
    }

    let current = position(display);
    let column = column.unwrap_or(current.column);
    set_position(
        display,
        Point::new(current.line + 1, column),
        blink_cycles,
    )
}

/// Move to the row above, stopping at the top of the visible screen.
pub fn previous_line<D: Display + ?Sized>(
    display: &mut D,
    blink_cycles: u32,
) -> bool {
    let current = position(display);
    let line = (current.line - 1).max(screen_top(display));
    set_position(display, current.with_line(line), blink_cycles)
}
