//! Letter-terminated CSI commands.
//!
//! A [`Registry`] maps the terminating letter of a CSI sequence to a plain
//! function. The decoder looks the letter up once the sequence ends, parses
//! the parameters and lends everything the handler may touch through a
//! [`Dispatch`]. Embedders extend the table with
//! [`Registry::register`] or [`DecoderBuilder::with_command`].
//!
//! [`DecoderBuilder::with_command`]: crate::DecoderBuilder::with_command

use std::collections::BTreeMap;
use std::fmt;

use log::trace;

use crate::cursor;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::display::{Display, Point, Row};
use crate::error::{DecodeError, Result};
use crate::options::DecoderOptions;
use crate::params::Params;
use crate::pen::{Pen, SavedCursor};
use crate::sgr;

/// Command implementation. Only ever called with a live [`Dispatch`].
pub type Handler<D> = fn(&mut Dispatch<'_, D>);

/// Callback receiving response bytes, one at a time, in order.
pub type Responder = Box<dyn FnMut(u8) + Send>;

/// Everything a command may read or mutate while it runs.
pub struct Dispatch<'a, D: Display> {
    pub(crate) letter: char,
    pub(crate) params: &'a Params,
    pub(crate) private: bool,
    pub(crate) display: &'a mut D,
    pub(crate) pen: &'a mut Pen,
    pub(crate) saved: &'a mut Option<SavedCursor>,
    pub(crate) responder: &'a mut Option<Responder>,
    pub(crate) diagnostics: &'a mut dyn Diagnostics,
    pub(crate) options: &'a DecoderOptions,
}

impl<D: Display> Dispatch<'_, D> {
    /// Letter that terminated the sequence.
    pub fn letter(&self) -> char {
        self.letter
    }

    pub fn params(&self) -> &Params {
        self.params
    }

    /// Whether the sequence carried the DEC private marker `?`.
    pub fn is_private(&self) -> bool {
        self.private
    }

    pub fn display(&self) -> &D {
        self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        self.display
    }

    pub fn pen(&self) -> &Pen {
        self.pen
    }

    pub fn pen_mut(&mut self) -> &mut Pen {
        self.pen
    }

    pub fn options(&self) -> &DecoderOptions {
        self.options
    }

    /// Logical (1-based) cursor position.
    pub fn cursor(&self) -> Point {
        cursor::position(self.display)
    }

    /// Move the cursor to a logical position.
    pub fn move_cursor(&mut self, logical: Point) -> bool {
        cursor::set_position(
            self.display,
            logical,
            self.options.blink_suppression_cycles,
        )
    }

    /// Remember the cursor position and pen colors.
    pub fn save_cursor(&mut self) {
        let saved = SavedCursor {
            position: self.cursor(),
            foreground: self.pen.foreground,
            background: self.pen.background,
        };
        trace!("Saving cursor {saved:?}");
        *self.saved = Some(saved);
    }

    /// Bring back what [`Dispatch::save_cursor`] stored.
    ///
    /// Without a prior save the cursor goes to the top-left cell of the
    /// visible screen and the pen takes the display's default colors.
    pub fn restore_cursor(&mut self) {
        let saved = self.saved.unwrap_or_else(|| SavedCursor {
            position: cursor::origin(self.display),
            foreground: Some(self.display.default_foreground()),
            background: Some(self.display.default_background()),
        });
        trace!("Restoring cursor {saved:?}");

        self.move_cursor(saved.position);
        self.pen.foreground = saved.foreground;
        self.pen.background = saved.background;
    }

    /// Send bytes back to the host through the response callback.
    pub fn respond(&mut self, bytes: &[u8]) {
        match self.responder.as_mut() {
            Some(responder) => {
                for &byte in bytes {
                    responder(byte);
                }
            },
            None => trace!("No responder, dropping {} bytes", bytes.len()),
        }
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.record(diagnostic);
    }

    /// Blank the logical `columns` of logical row `line` with the pen
    /// background. Rows that are not text rows are left alone.
    pub fn erase(&mut self, line: i32, columns: std::ops::Range<i32>) {
        let Ok(index) = usize::try_from(line - cursor::SHIFT.line) else {
            return;
        };
        let (_, background) = self.pen.effective_colors(self.display);
        let foreground = self.display.default_foreground();

        match self.display.row_mut(index) {
            Some(Row::Text(row)) => {
                let width = row.width() as i32;
                let start = (columns.start - cursor::SHIFT.column).max(0);
                let end = (columns.end - cursor::SHIFT.column).min(width);
                for column in start..end {
                    row.insert(column as usize, " ", foreground, background);
                }
            },
            Some(Row::Other(kind)) => {
                trace!("Skipping erase of {kind} row {index}")
            },
            None => trace!("Skipping erase of missing row {index}"),
        }
    }
}

/// Letter to handler table.
pub struct Registry<D: Display> {
    handlers: BTreeMap<char, Handler<D>>,
}

impl<D: Display> Registry<D> {
    /// Registry without any command.
    pub fn empty() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// Registry with the VT100/ANSI subset the decoder ships with.
    pub fn standard() -> Self {
        let table: [(char, Handler<D>); 20] = [
            ('A', cursor_up),
            ('B', cursor_down),
            ('C', cursor_forward),
            ('D', cursor_backward),
            ('E', cursor_next_line),
            ('F', cursor_preceding_line),
            ('G', cursor_horizontal_absolute),
            ('H', cursor_position),
            ('f', cursor_position),
            ('d', vertical_position_absolute),
            ('J', erase_display),
            ('K', erase_line),
            ('X', erase_characters),
            ('m', select_graphic_rendition),
            ('s', save_cursor),
            ('u', restore_cursor),
            ('n', device_status_report),
            ('c', device_attributes),
            ('h', set_mode),
            ('l', reset_mode),
        ];

        Self {
            handlers: table.into_iter().collect(),
        }
    }

    /// Add or replace the command for `letter`.
    ///
    /// Returns the handler that was replaced, if any.
    pub fn register(
        &mut self,
        letter: char,
        handler: Handler<D>,
    ) -> Result<Option<Handler<D>>> {
        if !letter.is_ascii_alphabetic() {
            return Err(DecodeError::InvalidCommandLetter(letter));
        }

        Ok(self.handlers.insert(letter, handler))
    }

    pub fn unregister(&mut self, letter: char) -> Option<Handler<D>> {
        self.handlers.remove(&letter)
    }

    pub fn get(&self, letter: char) -> Option<Handler<D>> {
        self.handlers.get(&letter).copied()
    }

    pub fn contains(&self, letter: char) -> bool {
        self.handlers.contains_key(&letter)
    }

    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.handlers.keys().copied()
    }
}

impl<D: Display> Default for Registry<D> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<D: Display> fmt::Debug for Registry<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.letters()).finish()
    }
}

/// CUU
fn cursor_up<D: Display>(dispatch: &mut Dispatch<'_, D>) {
    let rows = i32::from(dispatch.params.count_or(0, 1));
    let top = cursor::screen_top(dispatch.display);
    let current = dispatch.cursor();
    trace!("Moving up: {rows}");
    dispatch.move_cursor(current.with_line((current.line - rows).max(top)));
}

/// CUD
fn cursor_down<D: Display>(dispatch: &mut Dispatch<'_, D>) {
    let rows = i32::from(dispatch.params.count_or(0, 1));
    let bottom = cursor::screen_bottom(dispatch.display);
    let current = dispatch.cursor();
    trace!("Moving down: {rows}");
    dispatch.move_cursor(current.with_line((current.line + rows).min(bottom)));
}

/// CUF
fn cursor_forward<D: Display>(dispatch: &mut Dispatch<'_, D>) {
    let columns = i32::from(dispatch.params.count_or(0, 1));
    let last = cursor::last_column(dispatch.display);
    let current = dispatch.cursor();
    trace!("Moving forward: {columns}");
    let column = (current.column + columns).min(last).max(1);
    dispatch.move_cursor(current.with_column(column));
}

/// CUB
fn cursor_backward<D: Display>(dispatch: &mut Dispatch<'_, D>) {
    let columns = i32::from(dispatch.params.count_or(0, 1));
    let current = dispatch.cursor();
    trace!("Moving backward: {columns}");
    let column = (current.column - columns).max(1);
    dispatch.move_cursor(current.with_column(column));
}

/// CNL
fn cursor_next_line<D: Display>(dispatch: &mut Dispatch<'_, D>) {
    let rows = i32::from(dispatch.params.count_or(0, 1));
    let bottom = cursor::screen_bottom(dispatch.display);
    let line = (dispatch.cursor().line + rows).min(bottom);
    dispatch.move_cursor(Point::new(line, 1));
}

/// CPL
fn cursor_preceding_line<D: Display>(dispatch: &mut Dispatch<'_, D>) {
    let rows = i32::from(dispatch.params.count_or(0, 1));
    let top = cursor::screen_top(dispatch.display);
    let line = (dispatch.cursor().line - rows).max(top);
    dispatch.move_cursor(Point::new(line, 1));
}

/// CHA
fn cursor_horizontal_absolute<D: Display>(dispatch: &mut Dispatch<'_, D>) {
    let column = clamp_column(dispatch, dispatch.params.count_or(0, 1));
    let current = dispatch.cursor();
    dispatch.move_cursor(current.with_column(column));
}

/// CUP and HVP
fn cursor_position<D: Display>(dispatch: &mut Dispatch<'_, D>) {
    let line = clamp_line(dispatch, dispatch.params.count_or(0, 1));
    let column = clamp_column(dispatch, dispatch.params.count_or(1, 1));
    trace!("Going to: line={line}, col={column}");
    dispatch.move_cursor(Point::new(line, column));
}

/// VPA
fn vertical_position_absolute<D: Display>(dispatch: &mut Dispatch<'_, D>) {
    let line = clamp_line(dispatch, dispatch.params.count_or(0, 1));
    let current = dispatch.cursor();
    dispatch.move_cursor(current.with_line(line));
}

/// ED
fn erase_display<D: Display>(dispatch: &mut Dispatch<'_, D>) {
    let top = cursor::screen_top(dispatch.display);
    let bottom = cursor::screen_bottom(dispatch.display);
    let end = cursor::last_column(dispatch.display) + 1;
    let current = dispatch.cursor();

    match dispatch.params.get_or(0, 0) {
        0 => {
            dispatch.erase(current.line, current.column..end);
            for line in current.line + 1..=bottom {
                dispatch.erase(line, 1..end);
            }
        },
        1 => {
            for line in top..current.line {
                dispatch.erase(line, 1..end);
            }
            dispatch.erase(current.line, 1..current.column + 1);
        },
        2 => {
            for line in top..=bottom {
                dispatch.erase(line, 1..end);
            }
        },
        value => dispatch.report(Diagnostic::UnsupportedSelector {
            letter: dispatch.letter,
            value,
        }),
    }
}

/// EL
fn erase_line<D: Display>(dispatch: &mut Dispatch<'_, D>) {
    let end = cursor::last_column(dispatch.display) + 1;
    let current = dispatch.cursor();

    match dispatch.params.get_or(0, 0) {
        0 => dispatch.erase(current.line, current.column..end),
        1 => dispatch.erase(current.line, 1..current.column + 1),
        2 => dispatch.erase(current.line, 1..end),
        value => dispatch.report(Diagnostic::UnsupportedSelector {
            letter: dispatch.letter,
            value,
        }),
    }
}

/// ECH
fn erase_characters<D: Display>(dispatch: &mut Dispatch<'_, D>) {
    let count = i32::from(dispatch.params.count_or(0, 1));
    let current = dispatch.cursor();
    dispatch.erase(current.line, current.column..current.column + count);
}

/// SGR
fn select_graphic_rendition<D: Display>(dispatch: &mut Dispatch<'_, D>) {
    sgr::apply(dispatch.pen, dispatch.params, dispatch.diagnostics);
}

/// SCOSC
fn save_cursor<D: Display>(dispatch: &mut Dispatch<'_, D>) {
    dispatch.save_cursor();
}

/// SCORC
fn restore_cursor<D: Display>(dispatch: &mut Dispatch<'_, D>) {
    dispatch.restore_cursor();
}

/// DSR
fn device_status_report<D: Display>(dispatch: &mut Dispatch<'_, D>) {
    match dispatch.params.get_or(0, 0) {
        5 => dispatch.respond(b"\x1b[0n"),
        6 => {
            let top = cursor::screen_top(dispatch.display);
            let current = dispatch.cursor();
            let report = format!(
                "\x1b[{};{}R",
                current.line - top + 1,
                current.column
            );
            dispatch.respond(report.as_bytes());
        },
        value => dispatch.report(Diagnostic::UnsupportedSelector {
            letter: dispatch.letter,
            value,
        }),
    }
}

/// DA
fn device_attributes<D: Display>(dispatch: &mut Dispatch<'_, D>) {
    trace!("Reporting primary device attributes");
    let report = format!("\x1b[{}c", dispatch.options.device_attributes);
    dispatch.respond(report.as_bytes());
}

/// SM, DECSET
fn set_mode<D: Display>(dispatch: &mut Dispatch<'_, D>) {
    apply_modes(dispatch, true);
}

/// RM, DECRST
fn reset_mode<D: Display>(dispatch: &mut Dispatch<'_, D>) {
    apply_modes(dispatch, false);
}

/// DECTCEM (`?25`) is the only mode that reaches the display.
const CURSOR_VISIBLE_MODE: u16 = 25;

fn apply_modes<D: Display>(dispatch: &mut Dispatch<'_, D>, enabled: bool) {
    let private = dispatch.private;
    for mode in dispatch.params.iter().flatten() {
        if private && mode == CURSOR_VISIBLE_MODE {
            trace!("Setting cursor enabled: {enabled}");
            dispatch.display.set_cursor_enabled(enabled);
        } else {
            dispatch
                .diagnostics
                .record(Diagnostic::UnsupportedMode { mode, private });
        }
    }
}

fn clamp_line<D: Display>(dispatch: &Dispatch<'_, D>, row: u16) -> i32 {
    let top = cursor::screen_top(dispatch.display);
    let bottom = cursor::screen_bottom(dispatch.display);
    (top + i32::from(row) - 1).clamp(top, bottom.max(top))
}

fn clamp_column<D: Display>(dispatch: &Dispatch<'_, D>, column: u16) -> i32 {
    let last = cursor::last_column(dispatch.display);
    i32::from(column).clamp(1, last.max(1))
}
