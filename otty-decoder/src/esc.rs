use log::trace;

use crate::command::Dispatch;
use crate::cursor;
use crate::diagnostics::Diagnostic;
use crate::display::Display;

/// What the decoder should do with the element after a non-CSI escape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Followup {
    Continue,
    /// Consume the next element without acting on it.
    IgnoreNext,
}

/// Run the two-unit escape `ESC unit`.
pub(crate) fn perform<D: Display>(
    dispatch: &mut Dispatch<'_, D>,
    unit: char,
) -> Followup {
    let cycles = dispatch.options.blink_suppression_cycles;

    match unit {
        // RIS - Full Reset
        'c' => reset(dispatch),
        // SCS - Designate G0/G1 character set, the selector is skipped
        '(' | ')' => {
            trace!("Skipping charset selector after ESC {unit}");
            return Followup::IgnoreNext;
        },
        // DECSC - Save cursor position
        '7' => dispatch.save_cursor(),
        // DECRC - Restore saved cursor position
        '8' => dispatch.restore_cursor(),
        // IND - Index
        'D' => {
            cursor::next_line(dispatch.display, None, cycles);
        },
        // NEL - Next Line
        'E' => {
            cursor::next_line(dispatch.display, Some(1), cycles);
        },
        // RI - Reverse Index
        'M' => {
            cursor::previous_line(dispatch.display, cycles);
        },
        _ => dispatch.report(Diagnostic::UnimplementedEscape(unit)),
    }

    Followup::Continue
}

fn reset<D: Display>(dispatch: &mut Dispatch<'_, D>) {
    trace!("Resetting decoder and screen");
    dispatch.display.set_cursor_enabled(true);
    dispatch.pen.reset_to_defaults(dispatch.display);

    for _ in 0..dispatch.display.visible_rows() {
        dispatch.display.append_row();
    }

    let origin = cursor::origin(dispatch.display);
    dispatch.move_cursor(origin);
}
