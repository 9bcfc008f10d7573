use log::trace;
use unicode_segmentation::UnicodeSegmentation;

use crate::bell::{BellListenerId, BellListeners};
use crate::builder::DecoderBuilder;
use crate::command::{Dispatch, Handler, Registry, Responder};
use crate::control::{self, ControlByte};
use crate::cursor;
use crate::diagnostics::{Diagnostic, Diagnostics, LogDiagnostics};
use crate::display::{Display, Point, Row};
use crate::error::{DecodeError, Result};
use crate::esc::{self, Followup};
use crate::options::DecoderOptions;
use crate::params::Params;
use crate::pen::{Pen, SavedCursor};

/// Sequence state carried between elements.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
enum State {
    #[default]
    Normal,
    /// Escape seen, the next unit decides what kind of sequence it is.
    Escape,
    /// Inside `ESC [`, collecting parameter text until a letter arrives.
    Csi { params: String, private: bool },
}

/// Streaming VT100/ANSI input decoder.
///
/// Elements are pushed one at a time with [`Decoder::feed`]; sequence state
/// spans calls. The display is borrowed per call so the decoder never owns
/// screen state.
pub struct Decoder<D: Display, G: Diagnostics = LogDiagnostics> {
    state: State,
    ignore_next: bool,
    pen: Pen,
    saved: Option<SavedCursor>,
    registry: Registry<D>,
    options: DecoderOptions,
    diagnostics: G,
    responder: Option<Responder>,
    bell: BellListeners,
}

impl<D: Display> Decoder<D> {
    /// Decoder with the standard command set, default options and
    /// log-backed diagnostics.
    pub fn new() -> Self {
        DecoderBuilder::new().build()
    }

    pub fn builder() -> DecoderBuilder<D> {
        DecoderBuilder::new()
    }
}

impl<D: Display> Default for Decoder<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Display, G: Diagnostics> Decoder<D, G> {
    pub(crate) fn from_parts(
        registry: Registry<D>,
        options: DecoderOptions,
        diagnostics: G,
        responder: Option<Responder>,
    ) -> Self {
        Self {
            state: State::Normal,
            ignore_next: false,
            pen: Pen::default(),
            saved: None,
            registry,
            options,
            diagnostics,
            responder,
            bell: BellListeners::default(),
        }
    }

    /// Consume one text element: a single scalar or a grapheme cluster.
    ///
    /// The display is asked to redraw after every element, whatever the
    /// outcome. Errors mean the display handed out a row the decoder cannot
    /// write to; decoder state stays consistent and feeding may continue.
    pub fn feed(&mut self, element: &str, display: &mut D) -> Result<()> {
        let result = self.process(element, display);
        display.request_redraw();
        result
    }

    /// Split `text` into grapheme clusters and feed them in order.
    ///
    /// Clusters holding a control scalar, and everything inside a pending
    /// sequence, are fed one scalar at a time. Stops at the first error.
    pub fn feed_str(&mut self, text: &str, display: &mut D) -> Result<()> {
        let mut buf = [0; 4];

        for cluster in text.graphemes(true) {
            let split = self.in_sequence()
                || (cluster.chars().nth(1).is_some()
                    && cluster.chars().any(char::is_control));

            if split {
                for unit in cluster.chars() {
                    self.feed(unit.encode_utf8(&mut buf), display)?;
                }
            } else {
                self.feed(cluster, display)?;
            }
        }

        Ok(())
    }

    /// Whether an escape or CSI sequence is still open.
    pub fn in_sequence(&self) -> bool {
        self.state != State::Normal
    }

    /// Attach a listener called synchronously on every BEL.
    pub fn on_bell<F>(&mut self, listener: F) -> BellListenerId
    where
        F: FnMut() + Send + 'static,
    {
        self.bell.attach(Box::new(listener))
    }

    /// Detach a bell listener. Returns `false` when `id` was not attached.
    pub fn remove_bell_listener(&mut self, id: BellListenerId) -> bool {
        self.bell.detach(id)
    }

    /// Add or replace a CSI command after construction.
    pub fn register(
        &mut self,
        letter: char,
        handler: Handler<D>,
    ) -> Result<Option<Handler<D>>> {
        self.registry.register(letter, handler)
    }

    pub fn registry(&self) -> &Registry<D> {
        &self.registry
    }

    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    pub fn pen(&self) -> &Pen {
        &self.pen
    }

    pub fn diagnostics(&self) -> &G {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut G {
        &mut self.diagnostics
    }

    fn process(&mut self, element: &str, display: &mut D) -> Result<()> {
        if std::mem::take(&mut self.ignore_next) {
            trace!("Ignoring element {element:?}");
            return Ok(());
        }

        let mut units = element.chars();
        let Some(unit) = units.next() else {
            return Ok(());
        };

        if units.next().is_some() {
            return self.insert(element, display);
        }

        if self.in_sequence() {
            self.advance_sequence(unit, display);
            return Ok(());
        }

        self.control_or_print(unit, display)
    }

    fn control_or_print(&mut self, unit: char, display: &mut D) -> Result<()> {
        let cycles = self.options.blink_suppression_cycles;

        match ControlByte::classify(unit) {
            Some(ControlByte::Backspace) => {
                let current = cursor::position(display);
                cursor::set_position(
                    display,
                    current.with_column(current.column - 1),
                    cycles,
                );
            },
            Some(ControlByte::Escape) => {
                trace!("Entering escape");
                self.state = State::Escape;
            },
            Some(ControlByte::LineFeed) => {
                cursor::next_line(display, Some(1), cycles);
            },
            Some(ControlByte::CarriageReturn) => {
                let current = cursor::position(display);
                cursor::set_position(display, current.with_column(1), cycles);
            },
            Some(ControlByte::Bell) => {
                trace!("Ringing bell");
                self.bell.ring();
            },
            Some(ControlByte::HorizontalTab) => {
                return self.insert(" ", display);
            },
            Some(ControlByte::CsiIntroducer) | None => {
                if let Some(caret) = control::caret_notation(unit) {
                    let mut buf = [0; 4];
                    self.feed("^", display)?;
                    return self.feed(caret.encode_utf8(&mut buf), display);
                }

                if unit.is_control() {
                    self.diagnostics
                        .record(Diagnostic::UnimplementedControl(unit));
                } else {
                    let mut buf = [0; 4];
                    return self.insert(unit.encode_utf8(&mut buf), display);
                }
            },
        }

        Ok(())
    }

    fn advance_sequence(&mut self, unit: char, display: &mut D) {
        match std::mem::take(&mut self.state) {
            State::Normal => {},
            State::Escape if ControlByte::is_csi_introducer(unit) => {
                trace!("Entering CSI");
                self.state = State::Csi {
                    params: String::new(),
                    private: false,
                };
            },
            State::Escape => {
                let params = Params::default();
                let mut dispatch = self.lend(display, &params, unit, false);
                let followup = esc::perform(&mut dispatch, unit);
                self.ignore_next = followup == Followup::IgnoreNext;
            },
            State::Csi { params, .. } if unit == '\x1b' => {
                self.diagnostics
                    .record(Diagnostic::MalformedSequence { params });
            },
            State::Csi { params, private } if unit.is_alphabetic() => {
                self.dispatch_csi(unit, &params, private, display);
            },
            State::Csi { params, .. } if unit == '?' => {
                self.state = State::Csi {
                    params,
                    private: true,
                };
            },
            State::Csi { mut params, private } => {
                if params.len() + unit.len_utf8() > self.options.max_csi_len {
                    self.diagnostics.record(Diagnostic::SequenceTooLong {
                        limit: self.options.max_csi_len,
                    });
                } else {
                    params.push(unit);
                    self.state = State::Csi { params, private };
                }
            },
        }
    }

    fn dispatch_csi(
        &mut self,
        letter: char,
        text: &str,
        private: bool,
        display: &mut D,
    ) {
        let Some(handler) = self.registry.get(letter) else {
            self.diagnostics.record(Diagnostic::UnimplementedCsi {
                letter,
                params: text.to_owned(),
                private,
            });
            return;
        };

        let params = match Params::parse(text) {
            Ok(params) => params,
            Err(field) => {
                self.diagnostics.record(Diagnostic::InvalidParameter {
                    letter,
                    field: field.to_owned(),
                });
                return;
            },
        };

        trace!("Dispatching CSI {letter:?}, params: {params:?}");
        handler(&mut self.lend(display, &params, letter, private));
    }

    fn lend<'a>(
        &'a mut self,
        display: &'a mut D,
        params: &'a Params,
        letter: char,
        private: bool,
    ) -> Dispatch<'a, D> {
        Dispatch {
            letter,
            params,
            private,
            display,
            pen: &mut self.pen,
            saved: &mut self.saved,
            responder: &mut self.responder,
            diagnostics: &mut self.diagnostics,
            options: &self.options,
        }
    }

    /// Write `element` at the cursor and advance one column.
    fn insert(&mut self, element: &str, display: &mut D) -> Result<()> {
        let position = display.cursor();
        let (foreground, background) = self.pen.effective_colors(display);
        let missing = DecodeError::MissingRow {
            row: i64::from(position.line),
        };
        let row = usize::try_from(position.line).map_err(|_| missing.clone())?;
        // Backspace at column 1 may leave a negative column on displays that
        // do not clamp; such text lands in the first cell.
        let column = position.column.max(0);

        match display.row_mut(row) {
            Some(Row::Text(text)) => {
                text.insert(column as usize, element, foreground, background);
            },
            Some(Row::Other(kind)) => {
                return Err(DecodeError::NotATextRow { row, kind });
            },
            None => return Err(missing),
        }

        let next = position.with_column(column + 1) + cursor::SHIFT;
        cursor::set_position(
            display,
            next,
            self.options.blink_suppression_cycles,
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::color::{Color, StdColor};
    use crate::pen::Rendition;
    use crate::testing::{MockDisplay, MockRow};

    type TestDecoder = Decoder<MockDisplay, Vec<Diagnostic>>;

    fn decoder() -> TestDecoder {
        Decoder::builder().with_diagnostics(Vec::new()).build()
    }

    fn responding_decoder() -> (TestDecoder, Arc<Mutex<Vec<u8>>>) {
        let written = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&written);
        let decoder = Decoder::builder()
            .with_diagnostics(Vec::new())
            .with_responder(move |byte| sink.lock().unwrap().push(byte))
            .build();

        (decoder, written)
    }

    /// Feed every scalar of `input` as its own element.
    fn feed_units(
        decoder: &mut TestDecoder,
        display: &mut MockDisplay,
        input: &str,
    ) {
        let mut buf = [0; 4];
        for unit in input.chars() {
            decoder.feed(unit.encode_utf8(&mut buf), display).unwrap();
        }
    }

    #[test]
    fn printable_inserts_at_cursor_and_advances() {
        let mut decoder = decoder();
        let mut display = MockDisplay::new(10, 3);
        display.cursor = Point::new(1, 2);

        decoder.feed("x", &mut display).unwrap();

        assert_eq!(
            display.cell(1, 2),
            Some(&(
                String::from("x"),
                Color::Std(StdColor::Foreground),
                Color::Std(StdColor::Background),
            ))
        );
        assert_eq!(display.cursor, Point::new(1, 3));
        assert_eq!(display.rows.len(), 3);
        assert_eq!(display.blink_signals, vec![1]);
        assert_eq!(display.redraws, 1);
    }

    #[test]
    fn grapheme_cluster_occupies_one_cell() {
        let mut decoder = decoder();
        let mut display = MockDisplay::new(10, 3);

        decoder.feed("e\u{301}", &mut display).unwrap();

        assert_eq!(display.cell(0, 0).unwrap().0, "e\u{301}");
        assert_eq!(display.cursor, Point::new(0, 1));
    }

    #[test]
    fn line_feed_grows_only_on_last_row() {
        let mut decoder = decoder();
        let mut display = MockDisplay::new(10, 3);
        display.cursor = Point::new(1, 4);

        decoder.feed("\n", &mut display).unwrap();
        assert_eq!(display.rows.len(), 3);
        assert_eq!(display.cursor, Point::new(2, 0));

        decoder.feed("\n", &mut display).unwrap();
        assert_eq!(display.rows.len(), 4);
        assert_eq!(display.cursor, Point::new(3, 0));
    }

    #[test]
    fn carriage_return_line_feed_matches_line_feed() {
        let mut display = MockDisplay::new(10, 3);
        let mut decoder = decoder();
        feed_units(&mut decoder, &mut display, "ab\r\n");

        let mut reference = MockDisplay::new(10, 3);
        let mut other = self::decoder();
        feed_units(&mut other, &mut reference, "ab\n");

        assert_eq!(display.cursor, Point::new(1, 0));
        assert_eq!(display.cursor, reference.cursor);
    }

    #[test]
    fn backspace_and_tab() {
        let mut decoder = decoder();
        let mut display = MockDisplay::new(10, 3);

        feed_units(&mut decoder, &mut display, "ab\x08\t");

        assert_eq!(display.line_text(0), "a ........");
        assert_eq!(display.cursor, Point::new(0, 2));
    }

    #[test]
    fn caret_echo_for_other_c0_codes() {
        let mut decoder = decoder();
        let mut display = MockDisplay::new(10, 3);

        decoder.feed("\x01", &mut display).unwrap();

        assert_eq!(display.line_text(0), "^A........");
        assert_eq!(display.cursor, Point::new(0, 2));
        assert!(decoder.diagnostics().is_empty());
        // Once for the control, once per echoed element.
        assert_eq!(display.redraws, 3);
        assert_eq!(display.blink_signals.len(), 2);
    }

    #[test]
    fn delete_and_c1_are_reported() {
        let mut decoder = decoder();
        let mut display = MockDisplay::new(10, 3);

        feed_units(&mut decoder, &mut display, "\x7f\u{85}");

        assert_eq!(
            decoder.diagnostics(),
            &vec![
                Diagnostic::UnimplementedControl('\x7f'),
                Diagnostic::UnimplementedControl('\u{85}'),
            ]
        );
        assert_eq!(display.set_cursor_calls, 0);
        assert_eq!(display.redraws, 2);
    }

    #[test]
    fn empty_element_only_redraws() {
        let mut decoder = decoder();
        let mut display = MockDisplay::new(10, 3);

        decoder.feed("", &mut display).unwrap();

        assert_eq!(display.redraws, 1);
        assert_eq!(display.set_cursor_calls, 0);
    }

    #[test]
    fn bell_notifies_listeners() {
        let mut decoder = decoder();
        let mut display = MockDisplay::new(10, 3);
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let id = decoder.on_bell(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        decoder.feed("\x07", &mut display).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(display.set_cursor_calls, 0);

        assert!(decoder.remove_bell_listener(id));
        decoder.feed("\x07", &mut display).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unregistered_csi_is_reported_once() {
        let mut decoder = decoder();
        let mut display = MockDisplay::new(10, 3);
        let before = display.clone();

        feed_units(&mut decoder, &mut display, "\x1b[2y");

        assert_eq!(
            decoder.diagnostics(),
            &vec![Diagnostic::UnimplementedCsi {
                letter: 'y',
                params: String::from("2"),
                private: false,
            }]
        );
        assert_eq!(display.rows, before.rows);
        assert_eq!(display.cursor, before.cursor);
        assert!(!decoder.in_sequence());
    }

    #[test]
    fn escape_inside_csi_is_malformed() {
        let mut decoder = decoder();
        let mut display = MockDisplay::new(10, 3);

        feed_units(&mut decoder, &mut display, "\x1b[12\x1bx");

        assert_eq!(
            decoder.diagnostics(),
            &vec![Diagnostic::MalformedSequence {
                params: String::from("12"),
            }]
        );
        assert!(!decoder.in_sequence());
        assert_eq!(display.line_text(0), "x.........");
    }

    #[test]
    fn invalid_parameter_abandons_sequence() {
        let mut decoder = decoder();
        let mut display = MockDisplay::new(10, 3);

        feed_units(&mut decoder, &mut display, "\x1b[1:2H\x1b[2;xB");

        assert_eq!(
            decoder.diagnostics(),
            &vec![
                Diagnostic::InvalidParameter {
                    letter: 'H',
                    field: String::from("1:2"),
                },
                Diagnostic::UnimplementedCsi {
                    letter: 'x',
                    params: String::from("2;"),
                    private: false,
                },
            ]
        );
        // `x` ends the second sequence, so `B` is printed.
        assert_eq!(display.line_text(0), "B.........");
        assert!(!decoder.in_sequence());
    }

    #[test]
    fn oversized_parameter_saturates() {
        let mut decoder = decoder();
        let mut display = MockDisplay::new(10, 3);

        feed_units(&mut decoder, &mut display, "\x1b[70000C");
        assert_eq!(display.cursor, Point::new(0, 9));

        feed_units(&mut decoder, &mut display, "\x1b[99999B");
        assert_eq!(display.cursor, Point::new(2, 9));
        assert!(decoder.diagnostics().is_empty());
    }

    #[test]
    fn non_ascii_letter_ends_sequence() {
        let mut decoder = decoder();
        let mut display = MockDisplay::new(10, 3);

        feed_units(&mut decoder, &mut display, "\x1b[2\u{e9}x");

        assert_eq!(
            decoder.diagnostics(),
            &vec![Diagnostic::UnimplementedCsi {
                letter: '\u{e9}',
                params: String::from("2"),
                private: false,
            }]
        );
        assert_eq!(display.line_text(0), "x.........");
        assert!(!decoder.in_sequence());
    }

    #[test]
    fn negative_column_writes_first_cell() {
        let mut decoder = decoder();
        let mut display = MockDisplay::new(10, 3);
        display.cursor = Point::new(1, -1);

        decoder.feed("x", &mut display).unwrap();

        assert_eq!(display.line_text(1), "x.........");
        assert_eq!(display.cursor, Point::new(1, 1));
    }

    #[test]
    fn overlong_sequence_is_dropped() {
        let mut decoder = Decoder::builder()
            .with_diagnostics(Vec::new())
            .with_options(DecoderOptions {
                max_csi_len: 4,
                ..DecoderOptions::default()
            })
            .build();
        let mut display = MockDisplay::new(10, 3);

        feed_units(&mut decoder, &mut display, "\x1b[1;2;3Hz");

        assert_eq!(
            decoder.diagnostics(),
            &vec![Diagnostic::SequenceTooLong { limit: 4 }]
        );
        // The overflowing unit is dropped, the rest is printed as text.
        assert_eq!(display.line_text(0), "Hz........");
    }

    #[test]
    fn private_marker_anywhere_in_sequence() {
        let mut decoder = decoder();
        let mut display = MockDisplay::new(10, 3);

        feed_units(&mut decoder, &mut display, "\x1b[?25l");
        assert!(!display.cursor_enabled);

        feed_units(&mut decoder, &mut display, "\x1b[2?5h");
        assert!(display.cursor_enabled);
        assert!(decoder.diagnostics().is_empty());
    }

    #[test]
    fn full_reset() {
        let mut decoder = decoder();
        let mut display = MockDisplay::new(10, 3);
        display.cursor_enabled = false;
        display.cursor = Point::new(1, 5);
        feed_units(&mut decoder, &mut display, "\x1b[1;31m");

        feed_units(&mut decoder, &mut display, "\x1bc");

        assert_eq!(display.rows.len(), 6);
        assert_eq!(display.cursor, Point::new(3, 0));
        assert!(display.cursor_enabled);
        assert_eq!(decoder.pen().foreground, Some(display.foreground));
        assert_eq!(decoder.pen().background, Some(display.background));
        assert!(decoder.pen().rendition.is_empty());
    }

    #[test]
    fn save_move_restore() {
        let mut decoder = decoder();
        let mut display = MockDisplay::new(10, 3);
        display.cursor = Point::new(1, 3);

        feed_units(&mut decoder, &mut display, "\x1b[32;44m\x1b7");
        feed_units(&mut decoder, &mut display, "\x1b[0m\x1b[3;9H");
        assert_eq!(display.cursor, Point::new(2, 8));

        feed_units(&mut decoder, &mut display, "\x1b8");

        assert_eq!(display.cursor, Point::new(1, 3));
        assert_eq!(
            decoder.pen().foreground,
            Some(Color::Std(StdColor::Green))
        );
        assert_eq!(decoder.pen().background, Some(Color::Std(StdColor::Blue)));
    }

    #[test]
    fn restore_without_save_goes_to_origin() {
        let mut decoder = decoder();
        let mut display = MockDisplay::new(10, 3);
        display.append_row();
        display.cursor = Point::new(3, 6);

        feed_units(&mut decoder, &mut display, "\x1b[u");

        assert_eq!(display.cursor, Point::new(1, 0));
        assert_eq!(decoder.pen().foreground, Some(display.foreground));
    }

    #[test]
    fn charset_selection_skips_selector() {
        let mut decoder = decoder();
        let mut display = MockDisplay::new(10, 3);

        feed_units(&mut decoder, &mut display, "\x1b(Bx\x1b)0y");

        assert_eq!(display.line_text(0), "xy........");
        assert!(decoder.diagnostics().is_empty());
    }

    #[test]
    fn index_and_reverse_index() {
        let mut decoder = decoder();
        let mut display = MockDisplay::new(10, 2);
        display.cursor = Point::new(1, 4);

        feed_units(&mut decoder, &mut display, "\x1bD");
        assert_eq!(display.rows.len(), 3);
        assert_eq!(display.cursor, Point::new(2, 4));

        feed_units(&mut decoder, &mut display, "\x1bM\x1bM");
        assert_eq!(display.cursor, Point::new(1, 4));

        feed_units(&mut decoder, &mut display, "\x1bE");
        assert_eq!(display.cursor, Point::new(2, 0));
    }

    #[test]
    fn unknown_escape_is_reported() {
        let mut decoder = decoder();
        let mut display = MockDisplay::new(10, 3);

        feed_units(&mut decoder, &mut display, "\x1bZa");

        assert_eq!(
            decoder.diagnostics(),
            &vec![Diagnostic::UnimplementedEscape('Z')]
        );
        assert_eq!(display.line_text(0), "a.........");
    }

    #[test]
    fn insertion_into_separator_fails() {
        let mut decoder = decoder();
        let mut display = MockDisplay::new(10, 3);
        display.rows[0] = MockRow::Separator;

        let err = decoder.feed("x", &mut display).unwrap_err();

        assert_eq!(
            err,
            DecodeError::NotATextRow {
                row: 0,
                kind: "separator",
            }
        );
        assert_eq!(display.cursor, Point::new(0, 0));
        assert_eq!(display.redraws, 1);

        display.cursor = Point::new(1, 0);
        decoder.feed("y", &mut display).unwrap();
        assert_eq!(display.line_text(1), "y.........");
    }

    #[test]
    fn insertion_into_missing_row_fails() {
        let mut decoder = decoder();
        let mut display = MockDisplay::new(10, 3);
        display.cursor = Point::new(-1, 0);

        assert_eq!(
            decoder.feed("x", &mut display),
            Err(DecodeError::MissingRow { row: -1 })
        );
    }

    #[test]
    fn cursor_motion_commands() {
        let cases = vec![
            ("\x1b[A", Point::new(1, 4)),
            ("\x1b[9A", Point::new(0, 4)),
            ("\x1b[B", Point::new(3, 4)),
            ("\x1b[0B", Point::new(3, 4)),
            ("\x1b[9B", Point::new(4, 4)),
            ("\x1b[2C", Point::new(2, 6)),
            ("\x1b[99C", Point::new(2, 9)),
            ("\x1b[3D", Point::new(2, 1)),
            ("\x1b[99D", Point::new(2, 0)),
            ("\x1b[E", Point::new(3, 0)),
            ("\x1b[2F", Point::new(0, 0)),
            ("\x1b[7G", Point::new(2, 6)),
            ("\x1b[H", Point::new(0, 0)),
            ("\x1b[2;3H", Point::new(1, 2)),
            ("\x1b[;3f", Point::new(0, 2)),
            ("\x1b[99;99H", Point::new(4, 9)),
            ("\x1b[4d", Point::new(3, 4)),
        ];

        for (input, expected) in cases {
            let mut decoder = decoder();
            let mut display = MockDisplay::new(10, 5);
            display.cursor = Point::new(2, 4);

            feed_units(&mut decoder, &mut display, input);

            assert_eq!(display.cursor, expected, "{input:?}");
            assert!(decoder.diagnostics().is_empty(), "{input:?}");
        }
    }

    #[test]
    fn absolute_rows_are_relative_to_screen_top() {
        let mut decoder = decoder();
        let mut display = MockDisplay::new(10, 2);
        display.append_row();
        display.append_row();

        feed_units(&mut decoder, &mut display, "\x1b[1;1H");
        assert_eq!(display.cursor, Point::new(2, 0));

        feed_units(&mut decoder, &mut display, "\x1b[9A");
        assert_eq!(display.cursor, Point::new(2, 0));
    }

    #[test]
    fn erase_commands() {
        let lines = ["abcdef", "ghijkl", "mnopqr"];
        let cases = vec![
            ("\x1b[K", ["abcdef", "gh    ", "mnopqr"]),
            ("\x1b[0K", ["abcdef", "gh    ", "mnopqr"]),
            ("\x1b[1K", ["abcdef", "   jkl", "mnopqr"]),
            ("\x1b[2K", ["abcdef", "      ", "mnopqr"]),
            ("\x1b[J", ["abcdef", "gh    ", "      "]),
            ("\x1b[1J", ["      ", "   jkl", "mnopqr"]),
            ("\x1b[2J", ["      ", "      ", "      "]),
            ("\x1b[2X", ["abcdef", "gh  kl", "mnopqr"]),
        ];

        for (input, expected) in cases {
            let mut decoder = decoder();
            let mut display = MockDisplay::new(6, 3);
            for (line, text) in lines.iter().enumerate() {
                display.cursor = Point::new(line as i32, 0);
                feed_units(&mut decoder, &mut display, text);
            }
            display.cursor = Point::new(1, 2);

            feed_units(&mut decoder, &mut display, input);

            for (line, text) in expected.iter().enumerate() {
                assert_eq!(display.line_text(line), *text, "{input:?}");
            }
            assert_eq!(display.cursor, Point::new(1, 2), "{input:?}");
        }
    }

    #[test]
    fn erase_uses_pen_background() {
        let mut decoder = decoder();
        let mut display = MockDisplay::new(4, 1);

        feed_units(&mut decoder, &mut display, "\x1b[41m\x1b[2K");

        assert_eq!(
            display.cell(0, 3),
            Some(&(
                String::from(" "),
                Color::Std(StdColor::Foreground),
                Color::Std(StdColor::Red),
            ))
        );
    }

    #[test]
    fn unsupported_selectors_and_modes_are_reported() {
        let mut decoder = decoder();
        let mut display = MockDisplay::new(4, 1);

        feed_units(&mut decoder, &mut display, "\x1b[3J\x1b[4h\x1b[?1049l");

        assert_eq!(
            decoder.diagnostics(),
            &vec![
                Diagnostic::UnsupportedSelector {
                    letter: 'J',
                    value: 3,
                },
                Diagnostic::UnsupportedMode {
                    mode: 4,
                    private: false,
                },
                Diagnostic::UnsupportedMode {
                    mode: 1049,
                    private: true,
                },
            ]
        );
    }

    #[test]
    fn sgr_colors_reach_inserted_cells() {
        let mut decoder = decoder();
        let mut display = MockDisplay::new(4, 1);

        feed_units(&mut decoder, &mut display, "\x1b[1;31;42mx\x1b[7my\x1b[mz");

        let red = Color::Std(StdColor::BrightRed);
        let green = Color::Std(StdColor::Green);
        assert_eq!(display.cell(0, 0).unwrap().1, red);
        assert_eq!(display.cell(0, 0).unwrap().2, green);
        assert_eq!(display.cell(0, 1).unwrap().1, green);
        assert_eq!(display.cell(0, 1).unwrap().2, red);
        assert_eq!(
            display.cell(0, 2).unwrap().1,
            Color::Std(StdColor::Foreground)
        );
        assert_eq!(decoder.pen().rendition, Rendition::empty());
    }

    #[test]
    fn status_reports() {
        let (mut decoder, written) = responding_decoder();
        let mut display = MockDisplay::new(10, 3);
        display.append_row();
        display.cursor = Point::new(2, 4);

        feed_units(&mut decoder, &mut display, "\x1b[5n\x1b[6n\x1b[c");

        assert_eq!(
            written.lock().unwrap().as_slice(),
            b"\x1b[0n\x1b[2;5R\x1b[?1;2c"
        );
    }

    #[test]
    fn responses_without_responder_are_dropped() {
        let mut decoder = decoder();
        let mut display = MockDisplay::new(10, 3);

        feed_units(&mut decoder, &mut display, "\x1b[6n");

        assert!(decoder.diagnostics().is_empty());
        assert!(!decoder.in_sequence());
    }

    #[test]
    fn registered_command_runs() {
        fn mark<D: Display>(dispatch: &mut Dispatch<'_, D>) {
            let count = dispatch.params().count_or(0, 1);
            let current = dispatch.cursor();
            dispatch.move_cursor(current.with_column(i32::from(count)));
        }

        let mut decoder = decoder();
        let mut display = MockDisplay::new(10, 3);

        assert!(decoder.register('y', mark).unwrap().is_none());
        assert!(matches!(
            decoder.register('1', mark),
            Err(DecodeError::InvalidCommandLetter('1'))
        ));

        feed_units(&mut decoder, &mut display, "\x1b[5y");

        assert_eq!(display.cursor, Point::new(0, 4));
        assert!(decoder.diagnostics().is_empty());
    }

    #[test]
    fn feed_str_splits_control_clusters() {
        let mut decoder = decoder();
        let mut display = MockDisplay::new(10, 3);

        decoder
            .feed_str("ab\r\ne\u{301}\x1b[31mc", &mut display)
            .unwrap();

        assert_eq!(display.line_text(0), "ab........");
        assert_eq!(display.line_text(1), "e\u{301}c........");
        assert_eq!(display.cursor, Point::new(1, 2));
        assert!(!decoder.in_sequence());
    }

    #[test]
    fn cursor_signal_only_on_change() {
        let mut decoder = decoder();
        let mut display = MockDisplay::new(10, 3);

        feed_units(&mut decoder, &mut display, "\x1b[1;1H\r");

        assert_eq!(display.set_cursor_calls, 0);
        assert!(display.blink_signals.is_empty());
    }

    #[test]
    fn blink_cycles_follow_options() {
        let mut decoder = Decoder::builder()
            .with_diagnostics(Vec::new())
            .with_options(DecoderOptions {
                blink_suppression_cycles: 5,
                ..DecoderOptions::default()
            })
            .build();
        let mut display = MockDisplay::new(10, 3);

        feed_units(&mut decoder, &mut display, "a\x1b[2;2H");

        assert_eq!(display.blink_signals, vec![5, 5]);
    }
}
