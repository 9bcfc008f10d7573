//! In-crate display double used by the unit tests.

use crate::color::{Color, StdColor};
use crate::display::{Display, Point, Row, TextRow};

pub(crate) type Cell = (String, Color, Color);

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MockTextRow {
    pub cells: Vec<Option<Cell>>,
}

impl MockTextRow {
    fn new(width: usize) -> Self {
        Self {
            cells: vec![None; width],
        }
    }
}

impl TextRow for MockTextRow {
    fn width(&self) -> usize {
        self.cells.len()
    }

    fn insert(
        &mut self,
        column: usize,
        element: &str,
        foreground: Color,
        background: Color,
    ) {
        if let Some(cell) = self.cells.get_mut(column) {
            *cell = Some((element.to_owned(), foreground, background));
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum MockRow {
    Text(MockTextRow),
    Separator,
}

/// Records every interaction the decoder has with the display.
#[derive(Debug, Clone)]
pub(crate) struct MockDisplay {
    pub rows: Vec<MockRow>,
    pub width: usize,
    pub visible: usize,
    pub cursor: Point,
    pub cursor_enabled: bool,
    pub blink_signals: Vec<u32>,
    pub set_cursor_calls: usize,
    pub redraws: usize,
    pub foreground: Color,
    pub background: Color,
}

impl MockDisplay {
    pub fn new(width: usize, visible: usize) -> Self {
        Self {
            rows: (0..visible)
                .map(|_| MockRow::Text(MockTextRow::new(width)))
                .collect(),
            width,
            visible,
            cursor: Point::default(),
            cursor_enabled: true,
            blink_signals: Vec::new(),
            set_cursor_calls: 0,
            redraws: 0,
            foreground: Color::Std(StdColor::Foreground),
            background: Color::Std(StdColor::Background),
        }
    }

    pub fn cell(&self, line: usize, column: usize) -> Option<&Cell> {
        match self.rows.get(line)? {
            MockRow::Text(row) => row.cells.get(column)?.as_ref(),
            MockRow::Separator => None,
        }
    }

    /// Text of a row, with unwritten cells rendered as `.`.
    pub fn line_text(&self, line: usize) -> String {
        match &self.rows[line] {
            MockRow::Text(row) => row
                .cells
                .iter()
                .map(|cell| match cell {
                    Some((text, ..)) => text.as_str(),
                    None => ".",
                })
                .collect(),
            MockRow::Separator => String::from("<separator>"),
        }
    }
}

impl Display for MockDisplay {
    fn cursor(&self) -> Point {
        self.cursor
    }

    fn set_cursor(&mut self, point: Point) {
        self.set_cursor_calls += 1;
        let max = self.max_cursor();
        self.cursor = Point::new(
            point.line.clamp(0, max.line),
            point.column.clamp(0, self.width as i32),
        );
    }

    fn max_cursor(&self) -> Point {
        Point::new(self.rows.len() as i32 - 1, self.width as i32 - 1)
    }

    fn set_cursor_enabled(&mut self, enabled: bool) {
        self.cursor_enabled = enabled;
    }

    fn keep_cursor_visible(&mut self, cycles: u32) {
        self.blink_signals.push(cycles);
    }

    fn default_foreground(&self) -> Color {
        self.foreground
    }

    fn default_background(&self) -> Color {
        self.background
    }

    fn set_default_foreground(&mut self, color: Color) {
        self.foreground = color;
    }

    fn set_default_background(&mut self, color: Color) {
        self.background = color;
    }

    fn append_row(&mut self) {
        self.rows.push(MockRow::Text(MockTextRow::new(self.width)));
    }

    fn row_mut(&mut self, index: usize) -> Option<Row<'_>> {
        match self.rows.get_mut(index)? {
            MockRow::Text(row) => Some(Row::Text(row)),
            MockRow::Separator => Some(Row::Other("separator")),
        }
    }

    fn visible_rows(&self) -> usize {
        self.visible
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }
}
