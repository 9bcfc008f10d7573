use log::trace;
use otty_decoder::{Color, TextRow};

use crate::cell::Cell;

/// Fixed-width row of text cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    cells: Vec<Cell>,
}

impl TextLine {
    pub fn new(columns: usize, foreground: Color, background: Color) -> Self {
        Self {
            cells: vec![Cell::blank(foreground, background); columns],
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, column: usize) -> Option<&Cell> {
        self.cells.get(column)
    }

    /// Row contents with trailing blanks removed.
    pub fn text(&self) -> String {
        let text: String =
            self.cells.iter().map(|cell| cell.text.as_str()).collect();
        text.trim_end().to_owned()
    }
}

impl TextRow for TextLine {
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
        match self.cells.get_mut(column) {
            Some(cell) => {
                *cell = Cell::with_text(element, foreground, background)
            },
            None => trace!("Dropping {element:?} past column {column}"),
        }
    }
}

/// A row of the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Text(TextLine),
    /// Decorative divider that does not hold text.
    Separator,
}

impl Line {
    /// Name of the row kind, as reported to the decoder.
    pub fn kind(&self) -> &'static str {
        match self {
            Line::Text(_) => "text",
            Line::Separator => "separator",
        }
    }

    pub fn as_text(&self) -> Option<&TextLine> {
        match self {
            Line::Text(line) => Some(line),
            Line::Separator => None,
        }
    }
}
