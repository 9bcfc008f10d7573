use log::trace;
use otty_decoder::{Color, Display, Point, Row, StdColor};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScreenError};
use crate::grid::{Line, TextLine};

/// Geometry and colors a [`Screen`] starts with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub columns: usize,
    pub visible_rows: usize,
    pub default_foreground: Color,
    pub default_background: Color,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            columns: 80,
            visible_rows: 24,
            default_foreground: Color::Std(StdColor::Foreground),
            default_background: Color::Std(StdColor::Background),
        }
    }
}

/// In-memory display model.
///
/// Rows are only ever appended, so everything that scrolled off stays
/// addressable. The visible screen is the last `visible_rows` rows.
#[derive(Debug, Clone)]
pub struct Screen {
    lines: Vec<Line>,
    columns: usize,
    visible_rows: usize,
    cursor: Point,
    cursor_enabled: bool,
    blink_hold: u32,
    blink_on: bool,
    redraw_pending: bool,
    redraw_requests: u64,
    foreground: Color,
    background: Color,
}

impl Screen {
    pub fn new(config: ScreenConfig) -> Result<Self> {
        if config.columns == 0 {
            return Err(ScreenError::NoColumns);
        }
        if config.visible_rows == 0 {
            return Err(ScreenError::NoRows);
        }

        let mut screen = Self {
            lines: Vec::with_capacity(config.visible_rows),
            columns: config.columns,
            visible_rows: config.visible_rows,
            cursor: Point::default(),
            cursor_enabled: true,
            blink_hold: 0,
            blink_on: true,
            redraw_pending: false,
            redraw_requests: 0,
            foreground: config.default_foreground,
            background: config.default_background,
        };
        for _ in 0..config.visible_rows {
            screen.append_row();
        }

        Ok(screen)
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows ever appended, visible or not.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// Rows currently on screen, top first.
    pub fn visible_lines(&self) -> &[Line] {
        let top = self.lines.len().saturating_sub(self.visible_rows);
        &self.lines[top..]
    }

    /// Text of every visible row with trailing blanks removed. Separator
    /// rows come out empty.
    pub fn visible_text(&self) -> Vec<String> {
        self.visible_lines()
            .iter()
            .map(|line| line.as_text().map(TextLine::text).unwrap_or_default())
            .collect()
    }

    /// Append a separator row and move the cursor below it.
    pub fn push_separator(&mut self) {
        trace!("Appending separator after row {}", self.lines.len());
        self.lines.push(Line::Separator);
        self.append_row();
        self.cursor = Point::new(self.lines.len() as i32 - 1, 0);
    }

    pub fn is_cursor_enabled(&self) -> bool {
        self.cursor_enabled
    }

    /// Blink cycles left during which the cursor stays solid.
    pub fn blink_hold(&self) -> u32 {
        self.blink_hold
    }

    /// Advance the blink clock by one cycle and report whether the cursor
    /// glyph is drawn during it.
    pub fn tick_blink(&mut self) -> bool {
        if !self.cursor_enabled {
            return false;
        }

        if self.blink_hold > 0 {
            self.blink_hold -= 1;
            self.blink_on = true;
        } else {
            self.blink_on = !self.blink_on;
        }

        self.blink_on
    }

    /// Whether a redraw was requested since the last call; clears the flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_pending)
    }

    /// Total redraw requests received.
    pub fn redraw_requests(&self) -> u64 {
        self.redraw_requests
    }
}

impl Display for Screen {
    fn cursor(&self) -> Point {
        self.cursor
    }

    fn set_cursor(&mut self, point: Point) {
        let max = self.max_cursor();
        self.cursor = Point::new(
            point.line.clamp(0, max.line),
            point.column.clamp(0, max.column),
        );
        trace!("Cursor at {:?}", self.cursor);
    }

    fn max_cursor(&self) -> Point {
        Point::new(
            self.lines.len().saturating_sub(1) as i32,
            self.columns.saturating_sub(1) as i32,
        )
    }

    fn set_cursor_enabled(&mut self, enabled: bool) {
        trace!("Cursor enabled: {enabled}");
        self.cursor_enabled = enabled;
    }

    fn keep_cursor_visible(&mut self, cycles: u32) {
        self.blink_hold = self.blink_hold.max(cycles);
        self.blink_on = true;
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
        self.lines.push(Line::Text(TextLine::new(
            self.columns,
            self.foreground,
            self.background,
        )));
    }

    fn row_mut(&mut self, index: usize) -> Option<Row<'_>> {
        match self.lines.get_mut(index)? {
            Line::Text(line) => Some(Row::Text(line)),
            line @ Line::Separator => Some(Row::Other(line.kind())),
        }
    }

    fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    fn request_redraw(&mut self) {
        self.redraw_pending = true;
        self.redraw_requests += 1;
    }
}
