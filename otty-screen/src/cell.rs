use otty_decoder::Color;

/// A single grid cell: one grapheme plus its colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub foreground: Color,
    pub background: Color,
}

impl Cell {
    /// Empty cell painted with the given colors.
    pub fn blank(foreground: Color, background: Color) -> Self {
        Self {
            text: String::from(" "),
            foreground,
            background,
        }
    }

    pub fn with_text(
        text: &str,
        foreground: Color,
        background: Color,
    ) -> Self {
        Self {
            text: text.to_owned(),
            foreground,
            background,
        }
    }

    /// Whether the cell shows nothing but background.
    pub fn is_blank(&self) -> bool {
        self.text.chars().all(|c| c == ' ')
    }
}
