use serde::{Deserialize, Serialize};

/// Color stored in the pen and handed to the display on insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Std(StdColor),
    TrueColor(Rgb),
    Indexed(u8),
}

impl Color {
    /// Brightened variant used for bold text. Only standard colors change.
    pub fn bright(self) -> Self {
        match self {
            Self::Std(color) => Self::Std(color.to_bright()),
            Self::Indexed(index @ 0..=7) => Self::Indexed(index + 8),
            other => other,
        }
    }

    /// Dimmed variant used for faint text. Only standard colors change.
    pub fn dim(self) -> Self {
        match self {
            Self::Std(color) => Self::Std(color.to_dim()),
            other => other,
        }
    }
}

/// Standard colors.
#[derive(
    Debug,
    Copy,
    Clone,
    Eq,
    PartialEq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
pub enum StdColor {
    Black = 0,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    Foreground = 256,
    Background,
    DimForeground,
    BrightForeground,
}

impl StdColor {
    /// Standard color for the `30..=37` / `40..=47` SGR offset.
    pub fn from_ansi(offset: u16) -> Option<Self> {
        use StdColor::*;
        let color = match offset {
            0 => Black,
            1 => Red,
            2 => Green,
            3 => Yellow,
            4 => Blue,
            5 => Magenta,
            6 => Cyan,
            7 => White,
            _ => return None,
        };

        Some(color)
    }

    pub fn to_bright(self) -> Self {
        match self {
            Self::Foreground => Self::BrightForeground,
            Self::DimForeground => Self::Foreground,
            Self::Black => Self::BrightBlack,
            Self::Red => Self::BrightRed,
            Self::Green => Self::BrightGreen,
            Self::Yellow => Self::BrightYellow,
            Self::Blue => Self::BrightBlue,
            Self::Magenta => Self::BrightMagenta,
            Self::Cyan => Self::BrightCyan,
            Self::White => Self::BrightWhite,
            val => val,
        }
    }

    pub fn to_dim(self) -> Self {
        match self {
            Self::Foreground => Self::DimForeground,
            Self::BrightForeground => Self::Foreground,
            Self::BrightBlack => Self::Black,
            Self::BrightRed => Self::Red,
            Self::BrightGreen => Self::Green,
            Self::BrightYellow => Self::Yellow,
            Self::BrightBlue => Self::Blue,
            Self::BrightMagenta => Self::Magenta,
            Self::BrightCyan => Self::Cyan,
            Self::BrightWhite => Self::White,
            val => val,
        }
    }
}

#[derive(
    Debug, Eq, PartialEq, Copy, Clone, Default, Hash, Serialize, Deserialize,
)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}
