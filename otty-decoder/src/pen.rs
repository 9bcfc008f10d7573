use bitflags::bitflags;

use crate::color::Color;
use crate::display::{Display, Point};

bitflags! {
    /// Rendition attributes set through SGR.
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Rendition: u8 {
        const BOLD      = 0b0000_0001;
        const DIM       = 0b0000_0010;
        const ITALIC    = 0b0000_0100;
        const UNDERLINE = 0b0000_1000;
        const BLINK     = 0b0001_0000;
        const INVERSE   = 0b0010_0000;
        const HIDDEN    = 0b0100_0000;
        const STRIKE    = 0b1000_0000;
    }
}

/// Attribute state applied to every inserted character.
///
/// `None` colors mean "whatever the display's default is at insertion time".
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Pen {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub rendition: Rendition,
}

impl Pen {
    /// Pin both colors to the display defaults and drop every rendition
    /// flag.
    pub fn reset_to_defaults<D: Display + ?Sized>(&mut self, display: &D) {
        self.foreground = Some(display.default_foreground());
        self.background = Some(display.default_background());
        self.rendition = Rendition::empty();
    }

    /// Foreground and background actually written into a cell.
    pub fn effective_colors<D: Display + ?Sized>(
        &self,
        display: &D,
    ) -> (Color, Color) {
        let mut foreground =
            self.foreground.unwrap_or_else(|| display.default_foreground());
        let mut background =
            self.background.unwrap_or_else(|| display.default_background());

        if self.rendition.contains(Rendition::BOLD) {
            foreground = foreground.bright();
        }
        if self.rendition.contains(Rendition::DIM) {
            foreground = foreground.dim();
        }
        if self.rendition.contains(Rendition::INVERSE) {
            std::mem::swap(&mut foreground, &mut background);
        }
        if self.rendition.contains(Rendition::HIDDEN) {
            foreground = background;
        }

        (foreground, background)
    }
}

/// Snapshot written by DECSC/SCOSC and read by DECRC/SCORC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedCursor {
    /// Logical position.
    pub position: Point,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
}
