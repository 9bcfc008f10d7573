//! Select Graphic Rendition.

use crate::color::{Color, Rgb, StdColor};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::params::Params;
use crate::pen::{Pen, Rendition};

/// Apply every SGR attribute in `params` to `pen`, left to right.
///
/// Omitted values count as `0` (reset). Attributes the decoder does not know
/// are reported and skipped; the rest of the list is still applied.
pub(crate) fn apply(
    pen: &mut Pen,
    params: &Params,
    diagnostics: &mut dyn Diagnostics,
) {
    let mut iter = params.iter().map(|param| param.unwrap_or(0));

    while let Some(param) = iter.next() {
        match param {
            0 => *pen = Pen::default(),
            1 => pen.rendition.insert(Rendition::BOLD),
            2 => pen.rendition.insert(Rendition::DIM),
            3 => pen.rendition.insert(Rendition::ITALIC),
            4 => pen.rendition.insert(Rendition::UNDERLINE),
            5 | 6 => pen.rendition.insert(Rendition::BLINK),
            7 => pen.rendition.insert(Rendition::INVERSE),
            8 => pen.rendition.insert(Rendition::HIDDEN),
            9 => pen.rendition.insert(Rendition::STRIKE),
            22 => pen.rendition.remove(Rendition::BOLD | Rendition::DIM),
            23 => pen.rendition.remove(Rendition::ITALIC),
            24 => pen.rendition.remove(Rendition::UNDERLINE),
            25 => pen.rendition.remove(Rendition::BLINK),
            27 => pen.rendition.remove(Rendition::INVERSE),
            28 => pen.rendition.remove(Rendition::HIDDEN),
            29 => pen.rendition.remove(Rendition::STRIKE),
            30..=37 => {
                pen.foreground = StdColor::from_ansi(param - 30).map(Color::Std)
            },
            38 => match parse_extended_color(&mut iter) {
                Some(color) => pen.foreground = Some(color),
                None => diagnostics.record(Diagnostic::UnsupportedSgr(param)),
            },
            39 => pen.foreground = None,
            40..=47 => {
                pen.background = StdColor::from_ansi(param - 40).map(Color::Std)
            },
            48 => match parse_extended_color(&mut iter) {
                Some(color) => pen.background = Some(color),
                None => diagnostics.record(Diagnostic::UnsupportedSgr(param)),
            },
            49 => pen.background = None,
            90..=97 => {
                pen.foreground = StdColor::from_ansi(param - 90)
                    .map(|color| Color::Std(color.to_bright()))
            },
            100..=107 => {
                pen.background = StdColor::from_ansi(param - 100)
                    .map(|color| Color::Std(color.to_bright()))
            },
            _ => diagnostics.record(Diagnostic::UnsupportedSgr(param)),
        }
    }
}

fn parse_extended_color<I>(iter: &mut I) -> Option<Color>
where
    I: Iterator<Item = u16>,
{
    match iter.next() {
        Some(5) => {
            let index = iter.next()?;
            u8::try_from(index).ok().map(Color::Indexed)
        },
        Some(2) => {
            let r = u8::try_from(iter.next()?).ok()?;
            let g = u8::try_from(iter.next()?).ok()?;
            let b = u8::try_from(iter.next()?).ok()?;

            Some(Color::TrueColor(Rgb { r, g, b }))
        },
        _ => None,
    }
}
