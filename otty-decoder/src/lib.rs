//! Decoder that turns a stream of terminal input elements into mutations of
//! a display model.

mod bell;
mod builder;
mod color;
mod command;
mod control;
pub mod cursor;
mod decoder;
mod diagnostics;
mod display;
mod error;
mod esc;
mod options;
mod params;
mod pen;
mod sgr;

#[cfg(test)]
mod testing;

pub use bell::BellListenerId;
pub use builder::DecoderBuilder;
pub use color::{Color, Rgb, StdColor};
pub use command::{Dispatch, Handler, Registry, Responder};
pub use control::{ControlByte, caret_notation};
pub use decoder::Decoder;
pub use diagnostics::{Diagnostic, Diagnostics, LogDiagnostics};
pub use display::{Display, Point, Row, TextRow};
pub use error::{DecodeError, Result};
pub use options::DecoderOptions;
pub use params::Params;
pub use pen::{Pen, Rendition, SavedCursor};
