use thiserror::Error;

/// Faults that abort a [`Decoder::feed`](crate::Decoder::feed) call.
///
/// Malformed or unsupported input is never reported here; it goes to the
/// [`Diagnostics`](crate::Diagnostics) collaborator instead. These variants
/// mean the decoder and the display model disagree about the screen layout.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("row {row} is a {kind} row, expected a text row")]
    NotATextRow { row: usize, kind: &'static str },

    #[error("cursor addresses row {row} which the display does not have")]
    MissingRow { row: i64 },

    #[error("command letter must be an ASCII letter, got {0:?}")]
    InvalidCommandLetter(char),
}

pub type Result<T> = std::result::Result<T, DecodeError>;
