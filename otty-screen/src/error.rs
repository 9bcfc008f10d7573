use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScreenError {
    #[error("screen needs at least one column")]
    NoColumns,

    #[error("screen needs at least one visible row")]
    NoRows,
}

pub type Result<T> = std::result::Result<T, ScreenError>;
