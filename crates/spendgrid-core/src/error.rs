use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChartError {
    #[error("Palette must contain at least one colour")]
    EmptyPalette,
    #[error("Invalid colour: {0}")]
    InvalidColor(String),
}
