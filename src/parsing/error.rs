use thiserror::Error;

pub type PResult<T> = Result<T, ParsingError>;

#[derive(Debug, Error)]
pub enum ParsingError {
    #[error("Property not found ({property}) in block starting at line {block_start}")]
    PropertyNotFound {
        property: String,
        block_start: usize,
    },
    #[error("Invalid time token \"{0}\"")]
    InvalidTimeToken(String),
    #[error("Failed to parse {0}")]
    ParseInt(#[from] std::num::ParseIntError),
}
