use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ShuffleError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Invalid assignment: {0}")]
    InvalidAssignment(String),
    #[error("Malformed item: {0}")]
    MalformedItem(String),
}

pub type Result<T> = std::result::Result<T, ShuffleError>;
