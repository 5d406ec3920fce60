use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FanJoinError {
    #[error("Unit {unit} failed on item {index}: {message}")]
    UnitFailure {
        unit: String,
        index: usize,
        message: String,
    },

    #[error("Task for item {index} panicked: {message}")]
    TaskPanicked {
        index: usize,
        message: String,
    },

    #[error("Incompatible shapes: {left_rows}x{left_cols} cannot multiply {right_rows}x{right_cols}")]
    IncompatibleShape {
        left_rows: usize,
        left_cols: usize,
        right_rows: usize,
        right_cols: usize,
    },

    #[error("Ragged matrix: row {row} has {found} columns, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Tree exceeds maximum depth of {max_depth}")]
    TreeTooDeep {
        max_depth: usize,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("File error: {path:?} - {message}")]
    FileError {
        path: PathBuf,
        message: String,
    },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl From<anyhow::Error> for FanJoinError {
    fn from(error: anyhow::Error) -> Self {
        FanJoinError::UnexpectedError(error.to_string())
    }
}

pub type FanJoinResult<T> = std::result::Result<T, FanJoinError>;
