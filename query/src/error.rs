use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("unknown mode `{0}`")]
    InvalidMode(String),

    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid range {start}..{end} for length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },

    #[error("{operation} is not supported in {mode} mode")]
    UnsupportedOperation {
        mode: &'static str,
        operation: &'static str,
    },

    #[error("invalid arithmetic: {0}")]
    ArithmeticInvalid(String),
}

pub type Result<T> = std::result::Result<T, QueryError>;
