/// Everything a mutating table operation can reject with. Errors are
/// returned synchronously to the caller and never retried internally;
/// an operation that errors has not mutated the table.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TableError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("illegal state: {0}")]
    IllegalState(String),
    #[error("chip arithmetic overflow")]
    Overflow,
}

pub type Result<T> = std::result::Result<T, TableError>;
