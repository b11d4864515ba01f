use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimakError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("NIM {0} is already registered")]
    DuplicateNim(String),

    #[error("unknown field selector: {0}")]
    UnknownField(String),

    #[error("file operation failed: {0}")]
    FileOperation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt data file: {0}")]
    Corrupt(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimakError>;
