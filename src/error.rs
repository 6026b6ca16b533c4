use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    NotFound { record_type: String, id: u64 },
    Io { path: PathBuf, message: String },
    Codec(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound { record_type, id } => {
                write!(f, "no {} record with id {}", record_type, id)
            }
            StoreError::Io { path, message } => {
                write!(f, "store file {} unavailable: {}", path.display(), message)
            }
            StoreError::Codec(message) => write!(f, "record encoding error: {}", message),
        }
    }
}

impl std::error::Error for StoreError {}
