//! Error handling for rowmap-store
//!
//! Wraps rowmap-core ExError with store-specific helpers

use rowmap_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create a configuration parse error
pub fn config_error(reason: &str) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op("load_config")
        .with_message(format!("Invalid store config: {}", reason))
}
