//! Error types for the picker engine.

use thiserror::Error;

/// Errors that can occur while configuring or driving a picker.
#[derive(Error, Debug)]
pub enum PickerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown timezone '{0}'")]
    UnknownTimezone(String),

    #[error("Invalid weekday ordinal {0} (expected 1-7, 1 = Sunday)")]
    InvalidWeekday(u8),

    #[error("Unknown shortcut '{0}'")]
    UnknownShortcut(String),

    #[error("Invalid shortcut span '{0}': {1}")]
    InvalidSpan(String, String),

    #[error("Selection {0} is outside the allowed dates")]
    OutOfBounds(String),

    #[error("Selection {0} includes an unavailable date")]
    Unavailable(String),

    #[error("Selection {0} does not fit a {1} picker")]
    ModeMismatch(String, String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for picker operations.
pub type PickerResult<T> = Result<T, PickerError>;
