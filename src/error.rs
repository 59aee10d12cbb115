#[derive(thiserror::Error, Debug)]
pub enum ConsoleError {
    #[error("Unknown member '{name}' in {path}")]
    UnknownMember { name: String, path: String },

    #[error("'{path}' is a property and has no members")]
    NotAnObject { path: String },

    #[error("Invalid namespace: {message}")]
    InvalidNamespace { message: String },

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("std::io error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<ConsoleError> for std::io::Error {
    fn from(err: ConsoleError) -> std::io::Error {
        match err {
            ConsoleError::IoError(io_err) => io_err,
            _ => std::io::Error::other(err.to_string()),
        }
    }
}

// Builds an InvalidNamespace error from a format string.
#[macro_export]
macro_rules! invalid_namespace {
    ($($arg:tt)*) => {
        $crate::ConsoleError::InvalidNamespace {
            message: format!($($arg)*),
        }
    };
}
