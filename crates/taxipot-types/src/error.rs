use std::fmt;

/// Result type for taxipot-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Timestamp is neither RFC 3339 nor a service-local date-time
    InvalidTimestamp(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidTimestamp(raw) => write!(f, "Invalid timestamp: {}", raw),
        }
    }
}

impl std::error::Error for Error {}
