//! Crate error type
//!
//! The simulation itself never fails; errors only come from the edges
//! (storage, configuration files).

use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Filesystem access failed
    Io { path: String, message: String },
    /// Value could not be encoded for storage
    Serialize(String),
    /// Stored or configured text was not valid JSON for the target type
    Parse(String),
    /// A tuning value is outside its allowed range
    InvalidTuning { field: &'static str, value: f64 },
    /// The host has no storage backend (private browsing, no window)
    StorageUnavailable,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "i/o error at {path}: {message}"),
            Self::Serialize(msg) => write!(f, "failed to serialize: {msg}"),
            Self::Parse(msg) => write!(f, "failed to parse: {msg}"),
            Self::InvalidTuning { field, value } => {
                write!(f, "invalid tuning value for `{field}`: {value}")
            }
            Self::StorageUnavailable => write!(f, "storage backend unavailable"),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            Self::Parse(err.to_string())
        } else {
            Self::Serialize(err.to_string())
        }
    }
}
