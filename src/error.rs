//! Crate-level error type
//!
//! Umbrella over the component error types. Per-client failures stay
//! isolated to that client's handling path: an error returned here never
//! perturbs shared matcher or registry state for other clients.

use crate::registry::error::RegistryError;
use crate::relay::RelayError;

/// Result type alias for signaling operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for hub operations
#[derive(Debug)]
pub enum Error {
    /// Registry operation failed (duplicate or unknown id)
    Registry(RegistryError),
    /// Relay target unavailable
    Relay(RelayError),
    /// Event violates the protocol (malformed or out of place)
    Protocol(String),
    /// Frame could not be decoded or encoded
    Json(serde_json::Error),
    /// Admission cap reached; registration rejected
    AtCapacity(usize),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Registry(err) => write!(f, "Registry error: {}", err),
            Error::Relay(err) => write!(f, "Relay error: {}", err),
            Error::Protocol(msg) => write!(f, "Protocol error: {}", msg),
            Error::Json(err) => write!(f, "Malformed event: {}", err),
            Error::AtCapacity(max) => write!(f, "Hub at capacity ({} clients)", max),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Registry(err) => Some(err),
            Error::Relay(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::Protocol(_) | Error::AtCapacity(_) => None,
        }
    }
}

impl From<RegistryError> for Error {
    fn from(err: RegistryError) -> Self {
        Error::Registry(err)
    }
}

impl From<RelayError> for Error {
    fn from(err: RelayError) -> Self {
        Error::Relay(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
