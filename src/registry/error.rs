//! Registry error types
//!
//! Error types for client registry operations.

use super::client::ClientId;

/// Error type for registry operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The id is already registered; re-registration is rejected
    DuplicateId(ClientId),
    /// No client with this id is registered
    UnknownClient(ClientId),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::DuplicateId(id) => write!(f, "Client already registered: {}", id),
            RegistryError::UnknownClient(id) => write!(f, "Unknown client: {}", id),
        }
    }
}

impl std::error::Error for RegistryError {}
