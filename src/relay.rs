//! Negotiation message relay
//!
//! Store-and-forward of opaque negotiation payloads between the two peers of
//! an active pair. The relay resolves the target through the registry and
//! forwards `{type, payload, senderId}` verbatim; it never inspects or
//! validates the payload beyond its presence.

use serde_json::Value;

use crate::protocol::event::RelayKind;
use crate::protocol::notify::ServerEvent;
use crate::registry::client::ClientId;
use crate::registry::store::ClientRegistry;

/// Error type for relay operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// Target id is not registered
    UnknownTarget(ClientId),
    /// Target is registered but its channel is closed
    ChannelClosed(ClientId),
}

impl std::fmt::Display for RelayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelayError::UnknownTarget(id) => write!(f, "Peer unavailable: {}", id),
            RelayError::ChannelClosed(id) => write!(f, "Peer channel closed: {}", id),
        }
    }
}

impl std::error::Error for RelayError {}

/// Forward one negotiation message to its target
///
/// On failure nothing is delivered; the hub turns the error into an `error`
/// event back to the sender.
pub fn relay(
    registry: &ClientRegistry,
    kind: RelayKind,
    from: &ClientId,
    target: &ClientId,
    payload: Value,
) -> Result<(), RelayError> {
    let entry = registry
        .lookup(target)
        .ok_or_else(|| RelayError::UnknownTarget(target.clone()))?;

    if !entry.is_open() {
        return Err(RelayError::ChannelClosed(target.clone()));
    }

    if !entry.send(ServerEvent::relayed(kind, payload, from.clone())) {
        // Receiver dropped between the check and the send
        return Err(RelayError::ChannelClosed(target.clone()));
    }

    tracing::trace!(kind = %kind, from = %from, target = %target, "Relayed message");
    Ok(())
}
