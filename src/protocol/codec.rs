//! Frame codec
//!
//! Converts transport frames to and from protocol events. The transport layer
//! owns framing and delivery; this module only maps a complete frame's bytes
//! to a `ClientEvent` (or a `ServerEvent` back to bytes). Malformed frames
//! surface as errors to the host layer and never reach the hub.

use bytes::Bytes;

use super::event::ClientEvent;
use super::notify::ServerEvent;
use crate::error::{Error, Result};

/// Decode a single inbound frame
pub fn decode_event(frame: &[u8]) -> Result<ClientEvent> {
    serde_json::from_slice(frame).map_err(Error::from)
}

/// Encode an outbound event into a frame ready for the transport
///
/// `Bytes` keeps the encoded frame reference-counted, so hosts fanning one
/// event out to several sinks clone cheaply.
pub fn encode_event(event: &ServerEvent) -> Result<Bytes> {
    let encoded = serde_json::to_vec(event)?;
    Ok(Bytes::from(encoded))
}
