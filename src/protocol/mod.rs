//! Wire protocol for the signaling relay
//!
//! Inbound events (`ClientEvent`) are decoded once at the transport boundary
//! into a tagged enum; outbound events (`ServerEvent`) are what the hub pushes
//! onto per-client channels. Negotiation payloads travel as opaque JSON values
//! and are relayed verbatim.
//!
//! ```text
//!   transport frame (Bytes)
//!        │ codec::decode_event
//!        ▼
//!   ClientEvent ──► SignalingHub ──► ServerEvent per client
//!                                         │ codec::encode_event
//!                                         ▼
//!                                    transport frame (Bytes)
//! ```

pub mod codec;
pub mod event;
pub mod notify;

pub use codec::{decode_event, encode_event};
pub use event::{ClientEvent, RelayKind};
pub use notify::ServerEvent;
