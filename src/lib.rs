//! roulette-rs: matchmaking and signaling relay for anonymous P2P chat
//!
//! A transport-agnostic hub that pairs anonymous clients for one-on-one
//! chat and relays their connection-negotiation messages until the peers
//! are directly connected. Three pieces cooperate:
//!
//! - **Matching** — gender-aware FIFO waiting pools plus an opportunistic
//!   matcher; opposite-preference pairs form before any-preference pairs.
//! - **Relay** — store-and-forward of opaque negotiation payloads (offers,
//!   answers, ICE candidates) between the two sides of an active pair.
//! - **Lifecycle** — the [`SignalingHub`] ties registration, matching,
//!   partner swaps and disconnects together under one exclusion domain.
//!
//! The crate never touches a socket. A host accepts connections on whatever
//! transport it likes (WebSocket, TCP, in-process), registers each client
//! with the hub and shuttles frames between the transport and the hub:
//!
//! ```no_run
//! use roulette_rs::{ClientId, Gender, Preference, SignalingHub};
//!
//! # async fn example() -> Result<(), roulette_rs::Error> {
//! let hub = SignalingHub::new();
//!
//! // One registration per accepted connection; the returned receiver is
//! // the client's outbound event stream.
//! let mut events = hub
//!     .register(ClientId::from("u1"), Gender::Male, Preference::Opposite)
//!     .await?;
//!
//! // Forward everything the hub emits to the client's transport.
//! while let Some(event) = events.recv().await {
//!     let frame = roulette_rs::protocol::encode_event(&event)?;
//!     // write `frame` to the socket ...
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Inbound frames are decoded with [`protocol::decode_event`] and routed
//! through [`SignalingHub::dispatch`]; a dropped connection is reported
//! with [`SignalingHub::disconnect`].

pub mod config;
pub mod error;
pub mod hub;
pub mod matching;
pub mod protocol;
pub mod registry;
pub mod relay;
pub mod stats;

pub use config::HubConfig;
pub use error::{Error, Result};
pub use hub::SignalingHub;
pub use matching::{PoolKind, PoolSizes, WaitingPools};
pub use protocol::{decode_event, encode_event, ClientEvent, RelayKind, ServerEvent};
pub use registry::{ClientId, ClientPhase, Gender, Preference};
pub use stats::HubStats;
