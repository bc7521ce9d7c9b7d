//! Client registry
//!
//! Maps each connected client's id to its live outbound channel and current
//! pairing state. This is the leaf component of the core: the waiting pools,
//! the matcher, the relay and the hub all resolve ids through it.
//!
//! # Ownership
//!
//! Each `ClientEntry` exclusively owns the sending half of that client's
//! outbound channel. Entries are created at registration, mutated by every
//! pool and pairing operation, and destroyed on disconnect; nothing outlives
//! the connection.

pub mod client;
pub mod error;
pub mod store;

pub use client::{ClientEntry, ClientId, ClientPhase, Gender, Preference};
pub use error::RegistryError;
pub use store::ClientRegistry;
