//! Client identity and per-client entry types
//!
//! This module defines the per-client state stored in the registry.

use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::matching::pool::PoolKind;
use crate::protocol::notify::ServerEvent;

/// Opaque unique identifier for a connected client
///
/// Supplied by the caller at registration and stable for the connection's
/// lifetime. On the wire it is a bare JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    /// Create a new client id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id is empty (rejected at registration)
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClientId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ClientId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Declared gender of a client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Unspecified,
}

/// Search preference declared at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
    /// Match with anyone
    Any,
    /// Match with the opposite gender only
    Opposite,
}

/// Lifecycle phase of a registered client
///
/// Derived from the pairing state rather than stored, so it can never drift
/// out of sync with it. Unregistered clients have no entry and no phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientPhase {
    /// Unpaired, sitting in a waiting pool
    Waiting,
    /// Paired with a partner
    Paired,
}

/// Entry for a single client in the registry
#[derive(Debug)]
pub struct ClientEntry {
    /// Client id
    pub id: ClientId,

    /// Declared gender
    pub gender: Gender,

    /// Search preference
    pub preference: Preference,

    /// Current partner's id (None if unpaired)
    ///
    /// A lookup key, not an ownership relation: the partner entry lives in
    /// the registry and the references are kept mutual by the hub.
    pub partner: Option<ClientId>,

    /// Pool this client currently waits in (None while paired)
    pub pool: Option<PoolKind>,

    /// Outbound event sink, owned exclusively by the registry
    pub(crate) tx: mpsc::UnboundedSender<ServerEvent>,

    /// When the client registered
    pub connected_at: Instant,
}

impl ClientEntry {
    /// Create a new entry in the unpaired, unpooled state
    pub(crate) fn new(
        id: ClientId,
        gender: Gender,
        preference: Preference,
        tx: mpsc::UnboundedSender<ServerEvent>,
    ) -> Self {
        Self {
            id,
            gender,
            preference,
            partner: None,
            pool: None,
            tx,
            connected_at: Instant::now(),
        }
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> ClientPhase {
        if self.partner.is_some() {
            ClientPhase::Paired
        } else {
            ClientPhase::Waiting
        }
    }

    /// Pool this client belongs in while unpaired
    pub fn desired_pool(&self) -> PoolKind {
        PoolKind::for_profile(self.gender, self.preference)
    }

    /// Whether the outbound channel still has a live receiver
    pub fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }

    /// How long the client has been connected
    pub fn connected_for(&self) -> std::time::Duration {
        self.connected_at.elapsed()
    }

    /// Push an event onto the outbound channel
    ///
    /// Returns false if the receiver side is gone.
    pub(crate) fn send(&self, event: ServerEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}
