//! Statistics for the signaling hub

use std::time::Duration;

/// Hub-wide statistics snapshot
#[derive(Debug, Clone, Default)]
pub struct HubStats {
    /// Currently registered clients
    pub active_clients: usize,
    /// Clients currently waiting in a pool
    pub waiting_clients: usize,
    /// Clients currently in an active pairing
    pub paired_clients: usize,
    /// Registrations accepted since startup
    pub total_registrations: u64,
    /// Pairs formed since startup
    pub pairs_formed: u64,
    /// Negotiation messages relayed since startup
    pub messages_relayed: u64,
    /// Hub uptime
    pub uptime: Duration,
}

impl HubStats {
    pub fn new() -> Self {
        Self::default()
    }
}
