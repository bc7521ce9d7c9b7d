//! Hub configuration

/// Configuration options for the signaling hub
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Maximum concurrent registered clients (0 = unlimited)
    pub max_clients: usize,

    /// Send `status` events to clients left waiting after a matcher pass
    pub status_updates: bool,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            max_clients: 0, // Unlimited
            status_updates: true,
        }
    }
}

impl HubConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of concurrent clients
    pub fn max_clients(mut self, max: usize) -> Self {
        self.max_clients = max;
        self
    }

    /// Disable `status` events for waiting clients
    pub fn disable_status_updates(mut self) -> Self {
        self.status_updates = false;
        self
    }
}
