//! Client registry implementation
//!
//! The central registry that maps client ids to their live outbound channel
//! and pairing state.
//!
//! The registry carries no lock of its own: the pool-membership and
//! mutual-partner invariants span both the registry and the waiting pools,
//! so the hub guards the two together under a single exclusion domain and
//! hands `&mut ClientRegistry` into the operations that need it.

use std::collections::HashMap;

use tokio::sync::mpsc;

use super::client::{ClientEntry, ClientId, Gender, Preference};
use super::error::RegistryError;
use crate::protocol::notify::ServerEvent;

/// Central registry for all connected clients
#[derive(Debug, Default)]
pub struct ClientRegistry {
    /// Map of client id to client entry
    clients: HashMap<ClientId, ClientEntry>,
}

impl ClientRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            clients: HashMap::new(),
        }
    }

    /// Register a new client
    ///
    /// Rejects ids that are already present; re-registration is an explicit
    /// error rather than a silent overwrite.
    pub fn register(
        &mut self,
        id: ClientId,
        gender: Gender,
        preference: Preference,
        tx: mpsc::UnboundedSender<ServerEvent>,
    ) -> Result<(), RegistryError> {
        if self.clients.contains_key(&id) {
            return Err(RegistryError::DuplicateId(id));
        }

        let entry = ClientEntry::new(id.clone(), gender, preference, tx);
        self.clients.insert(id, entry);
        Ok(())
    }

    /// Look up a client by id
    pub fn lookup(&self, id: &ClientId) -> Option<&ClientEntry> {
        self.clients.get(id)
    }

    /// Look up a client for mutation
    pub fn lookup_mut(&mut self, id: &ClientId) -> Option<&mut ClientEntry> {
        self.clients.get_mut(id)
    }

    /// Remove a client and its channel reference
    ///
    /// Idempotent: removing an absent id is a no-op returning `None`.
    pub fn remove(&mut self, id: &ClientId) -> Option<ClientEntry> {
        self.clients.remove(id)
    }

    /// Whether a client is registered
    pub fn contains(&self, id: &ClientId) -> bool {
        self.clients.contains_key(id)
    }

    /// Number of registered clients
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Iterate over all entries
    pub fn iter(&self) -> impl Iterator<Item = &ClientEntry> {
        self.clients.values()
    }

    /// Current partner of a client, if any
    pub fn partner_of(&self, id: &ClientId) -> Option<ClientId> {
        self.clients.get(id).and_then(|e| e.partner.clone())
    }

    /// Form the mutual partner relation between two clients
    ///
    /// Sets both partner fields and clears both pool memberships. Callers
    /// invoke this inside the hub's critical section so the two sides can
    /// never be observed half-linked.
    pub fn link(&mut self, a: &ClientId, b: &ClientId) {
        debug_assert!(a != b, "client cannot be paired with itself");

        if let Some(entry) = self.clients.get_mut(a) {
            debug_assert!(entry.partner.is_none(), "linking an already paired client");
            entry.partner = Some(b.clone());
            entry.pool = None;
        }
        if let Some(entry) = self.clients.get_mut(b) {
            debug_assert!(entry.partner.is_none(), "linking an already paired client");
            entry.partner = Some(a.clone());
            entry.pool = None;
        }
    }

    /// Break the partner relation starting from one side
    ///
    /// Clears this client's partner field unconditionally and, when the
    /// partner still resolves, its back-reference too. Returns the former
    /// partner's id so the caller can notify and re-queue it.
    pub fn unlink(&mut self, id: &ClientId) -> Option<ClientId> {
        let partner_id = match self.clients.get_mut(id) {
            Some(entry) => entry.partner.take()?,
            None => return None,
        };

        if let Some(partner) = self.clients.get_mut(&partner_id) {
            debug_assert_eq!(
                partner.partner.as_ref(),
                Some(id),
                "partner references must be mutual"
            );
            partner.partner = None;
        }

        Some(partner_id)
    }

    /// Push an event onto a client's channel
    ///
    /// Returns false when the client is absent or its channel is closed.
    pub fn send_to(&self, id: &ClientId, event: ServerEvent) -> bool {
        match self.clients.get(id) {
            Some(entry) => {
                let delivered = entry.send(event);
                if !delivered {
                    tracing::debug!(client = %id, "Dropping event for closed channel");
                }
                delivered
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(
        registry: &mut ClientRegistry,
        id: &str,
    ) -> mpsc::UnboundedReceiver<ServerEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        registry
            .register(ClientId::from(id), Gender::Unspecified, Preference::Any, tx)
            .unwrap();
        rx
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = ClientRegistry::new();
        let _rx = register(&mut registry, "u1");

        assert_eq!(registry.len(), 1);
        let entry = registry.lookup(&ClientId::from("u1")).unwrap();
        assert_eq!(entry.id, ClientId::from("u1"));
        assert!(entry.partner.is_none());
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = ClientRegistry::new();
        let _rx = register(&mut registry, "u1");

        let (tx, _rx2) = mpsc::unbounded_channel();
        let err = registry
            .register(ClientId::from("u1"), Gender::Male, Preference::Opposite, tx)
            .unwrap_err();

        assert_eq!(err, RegistryError::DuplicateId(ClientId::from("u1")));
        // The original entry is untouched
        let entry = registry.lookup(&ClientId::from("u1")).unwrap();
        assert_eq!(entry.gender, Gender::Unspecified);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut registry = ClientRegistry::new();
        let _rx = register(&mut registry, "u1");

        assert!(registry.remove(&ClientId::from("u1")).is_some());
        assert!(registry.remove(&ClientId::from("u1")).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_link_is_mutual_and_clears_pools() {
        let mut registry = ClientRegistry::new();
        let _rx1 = register(&mut registry, "u1");
        let _rx2 = register(&mut registry, "u2");

        registry
            .lookup_mut(&ClientId::from("u1"))
            .unwrap()
            .pool = Some(crate::matching::pool::PoolKind::Any);

        registry.link(&ClientId::from("u1"), &ClientId::from("u2"));

        let u1 = registry.lookup(&ClientId::from("u1")).unwrap();
        let u2 = registry.lookup(&ClientId::from("u2")).unwrap();
        assert_eq!(u1.partner, Some(ClientId::from("u2")));
        assert_eq!(u2.partner, Some(ClientId::from("u1")));
        assert!(u1.pool.is_none());
        assert!(u2.pool.is_none());
    }

    #[test]
    fn test_unlink_clears_both_sides() {
        let mut registry = ClientRegistry::new();
        let _rx1 = register(&mut registry, "u1");
        let _rx2 = register(&mut registry, "u2");
        registry.link(&ClientId::from("u1"), &ClientId::from("u2"));

        let former = registry.unlink(&ClientId::from("u1"));
        assert_eq!(former, Some(ClientId::from("u2")));
        assert!(registry.partner_of(&ClientId::from("u1")).is_none());
        assert!(registry.partner_of(&ClientId::from("u2")).is_none());
    }

    #[test]
    fn test_unlink_survives_vanished_partner() {
        let mut registry = ClientRegistry::new();
        let _rx1 = register(&mut registry, "u1");
        let _rx2 = register(&mut registry, "u2");
        registry.link(&ClientId::from("u1"), &ClientId::from("u2"));

        // Partner entry is gone; u1's dangling reference must still clear.
        registry.remove(&ClientId::from("u2"));
        let former = registry.unlink(&ClientId::from("u1"));

        assert_eq!(former, Some(ClientId::from("u2")));
        assert!(registry.partner_of(&ClientId::from("u1")).is_none());
    }

    #[test]
    fn test_unlink_unpaired_is_none() {
        let mut registry = ClientRegistry::new();
        let _rx = register(&mut registry, "u1");
        assert!(registry.unlink(&ClientId::from("u1")).is_none());
        assert!(registry.unlink(&ClientId::from("ghost")).is_none());
    }

    #[test]
    fn test_send_to_closed_channel_reports_failure() {
        let mut registry = ClientRegistry::new();
        let rx = register(&mut registry, "u1");
        drop(rx);

        assert!(!registry.send_to(&ClientId::from("u1"), ServerEvent::PartnerDisconnected));
        assert!(!registry.send_to(&ClientId::from("ghost"), ServerEvent::PartnerDisconnected));
    }

    #[test]
    fn test_send_to_delivers() {
        let mut registry = ClientRegistry::new();
        let mut rx = register(&mut registry, "u1");

        assert!(registry.send_to(
            &ClientId::from("u1"),
            ServerEvent::Status {
                message: "waiting for a partner".to_string()
            }
        ));
        assert!(matches!(
            rx.try_recv().unwrap(),
            ServerEvent::Status { .. }
        ));
    }
}
