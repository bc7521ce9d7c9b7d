//! Signaling hub
//!
//! Orchestrates the client lifecycle: registration, matching, relaying,
//! partner swaps and disconnects. The hub owns the registry and the waiting
//! pools behind a single mutex, so every mutating operation — including the
//! matcher pass that follows it — runs in one critical section and the
//! pool-membership and mutual-partner invariants hold at every observable
//! point.
//!
//! Per client the lifecycle is:
//!
//! ```text
//!   Unregistered ──register──► Waiting ──matcher──► Paired
//!        ▲                        ▲                    │
//!        │                        └───next_partner─────┤
//!        └────────────────────disconnect───────────────┘
//! ```
//!
//! The hub is transport-agnostic. A host accepts a connection, calls
//! [`SignalingHub::register`] to obtain the client's outbound event stream,
//! feeds decoded inbound events through [`SignalingHub::dispatch`], and calls
//! [`SignalingHub::disconnect`] when the connection drops.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde_json::Value;
use tokio::sync::{mpsc, Mutex};

use crate::config::HubConfig;
use crate::error::{Error, Result};
use crate::matching::matcher::{run_matching, MatchedPair};
use crate::matching::pool::{PoolSizes, WaitingPools};
use crate::protocol::event::{ClientEvent, RelayKind};
use crate::protocol::notify::ServerEvent;
use crate::registry::client::{ClientId, ClientPhase, Gender, Preference};
use crate::registry::error::RegistryError;
use crate::registry::store::ClientRegistry;
use crate::relay::relay;
use crate::stats::HubStats;

/// Mutable core state, guarded as one unit
///
/// Registry and pools are never locked separately: the invariants that
/// matter (membership iff unpaired, mutual partner references) span both.
struct HubState {
    registry: ClientRegistry,
    pools: WaitingPools,
}

impl HubState {
    /// Queue a client into the pool its attributes select
    fn enqueue(&mut self, id: &ClientId) {
        if let Some(entry) = self.registry.lookup_mut(id) {
            let kind = entry.desired_pool();
            entry.pool = Some(kind);
            self.pools.enqueue(kind, id.clone());
            tracing::debug!(client = %id, pool = %kind, "Client queued");
        }
    }

    /// Break a pairing starting from one side
    ///
    /// The displaced partner (when it still resolves) is notified and put
    /// back into its pool; this side's partner reference is always cleared.
    fn break_pair(&mut self, id: &ClientId) {
        let Some(partner_id) = self.registry.unlink(id) else {
            return;
        };

        if self.registry.contains(&partner_id) {
            self.registry
                .send_to(&partner_id, ServerEvent::PartnerDisconnected);
            self.enqueue(&partner_id);
            tracing::debug!(client = %id, partner = %partner_id, "Pairing broken, partner re-queued");
        } else {
            tracing::debug!(client = %id, partner = %partner_id, "Pairing broken, partner already gone");
        }
    }

    /// Run the matcher and notify every formed pair
    fn match_and_notify(&mut self) -> usize {
        let pairs = run_matching(&mut self.registry, &mut self.pools);
        for pair in &pairs {
            self.notify_pair(pair);
        }
        pairs.len()
    }

    fn notify_pair(&self, pair: &MatchedPair) {
        let initiator_gender = self.registry.lookup(&pair.initiator).map(|e| e.gender);
        let responder_gender = self.registry.lookup(&pair.responder).map(|e| e.gender);
        let (Some(initiator_gender), Some(responder_gender)) =
            (initiator_gender, responder_gender)
        else {
            return;
        };

        self.registry.send_to(
            &pair.initiator,
            ServerEvent::PartnerFound {
                partner_id: pair.responder.clone(),
                partner_gender: responder_gender,
                initiator: true,
            },
        );
        self.registry.send_to(
            &pair.responder,
            ServerEvent::PartnerFound {
                partner_id: pair.initiator.clone(),
                partner_gender: initiator_gender,
                initiator: false,
            },
        );
        tracing::info!(initiator = %pair.initiator, responder = %pair.responder, "Pair formed");
    }

    /// Whether the client is registered, unpaired and still queued
    fn is_waiting(&self, id: &ClientId) -> bool {
        self.registry
            .lookup(id)
            .map(|entry| entry.partner.is_none())
            .unwrap_or(false)
    }
}

/// Matchmaking and signaling relay hub
pub struct SignalingHub {
    state: Mutex<HubState>,
    config: HubConfig,
    started_at: Instant,
    total_registrations: AtomicU64,
    pairs_formed: AtomicU64,
    messages_relayed: AtomicU64,
}

impl SignalingHub {
    /// Create a hub with the default configuration
    pub fn new() -> Self {
        Self::with_config(HubConfig::default())
    }

    /// Create a hub with a custom configuration
    pub fn with_config(config: HubConfig) -> Self {
        Self {
            state: Mutex::new(HubState {
                registry: ClientRegistry::new(),
                pools: WaitingPools::new(),
            }),
            config,
            started_at: Instant::now(),
            total_registrations: AtomicU64::new(0),
            pairs_formed: AtomicU64::new(0),
            messages_relayed: AtomicU64::new(0),
        }
    }

    /// Get the hub configuration
    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    /// Register a client and enter the waiting pool
    ///
    /// Returns the receiving half of the client's outbound channel; the host
    /// forwards events from it to the transport. Registration may pair the
    /// client immediately, in which case the first event on the channel is
    /// `partnerFound`.
    ///
    /// Fails with `DuplicateId` for an id that is already registered and
    /// with `AtCapacity` when the admission cap is reached.
    pub async fn register(
        &self,
        id: ClientId,
        gender: Gender,
        preference: Preference,
    ) -> Result<mpsc::UnboundedReceiver<ServerEvent>> {
        if id.is_empty() {
            return Err(Error::Protocol("client id must not be empty".to_string()));
        }

        let mut state = self.state.lock().await;

        if self.config.max_clients > 0 && state.registry.len() >= self.config.max_clients {
            tracing::warn!(client = %id, max = self.config.max_clients, "Registration rejected: hub at capacity");
            return Err(Error::AtCapacity(self.config.max_clients));
        }

        let (tx, rx) = mpsc::unbounded_channel();
        state.registry.register(id.clone(), gender, preference, tx)?;
        self.total_registrations.fetch_add(1, Ordering::Relaxed);
        tracing::info!(client = %id, gender = ?gender, preference = ?preference, "Client registered");

        state.enqueue(&id);
        self.match_pass(&mut state);
        self.maybe_send_waiting_status(&state, &id);

        Ok(rx)
    }

    /// Relay one negotiation message from a client to its target
    ///
    /// When the target is unavailable the sender is told so with an `error`
    /// event and the message is dropped.
    pub async fn relay(
        &self,
        from: &ClientId,
        kind: RelayKind,
        target: &ClientId,
        payload: Value,
    ) -> Result<()> {
        let state = self.state.lock().await;

        match relay(&state.registry, kind, from, target, payload) {
            Ok(()) => {
                self.messages_relayed.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(from = %from, target = %target, error = %err, "Relay failed");
                state.registry.send_to(
                    from,
                    ServerEvent::Error {
                        message: err.to_string(),
                    },
                );
                Err(Error::Relay(err))
            }
        }
    }

    /// Break the current pairing and wait for a new partner
    ///
    /// The displaced partner transitions back to waiting too; with otherwise
    /// empty pools the two may legitimately be re-paired with each other.
    /// For a client that is already waiting this is a no-op: it keeps its
    /// queue position and no duplicate entry is created.
    pub async fn next_partner(&self, id: &ClientId) -> Result<()> {
        let mut state = self.state.lock().await;

        let Some(entry) = state.registry.lookup(id) else {
            return Err(Error::Registry(RegistryError::UnknownClient(id.clone())));
        };

        if entry.phase() == ClientPhase::Waiting {
            tracing::debug!(client = %id, "next_partner without a partner; keeping queue position");
            return Ok(());
        }

        tracing::info!(client = %id, "Client requested next partner");
        state.break_pair(id);
        state.enqueue(id);
        self.match_pass(&mut state);
        self.maybe_send_waiting_status(&state, id);

        Ok(())
    }

    /// Remove a client from the system
    ///
    /// Breaks an active pairing (the partner is notified and re-queued),
    /// drops any pool membership and deletes the registry entry. Idempotent:
    /// disconnects for unknown ids are ignored, so a transport-detected
    /// close racing an explicit `disconnect` event is harmless.
    pub async fn disconnect(&self, id: &ClientId) {
        let mut state = self.state.lock().await;

        if !state.registry.contains(id) {
            tracing::debug!(client = %id, "Disconnect for unknown client ignored");
            return;
        }

        state.break_pair(id);
        state.pools.dequeue_if_present(id);
        state.registry.remove(id);
        tracing::info!(client = %id, "Client disconnected");

        // The re-queued partner (if any) may be matchable right away.
        self.match_pass(&mut state);
    }

    /// Route one decoded inbound event from an established client
    ///
    /// `from` is the id the transport bound this channel to at registration;
    /// it attributes relayed messages to their sender. `register` events
    /// cannot be dispatched — registration must go through
    /// [`SignalingHub::register`] so the host receives the outbound channel.
    pub async fn dispatch(&self, from: &ClientId, event: ClientEvent) -> Result<()> {
        match event {
            ClientEvent::Register { .. } => Err(Error::Protocol(
                "register must be handled via SignalingHub::register".to_string(),
            )),
            ClientEvent::NextPartner { id } => self.next_partner(&id).await,
            ClientEvent::Disconnect { id } => {
                self.disconnect(&id).await;
                Ok(())
            }
            relayed => match relayed.into_relay_parts() {
                Some((kind, target, payload)) => self.relay(from, kind, &target, payload).await,
                None => Err(Error::Protocol("unroutable event".to_string())),
            },
        }
    }

    /// Current lifecycle phase of a client, if registered
    pub async fn phase_of(&self, id: &ClientId) -> Option<ClientPhase> {
        let state = self.state.lock().await;
        state.registry.lookup(id).map(|entry| entry.phase())
    }

    /// Current partner of a client, if any
    pub async fn partner_of(&self, id: &ClientId) -> Option<ClientId> {
        let state = self.state.lock().await;
        state.registry.partner_of(id)
    }

    /// Number of registered clients
    pub async fn client_count(&self) -> usize {
        self.state.lock().await.registry.len()
    }

    /// Snapshot of the waiting pool sizes
    pub async fn pool_sizes(&self) -> PoolSizes {
        self.state.lock().await.pools.sizes()
    }

    /// Snapshot of hub-wide statistics
    pub async fn stats(&self) -> HubStats {
        let state = self.state.lock().await;
        let paired = state
            .registry
            .iter()
            .filter(|entry| entry.phase() == ClientPhase::Paired)
            .count();

        HubStats {
            active_clients: state.registry.len(),
            waiting_clients: state.pools.len(),
            paired_clients: paired,
            total_registrations: self.total_registrations.load(Ordering::Relaxed),
            pairs_formed: self.pairs_formed.load(Ordering::Relaxed),
            messages_relayed: self.messages_relayed.load(Ordering::Relaxed),
            uptime: self.started_at.elapsed(),
        }
    }

    fn match_pass(&self, state: &mut HubState) {
        let formed = state.match_and_notify();
        if formed > 0 {
            self.pairs_formed.fetch_add(formed as u64, Ordering::Relaxed);
        }
    }

    fn maybe_send_waiting_status(&self, state: &HubState, id: &ClientId) {
        if self.config.status_updates && state.is_waiting(id) {
            state.registry.send_to(
                id,
                ServerEvent::Status {
                    message: "waiting for a partner".to_string(),
                },
            );
        }
    }
}

impl Default for SignalingHub {
    fn default() -> Self {
        Self::new()
    }
}
