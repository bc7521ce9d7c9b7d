//! Pairing algorithm
//!
//! Drains the waiting pools into pairs. Runs after every pool mutation,
//! inside the hub's critical section, so it always sees a consistent
//! registry/pool snapshot and its pairings are atomic.
//!
//! Two passes, in fixed order:
//! 1. opposite-preference: pair heads of `SeekingMale` and `SeekingFemale`
//!    until either pool drains — opposite-preference requests win when both
//!    pool types are simultaneously satisfiable;
//! 2. any-preference: pair the two oldest entries of `Any` while at least
//!    two remain.
//!
//! Ids that no longer resolve to a live, unpaired client are discarded
//! silently. A live client popped without finding a counterpart goes back
//! to the head of its pool, keeping its FIFO position; the matcher never
//! leaves a live client outside both a pool and a pairing.

use super::pool::{PoolKind, WaitingPools};
use crate::registry::client::ClientId;
use crate::registry::store::ClientRegistry;

/// A pairing formed by the matcher
///
/// The initiator is the side that was popped first from its queue; exactly
/// one side of every pair initiates the negotiation handshake so the two
/// peers cannot race each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedPair {
    pub initiator: ClientId,
    pub responder: ClientId,
}

/// Run both matching passes to exhaustion
///
/// Mutates partner fields (via `ClientRegistry::link`) and pool contents,
/// and returns the formed pairs for the caller to notify. Each loop
/// iteration strictly shrinks a pool, so both passes terminate in O(pool
/// size).
pub fn run_matching(registry: &mut ClientRegistry, pools: &mut WaitingPools) -> Vec<MatchedPair> {
    let mut pairs = Vec::new();
    opposite_pass(registry, pools, &mut pairs);
    any_pass(registry, pools, &mut pairs);
    pairs
}

fn opposite_pass(
    registry: &mut ClientRegistry,
    pools: &mut WaitingPools,
    pairs: &mut Vec<MatchedPair>,
) {
    loop {
        let sizes = pools.sizes();
        if sizes.seeking_male == 0 || sizes.seeking_female == 0 {
            break;
        }

        let Some(first) = pop_live(registry, pools, PoolKind::SeekingMale) else {
            break;
        };
        let Some(second) = pop_live(registry, pools, PoolKind::SeekingFemale) else {
            pools.push_front(PoolKind::SeekingMale, first);
            break;
        };

        form(registry, pairs, first, second);
    }
}

fn any_pass(
    registry: &mut ClientRegistry,
    pools: &mut WaitingPools,
    pairs: &mut Vec<MatchedPair>,
) {
    loop {
        if pools.sizes().any < 2 {
            break;
        }

        let Some(first) = pop_live(registry, pools, PoolKind::Any) else {
            break;
        };
        let Some(second) = pop_live(registry, pools, PoolKind::Any) else {
            pools.push_front(PoolKind::Any, first);
            break;
        };

        form(registry, pairs, first, second);
    }
}

/// Pop from the head of a pool until a live, unpaired client surfaces
///
/// Stale entries (clients that vanished, or were somehow paired while still
/// queued) are dropped without re-queuing.
fn pop_live(
    registry: &ClientRegistry,
    pools: &mut WaitingPools,
    kind: PoolKind,
) -> Option<ClientId> {
    while let Some(id) = pools.pop_front(kind) {
        match registry.lookup(&id) {
            Some(entry) if entry.partner.is_none() => return Some(id),
            _ => {
                tracing::debug!(client = %id, pool = %kind, "Discarding stale pool entry");
            }
        }
    }
    None
}

fn form(
    registry: &mut ClientRegistry,
    pairs: &mut Vec<MatchedPair>,
    initiator: ClientId,
    responder: ClientId,
) {
    registry.link(&initiator, &responder);
    tracing::debug!(initiator = %initiator, responder = %responder, "Matched pair");
    pairs.push(MatchedPair {
        initiator,
        responder,
    });
}
