//! Waiting pools
//!
//! Three disjoint FIFO queues of unpaired client ids, partitioned by what
//! the client is searching for. A given id appears in at most one pool at
//! any instant, and never while its entry is paired.

use std::collections::VecDeque;
use std::fmt;

use crate::registry::client::{ClientId, Gender, Preference};

/// The pool a waiting client is queued in
///
/// Pools are named for the gender the occupant *seeks*: a male client with
/// the opposite preference seeks a female, so it waits in `SeekingFemale`.
/// The matcher pairs the heads of `SeekingMale` and `SeekingFemale` across
/// the two queues, which is what makes the cross-naming line up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolKind {
    /// No gender constraint
    Any,
    /// Waiting for a male partner
    SeekingMale,
    /// Waiting for a female partner
    SeekingFemale,
}

impl PoolKind {
    /// Pool a client with the given attributes waits in
    pub fn for_profile(gender: Gender, preference: Preference) -> Self {
        match preference {
            Preference::Any => PoolKind::Any,
            Preference::Opposite => match gender {
                Gender::Male => PoolKind::SeekingFemale,
                Gender::Female | Gender::Unspecified => PoolKind::SeekingMale,
            },
        }
    }

    /// Stable name, used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            PoolKind::Any => "any",
            PoolKind::SeekingMale => "seeking-male",
            PoolKind::SeekingFemale => "seeking-female",
        }
    }
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only snapshot of the pool sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolSizes {
    pub any: usize,
    pub seeking_male: usize,
    pub seeking_female: usize,
}

impl PoolSizes {
    /// Total number of waiting clients
    pub fn total(&self) -> usize {
        self.any + self.seeking_male + self.seeking_female
    }
}

/// The three waiting queues
#[derive(Debug, Default)]
pub struct WaitingPools {
    any: VecDeque<ClientId>,
    seeking_male: VecDeque<ClientId>,
    seeking_female: VecDeque<ClientId>,
}

impl WaitingPools {
    /// Create empty pools
    pub fn new() -> Self {
        Self::default()
    }

    fn queue(&self, kind: PoolKind) -> &VecDeque<ClientId> {
        match kind {
            PoolKind::Any => &self.any,
            PoolKind::SeekingMale => &self.seeking_male,
            PoolKind::SeekingFemale => &self.seeking_female,
        }
    }

    fn queue_mut(&mut self, kind: PoolKind) -> &mut VecDeque<ClientId> {
        match kind {
            PoolKind::Any => &mut self.any,
            PoolKind::SeekingMale => &mut self.seeking_male,
            PoolKind::SeekingFemale => &mut self.seeking_female,
        }
    }

    /// Append an id to the tail of the named pool
    ///
    /// Removal-before-insert keeps membership unique: re-queuing an id that
    /// is already waiting somewhere moves it, it never duplicates it.
    pub fn enqueue(&mut self, kind: PoolKind, id: ClientId) {
        self.dequeue_if_present(&id);
        self.queue_mut(kind).push_back(id);
    }

    /// Remove an id from whichever pool contains it
    ///
    /// Returns whether a removal occurred.
    pub fn dequeue_if_present(&mut self, id: &ClientId) -> bool {
        for kind in [PoolKind::Any, PoolKind::SeekingMale, PoolKind::SeekingFemale] {
            let queue = self.queue_mut(kind);
            if let Some(pos) = queue.iter().position(|queued| queued == id) {
                queue.remove(pos);
                return true;
            }
        }
        false
    }

    /// FIFO pop from the head of the named pool
    pub fn pop_front(&mut self, kind: PoolKind) -> Option<ClientId> {
        self.queue_mut(kind).pop_front()
    }

    /// Put an id back at the head of the named pool
    ///
    /// Used by the matcher to return a live client it popped but could not
    /// pair, preserving its FIFO position.
    pub fn push_front(&mut self, kind: PoolKind, id: ClientId) {
        self.queue_mut(kind).push_front(id);
    }

    /// Which pool contains this id, if any
    pub fn find(&self, id: &ClientId) -> Option<PoolKind> {
        for kind in [PoolKind::Any, PoolKind::SeekingMale, PoolKind::SeekingFemale] {
            if self.queue(kind).contains(id) {
                return Some(kind);
            }
        }
        None
    }

    /// Snapshot of the current sizes
    pub fn sizes(&self) -> PoolSizes {
        PoolSizes {
            any: self.any.len(),
            seeking_male: self.seeking_male.len(),
            seeking_female: self.seeking_female.len(),
        }
    }

    /// Total number of waiting clients
    pub fn len(&self) -> usize {
        self.sizes().total()
    }

    /// Whether all pools are empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ClientId {
        ClientId::from(s)
    }

    #[test]
    fn test_fifo_order() {
        let mut pools = WaitingPools::new();
        pools.enqueue(PoolKind::Any, id("a"));
        pools.enqueue(PoolKind::Any, id("b"));
        pools.enqueue(PoolKind::Any, id("c"));

        assert_eq!(pools.pop_front(PoolKind::Any), Some(id("a")));
        assert_eq!(pools.pop_front(PoolKind::Any), Some(id("b")));
        assert_eq!(pools.pop_front(PoolKind::Any), Some(id("c")));
        assert_eq!(pools.pop_front(PoolKind::Any), None);
    }

    #[test]
    fn test_enqueue_is_duplicate_free() {
        let mut pools = WaitingPools::new();
        pools.enqueue(PoolKind::Any, id("a"));
        pools.enqueue(PoolKind::Any, id("b"));
        // Re-queuing moves to the tail instead of duplicating
        pools.enqueue(PoolKind::Any, id("a"));

        assert_eq!(pools.sizes().any, 2);
        assert_eq!(pools.pop_front(PoolKind::Any), Some(id("b")));
        assert_eq!(pools.pop_front(PoolKind::Any), Some(id("a")));
    }

    #[test]
    fn test_enqueue_moves_between_pools() {
        let mut pools = WaitingPools::new();
        pools.enqueue(PoolKind::SeekingMale, id("a"));
        pools.enqueue(PoolKind::Any, id("a"));

        assert_eq!(pools.find(&id("a")), Some(PoolKind::Any));
        assert_eq!(pools.sizes().seeking_male, 0);
        assert_eq!(pools.len(), 1);
    }

    #[test]
    fn test_dequeue_if_present() {
        let mut pools = WaitingPools::new();
        pools.enqueue(PoolKind::SeekingFemale, id("a"));

        assert!(pools.dequeue_if_present(&id("a")));
        assert!(!pools.dequeue_if_present(&id("a")));
        assert!(pools.is_empty());
    }

    #[test]
    fn test_push_front_restores_position() {
        let mut pools = WaitingPools::new();
        pools.enqueue(PoolKind::Any, id("a"));
        pools.enqueue(PoolKind::Any, id("b"));

        let popped = pools.pop_front(PoolKind::Any).unwrap();
        pools.push_front(PoolKind::Any, popped);

        assert_eq!(pools.pop_front(PoolKind::Any), Some(id("a")));
    }

    #[test]
    fn test_for_profile_selection() {
        assert_eq!(
            PoolKind::for_profile(Gender::Male, Preference::Opposite),
            PoolKind::SeekingFemale
        );
        assert_eq!(
            PoolKind::for_profile(Gender::Female, Preference::Opposite),
            PoolKind::SeekingMale
        );
        assert_eq!(
            PoolKind::for_profile(Gender::Male, Preference::Any),
            PoolKind::Any
        );
    }

    #[test]
    fn test_sizes_snapshot() {
        let mut pools = WaitingPools::new();
        pools.enqueue(PoolKind::Any, id("a"));
        pools.enqueue(PoolKind::SeekingMale, id("b"));
        pools.enqueue(PoolKind::SeekingFemale, id("c"));
        pools.enqueue(PoolKind::SeekingFemale, id("d"));

        let sizes = pools.sizes();
        assert_eq!(sizes.any, 1);
        assert_eq!(sizes.seeking_male, 1);
        assert_eq!(sizes.seeking_female, 2);
        assert_eq!(sizes.total(), 4);
    }
}
