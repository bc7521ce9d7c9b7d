//! Waiting pools and the pairing algorithm
//!
//! Unpaired clients queue up in three FIFO pools partitioned by what they
//! search for; the matcher drains those pools into pairs after every pool
//! mutation. Both live inside the hub's single exclusion domain, so matching
//! is race-free by construction.

pub mod matcher;
pub mod pool;

pub use matcher::{run_matching, MatchedPair};
pub use pool::{PoolKind, PoolSizes, WaitingPools};
