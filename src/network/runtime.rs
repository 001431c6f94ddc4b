//! Frontier entries: a network plus the bookkeeping the parallel search needs

use super::Network;
use crate::search::Statistics;
use crate::subsumption::Subsumption;
use std::sync::atomic::{AtomicBool, Ordering};

/// A network living in the frontier.
///
/// The id is assigned on insertion and grows monotonically within a level.
/// The two watermarks record the highest id this network was already
/// compared against in each direction, so the final removal pass can skip
/// pairs an expansion task has settled.
#[derive(Debug)]
pub struct RuntimeNetwork {
    network: Network,
    pub(crate) id: u64,
    out_size: usize,
    dead: AtomicBool,
    pub(crate) checked_subsumed_by_id: u64,
    pub(crate) checked_subsumes_id: u64,
}

impl RuntimeNetwork {
    /// Wrap a network; computes its outputs if they are not cached yet.
    pub fn new(network: Network) -> Self {
        let out_size = network.output_size();
        RuntimeNetwork {
            network,
            id: 0,
            out_size,
            dead: AtomicBool::new(false),
            checked_subsumed_by_id: 0,
            checked_subsumes_id: 0,
        }
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn into_network(self) -> Network {
        self.network
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn out_size(&self) -> usize {
        self.out_size
    }

    pub fn is_dead(&self) -> bool {
        self.dead.load(Ordering::Acquire)
    }

    /// Flag as dead; returns false if it already was.
    pub(crate) fn mark_dead(&self) -> bool {
        !self.dead.swap(true, Ordering::AcqRel)
    }

    pub fn checked_subsumed_by_id(&self) -> u64 {
        self.checked_subsumed_by_id
    }

    pub fn checked_subsumes_id(&self) -> u64 {
        self.checked_subsumes_id
    }

    /// Whether this network dominates a live `other`.
    pub fn subsumes(&self, other: &RuntimeNetwork, oracle: &dyn Subsumption, stats: &Statistics) -> bool {
        if other.is_dead() {
            return false;
        }
        oracle
            .check(self.network.output_set(), other.network.output_set(), stats)
            .is_some()
    }
}
