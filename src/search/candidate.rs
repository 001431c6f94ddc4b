//! Comparator candidates for expanding a network by one step

use crate::network::{Network, RedundancyReason};

/// Every unordered wire pair `(i, j)` with `i < j`, in lexicographic order.
pub fn wire_pairs(wires: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..wires).flat_map(move |i| (i + 1..wires).map(move |j| (i, j)))
}

/// Number of children one network can have before redundancy filtering.
pub fn pair_count(wires: usize) -> usize {
    wires * wires.saturating_sub(1) / 2
}

/// Outcome of considering one pair on a parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    Useful(usize, usize),
    Redundant(RedundancyReason),
}

/// Classify every pair on `parent`.
pub fn candidates(parent: &Network) -> impl Iterator<Item = Candidate> + '_ {
    wire_pairs(parent.wires()).map(|(i, j)| match parent.redundancy(i, j) {
        Some(reason) => Candidate::Redundant(reason),
        None => Candidate::Useful(i, j),
    })
}
