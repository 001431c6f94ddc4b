//! Achieved outputs of one cardinality level

use crate::sequence::Sequence;
use bit_set::BitSet;

/// The outputs of a network that carry exactly `level` ones.
///
/// Alongside the values themselves the cluster tracks, per wire, whether any
/// member shows a 0 (resp. a 1) there. Wire flags are kept as bit masks
/// indexed by wire number.
#[derive(Debug, Clone)]
pub struct OutputCluster {
    level: usize,
    values: BitSet,
    size: usize,
    zero_wires: u32,
    one_wires: u32,
}

impl OutputCluster {
    pub fn new(wires: usize, level: usize) -> Self {
        OutputCluster {
            level,
            values: BitSet::with_capacity(1 << wires),
            size: 0,
            zero_wires: 0,
            one_wires: 0,
        }
    }

    /// Insert a sequence; returns false when it was already present.
    ///
    /// Sequences of another cardinality are not members of this cluster and
    /// are rejected the same way.
    pub fn add(&mut self, sequence: &Sequence) -> bool {
        if sequence.cardinality() != self.level || !self.values.insert(sequence.value() as usize) {
            return false;
        }
        for wire in 0..sequence.width() {
            if sequence.get(wire) {
                self.one_wires |= 1 << wire;
            } else {
                self.zero_wires |= 1 << wire;
            }
        }
        self.size += 1;
        true
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn contains(&self, value: u32) -> bool {
        self.values.contains(value as usize)
    }

    pub fn values(&self) -> impl Iterator<Item = u32> + '_ {
        self.values.iter().map(|v| v as u32)
    }

    /// Some member has a 0 on `wire`.
    #[inline]
    pub fn has_zero(&self, wire: usize) -> bool {
        self.zero_wires & (1 << wire) != 0
    }

    /// Some member has a 1 on `wire`.
    #[inline]
    pub fn has_one(&self, wire: usize) -> bool {
        self.one_wires & (1 << wire) != 0
    }

    /// Number of wires on which some member has a 0.
    pub fn zero_count(&self) -> usize {
        self.zero_wires.count_ones() as usize
    }

    /// Number of wires on which some member has a 1.
    pub fn one_count(&self) -> usize {
        self.one_wires.count_ones() as usize
    }

    pub fn includes(&self, other: &OutputCluster) -> bool {
        other.size <= self.size && other.values.is_subset(&self.values)
    }

    /// No wire permutation can map this cluster into `other`.
    pub fn cannot_subsume(&self, other: &OutputCluster) -> bool {
        self.size > other.size
            || self.zero_count() > other.zero_count()
            || self.one_count() > other.one_count()
    }

    /// Wire coverage as `0`/`_` per wire.
    pub fn zero_pattern(&self, wires: usize) -> String {
        (0..wires)
            .map(|w| if self.has_zero(w) { '0' } else { '_' })
            .collect()
    }

    /// Wire coverage as `1`/`_` per wire.
    pub fn one_pattern(&self, wires: usize) -> String {
        (0..wires)
            .map(|w| if self.has_one(w) { '1' } else { '_' })
            .collect()
    }
}

impl PartialEq for OutputCluster {
    fn eq(&self, other: &Self) -> bool {
        self.level == other.level && self.values == other.values
    }
}

impl Eq for OutputCluster {}
