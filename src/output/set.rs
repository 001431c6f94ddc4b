//! The full set of outputs a network achieves, partitioned by cardinality

use super::OutputCluster;
use crate::error::{Result, SearchError};
use crate::sequence::Sequence;
use bit_set::BitSet;
use std::fmt;
use std::sync::OnceLock;

/// Min/max of the per-cluster size and coverage counts over levels `1..n`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClusterBounds {
    pub min_size: usize,
    pub max_size: usize,
    pub min_zeros: usize,
    pub max_zeros: usize,
    pub min_ones: usize,
    pub max_ones: usize,
}

impl ClusterBounds {
    /// Some bound of `self` is larger than the matching bound of `other`.
    fn exceeds(&self, other: &ClusterBounds) -> bool {
        self.max_size > other.max_size
            || self.min_size > other.min_size
            || self.max_zeros > other.max_zeros
            || self.min_zeros > other.min_zeros
            || self.max_ones > other.max_ones
            || self.min_ones > other.min_ones
    }
}

/// Per wire, how many achieved outputs disagree with the sorted output of
/// the same cardinality: `ones[j]` counts a 1 where sorted has a 0, and
/// `zeros[j]` a 0 where sorted has a 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionCounts {
    pub zeros: Vec<usize>,
    pub ones: Vec<usize>,
}

impl PositionCounts {
    /// Wires with at least one misplaced 0, and with at least one misplaced 1.
    pub fn bad_wires(&self) -> (usize, usize) {
        (
            self.zeros.iter().filter(|&&c| c != 0).count(),
            self.ones.iter().filter(|&&c| c != 0).count(),
        )
    }
}

#[derive(Debug, Clone)]
pub struct OutputSet {
    wires: usize,
    clusters: Vec<OutputCluster>,
    values: BitSet,
    size: usize,
    bounds: ClusterBounds,
    positions: OnceLock<PositionCounts>,
}

impl OutputSet {
    /// An empty set with one cluster per level `0..=wires`.
    pub fn new(wires: usize) -> Self {
        OutputSet {
            wires,
            clusters: (0..=wires).map(|k| OutputCluster::new(wires, k)).collect(),
            values: BitSet::with_capacity(1 << wires),
            size: 0,
            bounds: ClusterBounds::default(),
            positions: OnceLock::new(),
        }
    }

    /// Build a finalized set from raw output values.
    pub fn from_values(wires: usize, values: impl IntoIterator<Item = u32>) -> Result<Self> {
        let mut set = OutputSet::new(wires);
        for value in values {
            if value >= 1 << wires {
                return Err(SearchError::Parse {
                    what: "output value",
                    reason: format!("{value} does not fit in {wires} wires"),
                });
            }
            set.add(Sequence::get_instance(wires, value));
        }
        set.compute_min_max_values();
        Ok(set)
    }

    /// Insert into the cluster of the sequence's cardinality; false on duplicates.
    pub fn add(&mut self, sequence: &Sequence) -> bool {
        if !self.clusters[sequence.cardinality()].add(sequence) {
            return false;
        }
        self.values.insert(sequence.value() as usize);
        self.size += 1;
        true
    }

    /// Freeze the aggregate bounds used by [`OutputSet::cannot_subsume`].
    pub fn compute_min_max_values(&mut self) {
        let inner = self.clusters.get(1..self.wires).unwrap_or(&[]);
        let mut bounds = ClusterBounds {
            min_size: usize::MAX,
            min_zeros: usize::MAX,
            min_ones: usize::MAX,
            ..ClusterBounds::default()
        };
        for cluster in inner {
            bounds.min_size = bounds.min_size.min(cluster.size());
            bounds.max_size = bounds.max_size.max(cluster.size());
            bounds.min_zeros = bounds.min_zeros.min(cluster.zero_count());
            bounds.max_zeros = bounds.max_zeros.max(cluster.zero_count());
            bounds.min_ones = bounds.min_ones.min(cluster.one_count());
            bounds.max_ones = bounds.max_ones.max(cluster.one_count());
        }
        if inner.is_empty() {
            bounds = ClusterBounds::default();
        }
        self.bounds = bounds;
    }

    pub fn wires(&self) -> usize {
        self.wires
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn bounds(&self) -> &ClusterBounds {
        &self.bounds
    }

    pub fn cluster(&self, level: usize) -> &OutputCluster {
        &self.clusters[level]
    }

    pub fn clusters(&self) -> &[OutputCluster] {
        &self.clusters
    }

    pub fn contains(&self, value: u32) -> bool {
        self.values.contains(value as usize)
    }

    /// Achieved values in increasing order.
    pub fn values(&self) -> impl Iterator<Item = u32> + '_ {
        self.values.iter().map(|v| v as u32)
    }

    /// Only the n+1 sorted sequences are achieved.
    pub fn is_sorting(&self) -> bool {
        self.size == self.wires + 1
    }

    /// Every output of `other` is also an output of `self`.
    pub fn includes(&self, other: &OutputSet) -> bool {
        other.size <= self.size && other.values.is_subset(&self.values)
    }

    /// Cheap test showing that no wire permutation maps `self` into `other`.
    ///
    /// Never true when such a permutation exists; it may be false when none does.
    pub fn cannot_subsume(&self, other: &OutputSet) -> bool {
        if self.size > other.size {
            return true;
        }
        if self.size < other.size {
            if self.bounds.exceeds(&other.bounds) {
                return true;
            }
        } else if self.bounds != other.bounds {
            return true;
        }
        (1..self.wires).any(|k| self.clusters[k].cannot_subsume(&other.clusters[k]))
    }

    pub fn position_counts(&self) -> &PositionCounts {
        self.positions.get_or_init(|| {
            let n = self.wires;
            let mut counts = PositionCounts {
                zeros: vec![0; n],
                ones: vec![0; n],
            };
            for value in self.values() {
                let s = Sequence::get_instance(n, value);
                let boundary = n - s.cardinality();
                for j in 0..n {
                    if j < boundary && s.get(j) {
                        counts.ones[j] += 1;
                    }
                    if j >= boundary && !s.get(j) {
                        counts.zeros[j] += 1;
                    }
                }
            }
            counts
        })
    }
}

impl PartialEq for OutputSet {
    fn eq(&self, other: &Self) -> bool {
        self.wires == other.wires && self.values == other.values
    }
}

impl Eq for OutputSet {}

impl fmt::Display for OutputSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.values().map(|v| v.to_string()).collect();
        write!(f, "{{{}}}", parts.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_only() {
        let set = OutputSet::from_values(3, [0, 1, 3, 7]).unwrap();
        assert!(set.is_sorting());
        assert_eq!(set.to_string(), "{0,1,3,7}");
        assert_eq!(set.position_counts().bad_wires(), (0, 0));
    }

    #[test]
    fn test_duplicates_ignored() {
        let mut set = OutputSet::new(3);
        assert!(set.add(Sequence::get_instance(3, 5)));
        assert!(!set.add(Sequence::get_instance(3, 5)));
        assert_eq!(set.size(), 1);
        assert_eq!(set.cluster(2).size(), 1);
    }

    #[test]
    fn test_from_values_rejects_wide_value() {
        assert!(OutputSet::from_values(3, [8]).is_err());
    }

    #[test]
    fn test_bounds() {
        // level 1: 001, 100 ; level 2: 011
        let set = OutputSet::from_values(3, [0, 1, 4, 3, 7]).unwrap();
        let b = set.bounds();
        assert_eq!((b.min_size, b.max_size), (1, 2));
        assert_eq!((b.min_ones, b.max_ones), (2, 2));
        assert_eq!((b.min_zeros, b.max_zeros), (1, 3));
    }

    #[test]
    fn test_position_counts() {
        // 100 puts a 1 on wire 0 and a 0 on wire 2 for cardinality 1
        let set = OutputSet::from_values(3, [0, 4, 3, 7]).unwrap();
        let counts = set.position_counts();
        assert_eq!(counts.ones, vec![1, 0, 0]);
        assert_eq!(counts.zeros, vec![0, 0, 1]);
    }

    #[test]
    fn test_includes_and_cannot_subsume() {
        let sorted = OutputSet::from_values(3, [0, 1, 3, 7]).unwrap();
        let wider = OutputSet::from_values(3, [0, 1, 2, 3, 7]).unwrap();
        assert!(wider.includes(&sorted));
        assert!(!sorted.includes(&wider));
        assert!(wider.cannot_subsume(&sorted));
        assert!(!sorted.cannot_subsume(&wider));
        assert!(!sorted.cannot_subsume(&sorted));
    }
}
