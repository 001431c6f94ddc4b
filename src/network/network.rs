//! Comparator networks with cached output sets

use super::{Comparator, Layer};
use crate::error::{Result, SearchError, check_wires};
use crate::fitness::FitnessEstimator;
use crate::output::OutputSet;
use crate::sequence::{Permutation, Sequence};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Why a candidate comparator would not change the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedundancyReason {
    /// The same pair was the last comparator on both wires.
    Duplicate,
    /// No achieved output is out of order on the pair.
    SortedOutput,
}

/// An append-only sequence of comparators over a fixed number of wires.
///
/// The achieved output set and the fitness score are computed on first use
/// and cached; appending a comparator drops both caches.
#[derive(Debug, Clone)]
pub struct Network {
    wires: usize,
    comparators: Vec<Comparator>,
    layers: Vec<Layer>,
    /// Index into `comparators` of the last comparator touching each wire.
    last: Vec<Option<usize>>,
    generalized: bool,
    prefix: Option<Arc<Network>>,
    output: OnceLock<OutputSet>,
    fitness: OnceLock<f64>,
}

impl Network {
    pub fn new(wires: usize) -> Result<Self> {
        check_wires(wires)?;
        Ok(Network {
            wires,
            comparators: Vec::new(),
            layers: Vec::new(),
            last: vec![None; wires],
            generalized: false,
            prefix: None,
            output: OnceLock::new(),
            fitness: OnceLock::new(),
        })
    }

    /// Build a network from `(wire0, wire1)` pairs in order.
    pub fn from_pairs(wires: usize, pairs: &[(usize, usize)]) -> Result<Self> {
        let mut net = Network::new(wires)?;
        for &(i, j) in pairs {
            net.add_comparator(i, j)?;
        }
        Ok(net)
    }

    /// Append the comparator `(i, j)` at depth one past the deeper of its wires.
    pub fn add_comparator(&mut self, i: usize, j: usize) -> Result<()> {
        if i >= self.wires || j >= self.wires || i == j {
            return Err(SearchError::InvalidComparator {
                wire0: i,
                wire1: j,
                wires: self.wires,
            });
        }
        let depth = self
            .last_depth(i)
            .max(self.last_depth(j))
            .map_or(0, |d| d + 1);
        let comparator = Comparator::new(i, j, depth);
        if i > j {
            self.generalized = true;
        }
        if depth == self.layers.len() {
            self.layers.push(Layer::new(depth));
        }
        self.layers[depth].add(comparator);

        let index = self.comparators.len();
        self.comparators.push(comparator);
        self.last[i] = Some(index);
        self.last[j] = Some(index);

        self.output = OnceLock::new();
        self.fitness = OnceLock::new();
        Ok(())
    }

    fn last_depth(&self, wire: usize) -> Option<usize> {
        self.last[wire].map(|idx| self.comparators[idx].depth)
    }

    /// A fresh copy of this network with `(i, j)` appended.
    ///
    /// When this network's outputs are already known the child's outputs are
    /// derived from them instead of re-running all inputs.
    pub fn extended(&self, i: usize, j: usize) -> Result<Network> {
        let mut child = Network {
            wires: self.wires,
            comparators: self.comparators.clone(),
            layers: self.layers.clone(),
            last: self.last.clone(),
            generalized: self.generalized,
            prefix: self.prefix.clone(),
            output: OnceLock::new(),
            fitness: OnceLock::new(),
        };
        child.add_comparator(i, j)?;

        if let Some(parent_out) = self.output.get() {
            let comparator = child.comparators[child.comparators.len() - 1];
            let mut out = OutputSet::new(self.wires);
            for value in parent_out.values() {
                let seq = Sequence::get_instance(self.wires, value);
                let seq = if comparator.swaps(&seq.get(i), &seq.get(j)) {
                    seq.swapped(i, j)
                } else {
                    seq
                };
                out.add(seq);
            }
            out.compute_min_max_values();
            child.output = OnceLock::from(out);
        }
        Ok(child)
    }

    /// Why appending `(i, j)` would be pointless, if it would be.
    pub fn redundancy(&self, i: usize, j: usize) -> Option<RedundancyReason> {
        if i >= self.wires || j >= self.wires {
            return None;
        }
        if let (Some(a), Some(b)) = (self.last[i], self.last[j])
            && a == b
        {
            return Some(RedundancyReason::Duplicate);
        }
        let probe = Comparator::new(i, j, 0);
        let out = self.output_set();
        let changes_something = out.values().any(|value| {
            let seq = Sequence::get_instance(self.wires, value);
            probe.swaps(&seq.get(i), &seq.get(j))
        });
        if changes_something {
            None
        } else {
            Some(RedundancyReason::SortedOutput)
        }
    }

    pub fn is_redundant(&self, i: usize, j: usize) -> bool {
        self.redundancy(i, j).is_some()
    }

    /// Every output reachable from the 2^n binary inputs.
    pub fn output_set(&self) -> &OutputSet {
        self.output.get_or_init(|| {
            let mut out = OutputSet::new(self.wires);
            for input in 0..(1u32 << self.wires) {
                out.add(Sequence::get_instance(self.wires, self.apply(input)));
            }
            out.compute_min_max_values();
            out
        })
    }

    pub fn output_size(&self) -> usize {
        self.output_set().size()
    }

    /// Attach outputs read back from storage.
    pub fn with_outputs(mut self, outputs: OutputSet) -> Self {
        self.output = OnceLock::from(outputs);
        self
    }

    pub fn has_cached_outputs(&self) -> bool {
        self.output.get().is_some()
    }

    /// Score under `estimator`, cached after the first call.
    ///
    /// A network is scored by a single estimator during its lifetime.
    pub fn fitness(&self, estimator: &dyn FitnessEstimator) -> f64 {
        *self.fitness.get_or_init(|| estimator.compute(self))
    }

    pub fn is_sorting(&self) -> bool {
        self.output_set().is_sorting()
    }

    /// Run one binary input through the network.
    pub fn apply(&self, input: u32) -> u32 {
        let n = self.wires;
        let mut value = input;
        for c in &self.comparators {
            let m0 = Sequence::mask(n, c.wire0);
            let m1 = Sequence::mask(n, c.wire1);
            let b0 = value & m0 != 0;
            let b1 = value & m1 != 0;
            if c.swaps(&b0, &b1) {
                value ^= m0 | m1;
            }
        }
        value
    }

    /// Run an arbitrary vector of values through the network.
    pub fn apply_values(&self, input: &[i64]) -> Result<Vec<i64>> {
        if input.len() != self.wires {
            return Err(SearchError::InputLength {
                expected: self.wires,
                actual: input.len(),
            });
        }
        let mut out = input.to_vec();
        for c in &self.comparators {
            if c.swaps(&out[c.wire0], &out[c.wire1]) {
                out.swap(c.wire0, c.wire1);
            }
        }
        Ok(out)
    }

    /// The suffix starting at comparator `from`.
    pub fn split(&self, from: usize) -> Result<Network> {
        if from >= self.comparators.len() {
            return Err(SearchError::SplitIndex {
                index: from,
                len: self.comparators.len(),
            });
        }
        let mut net = Network::new(self.wires)?;
        for c in &self.comparators[from..] {
            net.add_comparator(c.wire0, c.wire1)?;
        }
        Ok(net)
    }

    /// Relabel every wire `w` as `perm[w]`.
    pub fn permute_wires(&self, perm: &Permutation) -> Result<Network> {
        perm.check_len(self.wires)?;
        let mut net = Network::new(self.wires)?;
        for c in &self.comparators {
            net.add_comparator(perm[c.wire0], perm[c.wire1])?;
        }
        Ok(net)
    }

    pub fn wires(&self) -> usize {
        self.wires
    }

    /// Number of comparators.
    pub fn size(&self) -> usize {
        self.comparators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comparators.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    pub fn comparators(&self) -> &[Comparator] {
        &self.comparators
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn last_comparator(&self, wire: usize) -> Option<&Comparator> {
        self.last.get(wire).copied().flatten().map(|idx| &self.comparators[idx])
    }

    /// Every layer holds as many comparators as the wires allow.
    pub fn is_maximal(&self) -> bool {
        self.size() == self.depth() * (self.wires / 2)
    }

    /// Some comparator is descending.
    pub fn is_generalized(&self) -> bool {
        self.generalized
    }

    pub fn with_prefix(mut self, prefix: Arc<Network>) -> Self {
        self.prefix = Some(prefix);
        self
    }

    pub fn prefix(&self) -> Option<&Arc<Network>> {
        self.prefix.as_ref()
    }

    pub fn prefix_size(&self) -> usize {
        self.prefix.as_ref().map_or(0, |p| p.size())
    }

    /// Layer-by-layer rendering, one layer per line.
    pub fn layers_string(&self) -> String {
        self.layers
            .iter()
            .map(|l| format!("[{l}]"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl PartialEq for Network {
    fn eq(&self, other: &Self) -> bool {
        self.wires == other.wires
            && self.comparators.len() == other.comparators.len()
            && self
                .comparators
                .iter()
                .zip(&other.comparators)
                .all(|(a, b)| a.wire0 == b.wire0 && a.wire1 == b.wire1)
    }
}

impl Eq for Network {}

/// Parseable form: `[(0,1);(1,2);(0,1)]`.
impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.comparators.iter().map(|c| c.to_string()).collect();
        write!(f, "[{}]", parts.join(";"))
    }
}
