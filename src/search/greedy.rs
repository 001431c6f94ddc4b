//! Sequential greedy best-first variant of the level search
//!
//! Keeps at most `bound` networks per level. A new child removes every
//! kept network it dominates and, once the level is full, may push out a
//! worse one at random. After each level, networks dominated by a peer are
//! removed and the worst scores are trimmed.

use super::acceptance::single_draw_evicts;
use super::candidate::wire_pairs;
use super::result::{Statistics, bump};
use crate::error::Result;
use crate::fitness::{FitnessEstimator, FitnessKind};
use crate::network::Network;
use crate::subsumption::{Subsumption, SubsumptionKind, subsumes};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

pub struct GreedySearch {
    oracle: Box<dyn Subsumption>,
    estimator: Box<dyn FitnessEstimator>,
    statistics: Statistics,
    rng: ChaCha8Rng,
    bound: usize,
}

impl GreedySearch {
    pub fn new(subsumption: SubsumptionKind, fitness: FitnessKind, bound: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        };
        GreedySearch {
            oracle: subsumption.build(),
            estimator: fitness.build(),
            statistics: Statistics::default(),
            rng,
            bound: bound.max(1),
        }
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn bound(&self) -> usize {
        self.bound
    }

    /// Grow `prefix` one comparator at a time up to `to` comparators.
    ///
    /// Returns the last non-empty level.
    pub fn generate(&mut self, prefix: &Network, to: usize) -> Result<Vec<Network>> {
        let GreedySearch {
            oracle,
            estimator,
            statistics,
            rng,
            bound,
        } = self;
        let (oracle, estimator, bound) = (oracle.as_ref(), estimator.as_ref(), *bound);
        let wires = prefix.wires();

        let mut previous = vec![prefix.clone()];
        for size in prefix.size() + 1..=to {
            let mut current: Vec<Network> = Vec::new();
            for parent in &previous {
                for (i, j) in wire_pairs(wires) {
                    if parent.is_redundant(i, j) {
                        continue;
                    }
                    let child = parent.extended(i, j)?;
                    let child_fitness = child.fitness(estimator);
                    let full = current.len() >= bound;

                    let mut kept = Vec::with_capacity(current.len() + 1);
                    for other in current.drain(..) {
                        if subsumes(oracle, &child, &other, statistics) {
                            bump(&statistics.peers_dominated);
                            continue;
                        }
                        if full && single_draw_evicts(rng, child_fitness, other.fitness(estimator)) {
                            bump(&statistics.peers_evicted);
                            continue;
                        }
                        kept.push(other);
                    }
                    kept.push(child);
                    current = kept;
                }
            }

            let before = current.len();
            current = remove_mutually_dominated(oracle, current, statistics);
            debug!(size, removed = before - current.len(), "greedy dominance pass");

            if current.len() > bound {
                current.sort_by(|a, b| a.fitness(estimator).total_cmp(&b.fitness(estimator)));
                current.truncate(bound);
            }

            let sorting = current.iter().filter(|n| n.is_sorting()).count();
            info!(size, networks = current.len(), sorting, "greedy level complete");
            if current.is_empty() {
                break;
            }
            previous = current;
        }
        Ok(previous)
    }
}

/// Drop every network some surviving peer dominates; of two equivalent
/// networks the earlier one stays.
fn remove_mutually_dominated(oracle: &dyn Subsumption, nets: Vec<Network>, stats: &Statistics) -> Vec<Network> {
    let mut dead = vec![false; nets.len()];
    for i in 0..nets.len() {
        if dead[i] {
            continue;
        }
        for j in 0..nets.len() {
            if i != j && !dead[j] && subsumes(oracle, &nets[i], &nets[j], stats) {
                dead[j] = true;
            }
        }
    }
    nets.into_iter()
        .zip(dead)
        .filter_map(|(net, dead)| (!dead).then_some(net))
        .collect()
}
