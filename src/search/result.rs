//! Search results and statistics

use crate::network::Network;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Shared event counters, bumped concurrently by every worker.
#[derive(Debug, Default)]
pub struct Statistics {
    /// Dominance checks started
    pub subsumption_attempts: AtomicU64,
    /// Checks that found a permutation
    pub subsumptions_detected: AtomicU64,
    /// Checks settled by plain inclusion under the identity permutation
    pub output_inclusions: AtomicU64,
    /// Checks rejected by the cluster aggregates
    pub cluster_rejections: AtomicU64,
    /// Checks rejected because some wire had no candidate partner
    pub empty_edge_rejections: AtomicU64,
    /// Permutation searches that ran out of matchings
    pub exhausted_searches: AtomicU64,
    /// Candidate permutations validated against the output clusters
    pub permutations_checked: AtomicU64,
    pub redundant_duplicates: AtomicU64,
    pub redundant_sorted: AtomicU64,
    /// Children dropped because a frontier member dominates them
    pub children_dominated: AtomicU64,
    /// Children dropped by the capacity eviction rule
    pub children_evicted: AtomicU64,
    /// Frontier members killed because a newer network dominates them
    pub peers_dominated: AtomicU64,
    /// Frontier members killed by the capacity eviction rule
    pub peers_evicted: AtomicU64,
}

/// Increment one counter.
#[inline]
pub fn bump(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
}

impl Statistics {
    pub fn snapshot(&self) -> StatisticsSnapshot {
        let get = |c: &AtomicU64| c.load(Ordering::Relaxed);
        StatisticsSnapshot {
            subsumption_attempts: get(&self.subsumption_attempts),
            subsumptions_detected: get(&self.subsumptions_detected),
            output_inclusions: get(&self.output_inclusions),
            cluster_rejections: get(&self.cluster_rejections),
            empty_edge_rejections: get(&self.empty_edge_rejections),
            exhausted_searches: get(&self.exhausted_searches),
            permutations_checked: get(&self.permutations_checked),
            redundant_duplicates: get(&self.redundant_duplicates),
            redundant_sorted: get(&self.redundant_sorted),
            children_dominated: get(&self.children_dominated),
            children_evicted: get(&self.children_evicted),
            peers_dominated: get(&self.peers_dominated),
            peers_evicted: get(&self.peers_evicted),
        }
    }

    pub fn reset(&self) {
        for counter in [
            &self.subsumption_attempts,
            &self.subsumptions_detected,
            &self.output_inclusions,
            &self.cluster_rejections,
            &self.empty_edge_rejections,
            &self.exhausted_searches,
            &self.permutations_checked,
            &self.redundant_duplicates,
            &self.redundant_sorted,
            &self.children_dominated,
            &self.children_evicted,
            &self.peers_dominated,
            &self.peers_evicted,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

/// Plain copy of [`Statistics`] at one instant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatisticsSnapshot {
    pub subsumption_attempts: u64,
    pub subsumptions_detected: u64,
    pub output_inclusions: u64,
    pub cluster_rejections: u64,
    pub empty_edge_rejections: u64,
    pub exhausted_searches: u64,
    pub permutations_checked: u64,
    pub redundant_duplicates: u64,
    pub redundant_sorted: u64,
    pub children_dominated: u64,
    pub children_evicted: u64,
    pub peers_dominated: u64,
    pub peers_evicted: u64,
}

impl StatisticsSnapshot {
    /// Fraction of dominance checks that succeeded (0.0 to 1.0)
    pub fn detection_rate(&self) -> f64 {
        if self.subsumption_attempts == 0 {
            0.0
        } else {
            self.subsumptions_detected as f64 / self.subsumption_attempts as f64
        }
    }

    /// Fraction of dominance checks settled by the aggregate bounds alone
    pub fn fast_reject_rate(&self) -> f64 {
        if self.subsumption_attempts == 0 {
            0.0
        } else {
            self.cluster_rejections as f64 / self.subsumption_attempts as f64
        }
    }

    pub fn format_summary(&self) -> String {
        let mut lines = Vec::new();
        lines.push(format!(
            "Subsumption checks: {} (detected {}, {:.1}%)",
            self.subsumption_attempts,
            self.subsumptions_detected,
            self.detection_rate() * 100.0
        ));
        lines.push(format!(
            "  inclusion {}, cluster reject {} ({:.1}%), empty edges {}, exhausted {}",
            self.output_inclusions,
            self.cluster_rejections,
            self.fast_reject_rate() * 100.0,
            self.empty_edge_rejections,
            self.exhausted_searches
        ));
        lines.push(format!("Permutations checked: {}", self.permutations_checked));
        lines.push(format!(
            "Redundant comparators: {} duplicate, {} sorted output",
            self.redundant_duplicates, self.redundant_sorted
        ));
        lines.push(format!(
            "Children dropped: {} dominated, {} evicted",
            self.children_dominated, self.children_evicted
        ));
        lines.push(format!(
            "Peers removed: {} dominated, {} evicted",
            self.peers_dominated, self.peers_evicted
        ));
        lines.join("\n")
    }
}

/// Outcome of one level of the search
#[derive(Debug, Clone)]
pub struct LevelReport {
    /// Comparator count targeted by this level
    pub size: usize,
    /// Networks handed to the next level
    pub networks: usize,
    /// Networks dropped by the size cap
    pub trimmed: usize,
    pub sorting_found: bool,
    pub best_fitness: f64,
    pub smallest_output: usize,
    pub elapsed: Duration,
    pub statistics: StatisticsSnapshot,
}

/// Final result of a search run
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    /// Surviving networks after the last level
    pub networks: Vec<Network>,
    /// Sorting networks from the first level that produced any
    pub sorting: Vec<Network>,
    pub levels: Vec<LevelReport>,
}

impl SearchResult {
    pub fn sorting_networks(&self) -> impl Iterator<Item = &Network> {
        self.sorting.iter()
    }

    pub fn found_sorting(&self) -> bool {
        !self.sorting.is_empty()
    }

    /// Comparator count of the smallest sorting network found.
    pub fn best_size(&self) -> Option<usize> {
        self.sorting.iter().map(Network::size).min()
    }

    pub fn total_elapsed(&self) -> Duration {
        self.levels.iter().map(|l| l.elapsed).sum()
    }
}
