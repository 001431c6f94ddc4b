//! Dominance ("subsumption") between networks
//!
//! Network A subsumes network B when some wire permutation maps every output
//! of A onto an output of B. B can then be discarded: anything that sorts
//! after B also sorts after a relabelled A. The check runs in three stages:
//!
//! 1. aggregate bounds on the output clusters ([`OutputSet::cannot_subsume`]),
//! 2. plain inclusion under the identity permutation,
//! 3. a search over the perfect matchings of the [`CandidateGraph`].

pub mod bipartite;
pub mod graph;
pub mod matching;

pub use bipartite::BipartiteSubsumption;
pub use graph::CandidateGraph;
pub use matching::MatchingSubsumption;

use crate::error::SearchError;
use crate::network::Network;
use crate::output::OutputSet;
use crate::search::Statistics;
use crate::search::result::bump;
use crate::sequence::{Permutation, Sequence};

/// A strategy for finding the permutation witnessing dominance.
pub trait Subsumption: Send + Sync {
    fn name(&self) -> &'static str;

    /// Search for `p` with `p(a) ⊆ b`, assuming the cheap tests were inconclusive.
    fn find_permutation(&self, a: &OutputSet, b: &OutputSet, stats: &Statistics) -> Option<Permutation>;

    /// Full dominance test of `a` over `b`, cheap rejections first.
    fn check(&self, a: &OutputSet, b: &OutputSet, stats: &Statistics) -> Option<Permutation> {
        bump(&stats.subsumption_attempts);
        if a.cannot_subsume(b) {
            bump(&stats.cluster_rejections);
            return None;
        }
        if b.includes(a) {
            bump(&stats.output_inclusions);
            return Some(Permutation::identity(a.wires()));
        }
        let perm = self.find_permutation(a, b, stats);
        if perm.is_some() {
            bump(&stats.subsumptions_detected);
        }
        perm
    }
}

/// Whether network `a` dominates network `b`.
pub fn subsumes(oracle: &dyn Subsumption, a: &Network, b: &Network, stats: &Statistics) -> bool {
    oracle.check(a.output_set(), b.output_set(), stats).is_some()
}

/// Validate `perm` on the clusters of levels `2..=n-2`.
///
/// Levels 0 and n hold one fixed sequence each; levels 1 and n-1 are decided
/// by the candidate-graph coverage constraints already.
pub fn check_permutation(a: &OutputSet, b: &OutputSet, perm: &[usize], stats: &Statistics) -> bool {
    bump(&stats.permutations_checked);
    let n = a.wires();
    (2..n.saturating_sub(1)).all(|k| {
        let target = b.cluster(k);
        a.cluster(k)
            .values()
            .all(|v| target.contains(Sequence::get_instance(n, v).permuted_value(perm)))
    })
}

/// Named strategy selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubsumptionKind {
    /// Alternating-cycle exchange over the perfect matchings
    #[default]
    Matching,
    /// Depth-first enumeration of the perfect matchings
    Bipartite,
}

impl SubsumptionKind {
    pub fn build(self) -> Box<dyn Subsumption> {
        match self {
            SubsumptionKind::Matching => Box::new(MatchingSubsumption),
            SubsumptionKind::Bipartite => Box::new(BipartiteSubsumption),
        }
    }
}

impl std::fmt::Display for SubsumptionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubsumptionKind::Matching => write!(f, "SubsumptionMatchImpl"),
            SubsumptionKind::Bipartite => write!(f, "SubsumptionBipartiteMatching"),
        }
    }
}

impl std::str::FromStr for SubsumptionKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "subsumptionmatchimpl" | "matching" | "match" => Ok(SubsumptionKind::Matching),
            "subsumptionbipartitematching" | "bipartite" => Ok(SubsumptionKind::Bipartite),
            _ => Err(SearchError::UnknownStrategy {
                kind: "subsumption",
                name: s.to_string(),
                valid: "SubsumptionMatchImpl (matching), SubsumptionBipartiteMatching (bipartite)",
            }),
        }
    }
}
