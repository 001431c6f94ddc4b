//! Matching enumeration through alternating-cycle exchange

use super::graph::{CandidateGraph, exchange};
use super::{Subsumption, check_permutation};
use crate::output::OutputSet;
use crate::search::Statistics;
use crate::search::result::bump;
use crate::sequence::Permutation;

/// Walks the perfect matchings of the candidate graph by flipping one
/// alternating cycle at a time, stopping at the first that validates.
///
/// Each step splits the remaining matchings into those without a chosen
/// matched edge and those forced to use it, so no matching is visited twice.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchingSubsumption;

/// Result of exploring one branch of the matching space.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Search {
    Found(Vec<usize>),
    Exhausted,
}

impl Subsumption for MatchingSubsumption {
    fn name(&self) -> &'static str {
        "SubsumptionMatchImpl"
    }

    fn find_permutation(&self, a: &OutputSet, b: &OutputSet, stats: &Statistics) -> Option<Permutation> {
        let graph = CandidateGraph::build(a, b);
        if graph.has_isolated_vertex() {
            bump(&stats.empty_edge_rejections);
            return None;
        }
        let Some(matching) = graph.perfect_matching() else {
            bump(&stats.exhausted_searches);
            return None;
        };
        if check_permutation(a, b, &matching, stats) {
            return Some(Permutation::from_matching(matching));
        }
        match explore(a, b, graph, matching, stats) {
            Search::Found(perm) => Some(Permutation::from_matching(perm)),
            Search::Exhausted => {
                bump(&stats.exhausted_searches);
                None
            }
        }
    }
}

/// Look for a validating matching in `graph` other than `matching`, which
/// has already been checked.
fn explore(
    a: &OutputSet,
    b: &OutputSet,
    graph: CandidateGraph,
    matching: Vec<usize>,
    stats: &Statistics,
) -> Search {
    let Some(cycle) = graph.alternating_cycle(&matching) else {
        return Search::Exhausted;
    };
    let next = exchange(&matching, &cycle);
    if check_permutation(a, b, &next, stats) {
        return Search::Found(next);
    }

    // (u, v) is matched in `matching` but not in `next`
    let u = cycle[0];
    let v = matching[u];

    let mut without = graph.clone();
    without.remove_edge(u, v);
    if let found @ Search::Found(_) = explore(a, b, without, next, stats) {
        return found;
    }

    let mut forced = graph;
    forced.force_edge(u, v);
    if forced.has_isolated_vertex() {
        return Search::Exhausted;
    }
    explore(a, b, forced, matching, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Network;

    fn outputs(wires: usize, pairs: &[(usize, usize)]) -> OutputSet {
        Network::from_pairs(wires, pairs).unwrap().output_set().clone()
    }

    #[test]
    fn test_finds_mirror_permutation() {
        // (0,1) and (2,3) are equivalent up to relabelling the wires
        let a = outputs(4, &[(0, 1)]);
        let b = outputs(4, &[(2, 3)]);
        let stats = Statistics::default();
        let perm = MatchingSubsumption.find_permutation(&a, &b, &stats).unwrap();
        for value in a.values() {
            let s = crate::sequence::Sequence::get_instance(4, value);
            assert!(b.contains(s.permute(&perm).unwrap().value()));
        }
    }

    #[test]
    fn test_needs_more_than_first_matching() {
        let a = outputs(6, &[(2, 5), (1, 2), (0, 3)]);
        let b = outputs(6, &[(0, 4), (3, 5)]);
        let stats = Statistics::default();
        let perm = MatchingSubsumption.find_permutation(&a, &b, &stats).unwrap();
        assert_eq!(perm.as_slice(), &[0, 3, 5, 4, 2, 1]);
        assert!(stats.snapshot().permutations_checked >= 2);
    }

    #[test]
    fn test_no_permutation_when_outputs_differ() {
        let a = outputs(4, &[(0, 1), (2, 3)]);
        let b = outputs(4, &[(0, 1)]);
        let stats = Statistics::default();
        // b has more outputs, so it can never map into a
        assert!(MatchingSubsumption.check(&b, &a, &stats).is_none());
        assert!(MatchingSubsumption.check(&a, &b, &stats).is_some());
    }
}
