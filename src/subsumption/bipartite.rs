//! Plain depth-first enumeration of perfect matchings

use super::graph::CandidateGraph;
use super::{Subsumption, check_permutation};
use crate::output::OutputSet;
use crate::search::Statistics;
use crate::search::result::bump;
use crate::sequence::Permutation;

/// Tries every perfect matching of the candidate graph in lexicographic order.
///
/// Slower than [`super::MatchingSubsumption`] on wide graphs but useful as a
/// cross-check.
#[derive(Debug, Clone, Copy, Default)]
pub struct BipartiteSubsumption;

impl Subsumption for BipartiteSubsumption {
    fn name(&self) -> &'static str {
        "SubsumptionBipartiteMatching"
    }

    fn find_permutation(&self, a: &OutputSet, b: &OutputSet, stats: &Statistics) -> Option<Permutation> {
        let graph = CandidateGraph::build(a, b);
        if graph.has_isolated_vertex() {
            bump(&stats.empty_edge_rejections);
            return None;
        }
        if graph.perfect_matching().is_none() {
            bump(&stats.exhausted_searches);
            return None;
        }
        let mut assignment = vec![0; graph.len()];
        let found = enumerate(&graph, 0, 0, &mut assignment, &mut |perm: &[usize]| {
            check_permutation(a, b, perm, stats)
        });
        if found {
            Some(Permutation::from_matching(assignment))
        } else {
            bump(&stats.exhausted_searches);
            None
        }
    }
}

/// Assign left vertices from `u` on; stops as soon as `accept` says yes,
/// leaving the accepted matching in `assignment`.
fn enumerate(
    graph: &CandidateGraph,
    u: usize,
    used: u32,
    assignment: &mut [usize],
    accept: &mut dyn FnMut(&[usize]) -> bool,
) -> bool {
    if u == graph.len() {
        return accept(assignment);
    }
    for v in 0..graph.len() {
        if graph.has_edge(u, v) && used & (1 << v) == 0 {
            assignment[u] = v;
            if enumerate(graph, u + 1, used | (1 << v), assignment, accept) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Network;
    use crate::subsumption::MatchingSubsumption;

    fn outputs(wires: usize, pairs: &[(usize, usize)]) -> OutputSet {
        Network::from_pairs(wires, pairs).unwrap().output_set().clone()
    }

    #[test]
    fn test_enumerates_all_matchings() {
        let g = CandidateGraph::from_rows(3, vec![0b111; 3]);
        let mut seen = Vec::new();
        let found = enumerate(&g, 0, 0, &mut vec![0; 3], &mut |m: &[usize]| {
            seen.push(m.to_vec());
            false
        });
        assert!(!found);
        assert_eq!(seen.len(), 6);
        assert_eq!(seen[0], vec![0, 1, 2]);
    }

    #[test]
    fn test_agrees_with_cycle_exchange() {
        let cases: [(&[(usize, usize)], &[(usize, usize)]); 3] = [
            (&[(2, 5), (1, 2), (0, 3)], &[(0, 4), (3, 5)]),
            (&[(0, 1), (2, 3), (3, 5)], &[(1, 5)]),
            (&[(0, 1), (2, 3)], &[(0, 2), (1, 3)]),
        ];
        for (pa, pb) in cases {
            let a = outputs(6, pa);
            let b = outputs(6, pb);
            let stats = Statistics::default();
            let x = BipartiteSubsumption.find_permutation(&a, &b, &stats).is_some();
            let y = MatchingSubsumption.find_permutation(&a, &b, &stats).is_some();
            assert_eq!(x, y, "{pa:?} vs {pb:?}");
        }
    }
}
