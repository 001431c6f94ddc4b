use sortnet_search::network::Network;
use sortnet_search::output::OutputSet;
use sortnet_search::search::Statistics;
use sortnet_search::subsumption::{
    BipartiteSubsumption, CandidateGraph, MatchingSubsumption, Subsumption, SubsumptionKind,
};

fn outputs(wires: usize, pairs: &[(usize, usize)]) -> OutputSet {
    Network::from_pairs(wires, pairs).unwrap().output_set().clone()
}

#[test]
fn test_identical_outputs_give_identity() {
    let a = outputs(4, &[(0, 1), (2, 3), (1, 3)]);
    let b = outputs(4, &[(0, 1), (2, 3), (1, 3)]);
    for kind in [SubsumptionKind::Matching, SubsumptionKind::Bipartite] {
        let stats = Statistics::default();
        let perm = kind.build().check(&a, &b, &stats).unwrap();
        assert!(perm.is_identity(), "{kind} returned {:?}", perm.as_slice());
        assert_eq!(stats.snapshot().output_inclusions, 1);
        assert_eq!(stats.snapshot().permutations_checked, 0);
    }
}

#[test]
fn test_wire_without_candidates_skips_matching() {
    // Every level-1 output of `a` puts a 0 and a 1 on each wire; `b` has only 001.
    let a = OutputSet::from_values(3, [0b000, 0b001, 0b010, 0b100, 0b111]).unwrap();
    let b = OutputSet::from_values(3, [0b000, 0b001, 0b011, 0b101, 0b111]).unwrap();
    let graph = CandidateGraph::build(&a, &b);
    assert!(graph.has_isolated_vertex());

    let oracles: [&dyn Subsumption; 2] = [&MatchingSubsumption, &BipartiteSubsumption];
    for oracle in oracles {
        let stats = Statistics::default();
        assert!(oracle.find_permutation(&a, &b, &stats).is_none());
        let snap = stats.snapshot();
        assert_eq!(snap.empty_edge_rejections, 1);
        assert_eq!(snap.permutations_checked, 0);
    }
}

#[test]
fn test_strategies_agree() {
    let nets = [
        outputs(5, &[(0, 1)]),
        outputs(5, &[(3, 4)]),
        outputs(5, &[(0, 1), (2, 3)]),
        outputs(5, &[(1, 2), (3, 4)]),
        outputs(5, &[(0, 4), (1, 3)]),
        outputs(5, &[(0, 1), (1, 2)]),
        outputs(5, &[(2, 3), (3, 4)]),
    ];
    let stats = Statistics::default();
    for a in &nets {
        for b in &nets {
            let m = MatchingSubsumption.check(a, b, &stats).is_some();
            let p = BipartiteSubsumption.check(a, b, &stats).is_some();
            assert_eq!(m, p);
        }
    }
}

#[test]
fn test_unknown_strategy_name() {
    let err = "SubsumptionMagic".parse::<SubsumptionKind>().unwrap_err();
    assert!(err.to_string().contains("SubsumptionMagic"));
    assert_eq!(
        "SubsumptionBipartiteMatching".parse::<SubsumptionKind>().unwrap(),
        SubsumptionKind::Bipartite
    );
}
