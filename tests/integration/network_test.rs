use sortnet_search::network::{Network, RedundancyReason, known_instance, optimal_size};

#[test]
fn test_three_wire_sorter_by_hand() {
    let mut net = Network::new(3).unwrap();
    net.add_comparator(0, 1).unwrap();
    assert!(!net.is_sorting());
    net.add_comparator(1, 2).unwrap();
    assert!(!net.is_sorting());
    net.add_comparator(0, 1).unwrap();

    assert!(net.is_sorting());
    assert_eq!(net.size(), 3);
    assert_eq!(net.output_size(), 4);
    assert_eq!(Some(net.size()), optimal_size(3));
}

#[test]
fn test_repeated_pair_is_redundant() {
    let net = Network::from_pairs(3, &[(0, 1)]).unwrap();
    assert!(net.is_redundant(0, 1));
    assert_eq!(net.redundancy(0, 1), Some(RedundancyReason::Duplicate));
    assert!(!net.is_redundant(1, 2));
}

#[test]
fn test_known_instances_sort() {
    for wires in 6..=8 {
        let net = known_instance(wires).unwrap().unwrap();
        assert_eq!(Some(net.size()), optimal_size(wires));
        assert!(net.is_sorting(), "{wires}-wire instance does not sort");
        assert_eq!(net.output_size(), wires + 1);
    }
    assert!(known_instance(5).is_none());
}

#[test]
fn test_sorting_network_sorts_values() {
    let net = known_instance(6).unwrap().unwrap();
    let sorted = net.apply_values(&[5, -1, 3, 3, 9, 0]).unwrap();
    assert_eq!(sorted, vec![-1, 0, 3, 3, 5, 9]);
}
