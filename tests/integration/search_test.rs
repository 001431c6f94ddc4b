use sortnet_search::error::SearchError;
use sortnet_search::fitness::FitnessKind;
use sortnet_search::network::{Network, RuntimeNetwork};
use sortnet_search::search::{
    Frontier, GreedySearch, LevelSearch, Phase, PoolConfig, SearchConfig, WorkerPool,
};
use sortnet_search::subsumption::SubsumptionKind;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn level_search(wires: usize, to: usize, threads: usize) -> LevelSearch {
    LevelSearch::new(
        SearchConfig::new(wires)
            .with_range(1, to)
            .with_threads(threads)
            .with_seed(11),
    )
    .unwrap()
}

#[test]
fn test_level_search_three_wires() {
    let result = level_search(3, 3, 2).run().unwrap();
    assert_eq!(result.best_size(), Some(3));
    for net in result.sorting_networks() {
        assert!(net.is_sorting());
        assert_eq!(net.output_size(), 4);
    }
}

#[test]
fn test_level_search_four_wires() {
    let search = level_search(4, 5, 4);
    let result = search.run().unwrap();
    assert_eq!(result.levels.len(), 5);
    assert_eq!(result.best_size(), Some(5));
    assert!(result.levels[..4].iter().all(|l| !l.sorting_found));
    assert!(result.levels[4].sorting_found);
    assert_eq!(search.progress().phase(), Phase::Done);
}

#[test]
fn test_level_search_without_expansion_subsumption() {
    let search = LevelSearch::new(
        SearchConfig::new(4)
            .with_range(1, 5)
            .with_threads(2)
            .with_expansion_subsumption(false)
            .with_seed(5),
    )
    .unwrap();
    let result = search.run().unwrap();
    assert_eq!(result.best_size(), Some(5));
}

#[test]
fn test_levels_are_sorted_by_output_size() {
    let result = level_search(4, 3, 2).run().unwrap();
    let sizes: Vec<usize> = result.networks.iter().map(Network::output_size).collect();
    assert!(sizes.windows(2).all(|w| w[0] <= w[1]));
    assert!(result.networks.iter().all(|n| n.size() == 3));
}

#[test]
fn test_capacity_trims_level() {
    let search = LevelSearch::new(
        SearchConfig::new(5)
            .with_range(1, 3)
            .with_threads(2)
            .with_capacity(2)
            .with_seed(2),
    )
    .unwrap();
    let result = search.run().unwrap();
    assert!(result.networks.len() <= 2);
    assert!(result.levels.iter().all(|l| l.networks <= 2));
}

#[test]
fn test_invalid_config_rejected() {
    let err = LevelSearch::new(SearchConfig::new(4).with_capacity(0)).err().unwrap();
    assert!(matches!(err, SearchError::InvalidConfig(_)));
}

#[test]
fn test_frontier_ids_visible_in_buckets() {
    let frontier = Arc::new(Frontier::new(1 << 4, 1000));
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let frontier = Arc::clone(&frontier);
            std::thread::spawn(move || {
                for k in 0..50 {
                    let (i, j) = [(0, 1), (1, 2), (2, 3), (0, 3)][(t + k) % 4];
                    let net = Network::from_pairs(4, &[(i, j)]).unwrap();
                    frontier.add_network(RuntimeNetwork::new(net)).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(frontier.size(), 200);
    assert_eq!(frontier.max_id(), 200);
    let mut ids: Vec<u64> = frontier.networks().iter().map(|n| n.id()).collect();
    ids.sort_unstable();
    assert_eq!(ids, (1..=200).collect::<Vec<u64>>());
    assert_eq!(frontier.first(), 12);
    assert_eq!(frontier.last(), 12);
}

#[test]
fn test_pool_wait_drains_nested_work() {
    let pool = WorkerPool::new(&PoolConfig::default().with_workers(3).with_seed(1)).unwrap();
    let counter = Arc::new(AtomicUsize::new(0));
    for _ in 0..20 {
        let counter = Arc::clone(&counter);
        pool.submit(move |worker| {
            for _ in 0..5 {
                let counter = Arc::clone(&counter);
                worker.submit(move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                });
            }
            Ok(())
        });
    }
    pool.wait().unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 100);
    assert_eq!(pool.in_flight(), 0);
}

#[test]
fn test_greedy_four_wires() {
    let mut search = GreedySearch::new(SubsumptionKind::Bipartite, FitnessKind::BadPosCount, 50, Some(4));
    let start = Network::new(4).unwrap();
    let last = search.generate(&start, 5).unwrap();
    assert!(!last.is_empty());
    assert!(last.len() <= 50);
    assert!(last.iter().all(|n| n.size() == 5));
    assert!(last.iter().any(Network::is_sorting));
}
