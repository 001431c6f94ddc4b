use sortnet_search::network::Network;
use sortnet_search::search::{LevelSearch, SearchConfig};
use sortnet_search::store::NetworkStore;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_store_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = NetworkStore::new(dir.path());
    let nets = vec![
        Network::from_pairs(4, &[(0, 1), (2, 3)]).unwrap(),
        Network::from_pairs(4, &[(0, 1), (1, 2)]).unwrap(),
    ];
    let path = store.write(4, 2, &nets).unwrap();
    assert_eq!(path, dir.path().join("networks_4-2.txt"));

    let back = store.read(4, 2, None).unwrap();
    assert_eq!(back.len(), 2);
    for (a, b) in nets.iter().zip(&back) {
        assert_eq!(a.to_string(), b.to_string());
        assert_eq!(a.output_size(), b.output_size());
    }
    assert_eq!(store.read(4, 2, Some(1)).unwrap().len(), 1);
    assert!(store.read(4, 7, None).unwrap().is_empty());
}

#[test]
fn test_search_persists_and_resumes() {
    let dir = TempDir::new().unwrap();
    let first = LevelSearch::new(
        SearchConfig::new(4)
            .with_range(1, 3)
            .with_threads(2)
            .with_seed(8)
            .with_out_dir(dir.path()),
    )
    .unwrap();
    let partial = first.run().unwrap();
    assert!(!partial.found_sorting());
    for size in 1..=3 {
        assert!(dir.path().join(format!("networks_4-{size}.txt")).exists());
    }

    let resumed = LevelSearch::new(
        SearchConfig::new(4)
            .with_range(4, 5)
            .with_threads(2)
            .with_seed(8)
            .with_out_dir(dir.path()),
    )
    .unwrap();
    assert_eq!(resumed.seeds().unwrap().len(), partial.networks.len());
    let result = resumed.run().unwrap();
    assert_eq!(result.levels.len(), 2);
    assert_eq!(result.best_size(), Some(5));

    let optimum = fs::read_to_string(dir.path().join("optimum_4-5.txt")).unwrap();
    assert_eq!(optimum.lines().count(), result.sorting.len());
}
