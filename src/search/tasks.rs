//! Per-network units of work scheduled on the pool
//!
//! An expansion task offers every useful child of one parent to the
//! frontier. A removal task, run after all expansions have drained, compares
//! one network with the peers its expansion never saw.

use super::acceptance::{should_drop_child, should_evict_peer};
use super::candidate::{Candidate, candidates, pair_count};
use super::context::SearchContext;
use crate::error::Result;
use crate::network::{Network, RedundancyReason, RuntimeNetwork};
use crate::search::result::bump;
use rand::Rng;
use std::sync::Arc;

/// Expand `parent` by one comparator; returns the number of children inserted.
pub fn expand<R: Rng + ?Sized>(ctx: &SearchContext, parent: &Network, rng: &mut R) -> Result<usize> {
    let stats = &ctx.statistics;
    if parent.is_sorting() {
        ctx.progress.add_checked(pair_count(parent.wires()) as u64);
        return Ok(0);
    }

    let mut added = 0;
    for candidate in candidates(parent) {
        ctx.progress.add_checked(1);
        let (i, j) = match candidate {
            Candidate::Useful(i, j) => (i, j),
            Candidate::Redundant(RedundancyReason::Duplicate) => {
                bump(&stats.redundant_duplicates);
                continue;
            }
            Candidate::Redundant(RedundancyReason::SortedOutput) => {
                bump(&stats.redundant_sorted);
                continue;
            }
        };

        let mut child = RuntimeNetwork::new(parent.extended(i, j)?);
        if is_subsumed(ctx, &mut child, rng) {
            continue;
        }
        remove_subsumed(ctx, &mut child, rng);
        ctx.frontier.add_network(child)?;
        added += 1;
        ctx.frontier.try_compact(ctx.compaction_threshold);
    }
    Ok(added)
}

/// Whether a frontier member already dominates `child`, or outranks it
/// under the capacity rule.
///
/// Scans buckets up to the child's own output size. On a full scan with
/// dominance enabled, records the highest id the child was checked against.
pub fn is_subsumed<R: Rng + ?Sized>(ctx: &SearchContext, child: &mut RuntimeNetwork, rng: &mut R) -> bool {
    let frontier = &ctx.frontier;
    let full = frontier.is_full();
    if !ctx.expansion_subsumption && !full {
        return false;
    }

    let watermark = frontier.max_id();
    let fitness = child.network().fitness(ctx.estimator.as_ref());
    {
        let _guard = frontier.read();
        let last = child.out_size().min(frontier.last());
        for size in frontier.first()..=last {
            for other in frontier.bucket(size) {
                if other.is_dead() {
                    continue;
                }
                if ctx.expansion_subsumption && other.subsumes(child, ctx.oracle.as_ref(), &ctx.statistics) {
                    bump(&ctx.statistics.children_dominated);
                    return true;
                }
                if full && should_drop_child(rng, fitness, other.network().fitness(ctx.estimator.as_ref())) {
                    bump(&ctx.statistics.children_evicted);
                    return true;
                }
            }
        }
    }
    if ctx.expansion_subsumption {
        child.checked_subsumed_by_id = watermark;
    }
    false
}

/// Kill the frontier members with larger output sets that `child` dominates,
/// and, past capacity, evict worse-scoring ones at random.
pub fn remove_subsumed<R: Rng + ?Sized>(ctx: &SearchContext, child: &mut RuntimeNetwork, rng: &mut R) {
    let frontier = &ctx.frontier;
    let watermark = frontier.max_id();
    let kill_limit = frontier.kill_limit();
    let mut kills = 0;
    let fitness = child.network().fitness(ctx.estimator.as_ref());
    {
        let _guard = frontier.read();
        for size in child.out_size() + 1..=frontier.last() {
            for other in frontier.bucket(size) {
                if other.is_dead() {
                    continue;
                }
                if ctx.expansion_subsumption && child.subsumes(&other, ctx.oracle.as_ref(), &ctx.statistics) {
                    if frontier.add_dead(&other) {
                        bump(&ctx.statistics.peers_dominated);
                    }
                    continue;
                }
                if kills < kill_limit
                    && frontier.is_full()
                    && should_evict_peer(rng, fitness, other.network().fitness(ctx.estimator.as_ref()))
                    && frontier.add_dead(&other)
                {
                    kills += 1;
                    bump(&ctx.statistics.peers_evicted);
                }
            }
        }
    }
    if ctx.expansion_subsumption {
        child.checked_subsumes_id = watermark;
    }
}

/// Final-pass removal: mark dead every live peer of equal or larger output
/// size that `net` dominates and that no expansion already compared.
///
/// Stops as soon as `net` itself is found dead.
pub fn remove_dominated(ctx: &SearchContext, net: &Arc<RuntimeNetwork>) -> usize {
    if net.is_dead() {
        return 0;
    }
    let frontier = &ctx.frontier;
    let _guard = frontier.read();
    let mut removed = 0;
    for size in net.out_size()..=frontier.last() {
        for other in frontier.bucket(size) {
            if net.is_dead() {
                return removed;
            }
            if Arc::ptr_eq(&other, net)
                || other.is_dead()
                || other.id() <= net.checked_subsumes_id()
                || net.id() <= other.checked_subsumed_by_id()
            {
                continue;
            }
            if net.subsumes(&other, ctx.oracle.as_ref(), &ctx.statistics) && frontier.add_dead_by(net, &other) {
                bump(&ctx.statistics.peers_dominated);
                removed += 1;
            }
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::config::SearchConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn context(wires: usize) -> SearchContext {
        SearchContext::new(&SearchConfig::new(wires))
    }

    fn net(wires: usize, pairs: &[(usize, usize)]) -> Network {
        Network::from_pairs(wires, pairs).unwrap()
    }

    #[test]
    fn test_expand_empty_three_wire_network() {
        let ctx = context(3);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let added = expand(&ctx, &net(3, &[]), &mut rng).unwrap();
        // (0,1), (0,2) and (1,2) are equivalent; only the first survives
        assert_eq!(added, 1);
        assert_eq!(ctx.progress.checked(), 3);
        let snap = ctx.statistics.snapshot();
        assert_eq!(snap.children_dominated, 2);
        assert_eq!(ctx.frontier.networks().len(), 1);
    }

    #[test]
    fn test_expand_counts_redundancy() {
        let ctx = context(3);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        expand(&ctx, &net(3, &[(0, 1)]), &mut rng).unwrap();
        assert_eq!(ctx.statistics.snapshot().redundant_duplicates, 1);
        assert_eq!(ctx.progress.checked(), 3);
    }

    #[test]
    fn test_sorting_parent_has_no_children() {
        let ctx = context(3);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let added = expand(&ctx, &net(3, &[(0, 1), (1, 2), (0, 1)]), &mut rng).unwrap();
        assert_eq!(added, 0);
        assert!(ctx.frontier.is_empty());
        assert_eq!(ctx.progress.checked(), 3);
    }

    #[test]
    fn test_child_kills_dominated_peer() {
        let ctx = context(4);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let weak = ctx
            .frontier
            .add_network(RuntimeNetwork::new(net(4, &[(0, 1)])))
            .unwrap();
        let mut child = RuntimeNetwork::new(net(4, &[(0, 1), (2, 3)]));
        assert!(!is_subsumed(&ctx, &mut child, &mut rng));
        remove_subsumed(&ctx, &mut child, &mut rng);
        assert!(weak.is_dead());
        assert_eq!(child.checked_subsumes_id(), weak.id());
        assert_eq!(ctx.statistics.snapshot().peers_dominated, 1);
    }

    #[test]
    fn test_watermarks_untouched_without_dominance() {
        let ctx = SearchContext::new(&SearchConfig::new(4).with_expansion_subsumption(false));
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let weak = ctx
            .frontier
            .add_network(RuntimeNetwork::new(net(4, &[(0, 1)])))
            .unwrap();
        let mut child = RuntimeNetwork::new(net(4, &[(0, 1), (2, 3)]));
        assert!(!is_subsumed(&ctx, &mut child, &mut rng));
        remove_subsumed(&ctx, &mut child, &mut rng);
        assert!(!weak.is_dead());
        assert_eq!(child.checked_subsumed_by_id(), 0);
        assert_eq!(child.checked_subsumes_id(), 0);
    }

    #[test]
    fn test_final_pass_removes_one_of_two_equivalent() {
        let ctx = SearchContext::new(&SearchConfig::new(4).with_expansion_subsumption(false));
        let a = ctx
            .frontier
            .add_network(RuntimeNetwork::new(net(4, &[(0, 1)])))
            .unwrap();
        let b = ctx
            .frontier
            .add_network(RuntimeNetwork::new(net(4, &[(2, 3)])))
            .unwrap();
        let removed = remove_dominated(&ctx, &a) + remove_dominated(&ctx, &b);
        assert_eq!(removed, 1);
        assert!(!a.is_dead());
        assert!(b.is_dead());
        assert_eq!(ctx.frontier.remove_all_dead(), 1);
        assert_eq!(ctx.frontier.size(), 1);
    }
}
