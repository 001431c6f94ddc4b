//! Level-by-level orchestration of the parallel search
//!
//! Each level runs through the same phases: seed the frontier, expand every
//! parent on the pool and drain, run the final dominance pass and drain,
//! cap the survivors by output size, and hand them to the next level.

use super::candidate::pair_count;
use super::config::{Prefix, SearchConfig};
use super::context::SearchContext;
use super::monitor::Monitor;
use super::parallel::{PoolConfig, WorkerPool};
use super::progress::{Phase, Progress};
use super::result::{LevelReport, SearchResult};
use super::tasks::{expand, remove_dominated};
use crate::error::{Result, SearchError};
use crate::network::{Network, RuntimeNetwork, green_filter};
use crate::sequence::initialize_cache;
use crate::store::NetworkStore;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Drives the search from the seed level to the last configured level.
pub struct LevelSearch {
    config: SearchConfig,
    context: Arc<SearchContext>,
    pool: WorkerPool,
    store: Option<NetworkStore>,
}

impl LevelSearch {
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        initialize_cache(config.max_wires)?;
        let context = Arc::new(SearchContext::new(&config));
        let pool = WorkerPool::new(
            &PoolConfig::default()
                .with_workers(config.worker_count())
                .with_seed_option(config.seed),
        )?;
        let store = config.out_dir.clone().map(NetworkStore::new);
        info!(
            wires = config.wires,
            workers = pool.workers(),
            subsumption = context.oracle.name(),
            fitness = context.estimator.name(),
            capacity = config.capacity,
            "search configured"
        );
        Ok(LevelSearch {
            config,
            context,
            pool,
            store,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn context(&self) -> &Arc<SearchContext> {
        &self.context
    }

    pub fn progress(&self) -> &Progress {
        &self.context.progress
    }

    /// The networks the first level expands.
    pub fn seeds(&self) -> Result<Vec<Network>> {
        let wires = self.config.wires;
        match self.config.prefix {
            Prefix::GreenFilter => Ok(vec![green_filter(wires)?]),
            Prefix::None if self.config.from <= 1 => Ok(vec![Network::new(wires)?]),
            Prefix::None => {
                let store = self.store.as_ref().ok_or_else(|| {
                    SearchError::InvalidConfig(format!(
                        "starting at level {} needs an output directory holding level {}",
                        self.config.from,
                        self.config.from - 1
                    ))
                })?;
                store.read(wires, self.config.from - 1, Some(self.config.capacity))
            }
        }
    }

    /// Run every configured level.
    pub fn run(&self) -> Result<SearchResult> {
        let mut networks = self.seeds()?;
        let first_level = networks.first().map_or(self.config.from, |n| n.size() + 1);
        let last_level = self.config.last_level();
        info!(
            seeds = networks.len(),
            from = first_level,
            to = last_level,
            "starting search"
        );

        let mut monitor = self
            .config
            .monitor_interval
            .map(|interval| Monitor::spawn(Arc::clone(&self.context), interval));

        let mut result = SearchResult::default();
        for size in first_level..=last_level {
            if networks.is_empty() {
                warn!(size, "no networks left to expand");
                break;
            }
            let (next, report) = self.run_level(size, networks)?;
            if result.sorting.is_empty() && report.sorting_found {
                result.sorting = next.iter().filter(|n| n.is_sorting()).cloned().collect();
                info!(size, count = result.sorting.len(), "sorting networks found");
            }
            result.levels.push(report);
            networks = next;
        }
        self.context.progress.set_phase(Phase::Done);
        if let Some(monitor) = monitor.as_mut() {
            monitor.stop();
        }
        result.networks = networks;
        Ok(result)
    }

    /// Build level `size` from `seeds`, returning the survivors.
    pub fn run_level(&self, size: usize, seeds: Vec<Network>) -> Result<(Vec<Network>, LevelReport)> {
        let start = Instant::now();
        let ctx = &self.context;
        let wires = self.config.wires;
        ctx.statistics.reset();
        ctx.frontier.clear();
        ctx.progress
            .start_level(size, (seeds.len() * pair_count(wires)) as u64);

        ctx.progress.set_phase(Phase::Expanding);
        let parents = seeds.len();
        for parent in seeds {
            // Every first comparator is the same up to relabelling
            if parent.is_empty() && wires >= 2 {
                ctx.frontier
                    .add_network(RuntimeNetwork::new(parent.extended(0, 1)?))?;
                ctx.progress.add_checked(pair_count(wires) as u64);
                continue;
            }
            let ctx = Arc::clone(ctx);
            self.pool.submit(move |worker| {
                let added = expand(&ctx, &parent, worker.rng())?;
                debug!(worker = worker.id(), added, "expanded parent");
                Ok(())
            });
        }
        self.pool.wait()?;
        let expanded = ctx.frontier.size();
        debug!(
            size,
            parents,
            expanded,
            dead = ctx.frontier.dead_count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "expansion drained"
        );

        ctx.progress.set_phase(Phase::FinalChecking);
        let check_start = Instant::now();
        ctx.frontier.remove_all_dead();
        for net in ctx.frontier.networks() {
            let ctx = Arc::clone(ctx);
            self.pool.submit(move |_| {
                remove_dominated(&ctx, &net);
                Ok(())
            });
        }
        self.pool.wait()?;
        let removed = ctx.frontier.remove_all_dead();
        debug!(
            size,
            removed,
            elapsed_ms = check_start.elapsed().as_millis() as u64,
            "final check drained"
        );

        ctx.progress.set_phase(Phase::Trimming);
        let mut networks = ctx.frontier.join_lists();
        let trimmed = networks.len().saturating_sub(self.config.capacity);
        if trimmed > 0 {
            networks.truncate(self.config.capacity);
            info!(size, trimmed, kept = networks.len(), "trimmed frontier by output size");
        }

        ctx.progress.set_phase(Phase::Advancing);
        let sorting: Vec<&Network> = networks.iter().filter(|n| n.is_sorting()).collect();
        self.persist(size, &networks, &sorting);

        let report = LevelReport {
            size,
            networks: networks.len(),
            trimmed,
            sorting_found: !sorting.is_empty(),
            best_fitness: networks
                .iter()
                .map(|n| n.fitness(ctx.estimator.as_ref()))
                .fold(f64::INFINITY, f64::min),
            smallest_output: networks.first().map_or(0, Network::output_size),
            elapsed: start.elapsed(),
            statistics: ctx.statistics.snapshot(),
        };
        info!(
            size,
            networks = report.networks,
            smallest_output = report.smallest_output,
            best_fitness = report.best_fitness,
            sorting = sorting.len(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "level complete"
        );
        debug!("{}", report.statistics.format_summary());
        Ok((networks, report))
    }

    /// Write the level and any sorting networks; failures only warn.
    fn persist(&self, size: usize, networks: &[Network], sorting: &[&Network]) {
        let Some(store) = &self.store else {
            return;
        };
        if let Err(e) = store.write(self.config.wires, size, networks) {
            warn!(size, error = %e, "could not write networks");
        }
        for net in sorting {
            if let Err(e) = store.write_optimum(net) {
                warn!(size, error = %e, "could not write sorting network");
            }
        }
    }
}
