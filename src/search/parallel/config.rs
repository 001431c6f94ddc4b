//! Configuration for the worker pool.

use std::time::Duration;

/// Configuration for the work-stealing pool.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Number of worker threads to spawn.
    pub num_workers: usize,
    /// Random peers an idle worker tries before sweeping every queue.
    pub steal_attempts: usize,
    /// Base random seed (workers get seed + worker_id).
    pub base_seed: Option<u64>,
    /// Longest an idle worker sleeps before looking for work again.
    pub idle_wait: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            num_workers: num_cpus::get(),
            steal_attempts: 4,
            base_seed: None,
            idle_wait: Duration::from_millis(1),
        }
    }
}

impl PoolConfig {
    /// Set the number of workers; at least one is always spawned.
    pub fn with_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers.max(1);
        self
    }

    pub fn with_steal_attempts(mut self, attempts: usize) -> Self {
        self.steal_attempts = attempts;
        self
    }

    /// Set the base random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.base_seed = Some(seed);
        self
    }

    /// Set the base random seed from an Option.
    pub fn with_seed_option(mut self, seed: Option<u64>) -> Self {
        self.base_seed = seed;
        self
    }

    pub fn with_idle_wait(mut self, wait: Duration) -> Self {
        self.idle_wait = wait;
        self
    }
}
