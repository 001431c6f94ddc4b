//! The concurrent frontier: live networks of one level, bucketed by output size
//!
//! Removal is two-step. [`Frontier::add_dead`] only flags a network and
//! stages it; the entry stays in its bucket until a compaction pass runs
//! under the exclusive side of the work lock. Readers take bucket snapshots,
//! so they may see stale dead entries but never a vector shrinking under
//! them.

use crate::error::{Result, SearchError};
use crate::network::{Network, RuntimeNetwork};
use parking_lot::{Mutex, RwLock, RwLockReadGuard};
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tracing::debug;

/// Size-bucketed container shared by every worker during a level.
#[derive(Debug)]
pub struct Frontier {
    buckets: Vec<Mutex<Vec<Arc<RuntimeNetwork>>>>,
    /// Last id handed out; ids keep growing across levels.
    next_id: Mutex<u64>,
    max_id: AtomicU64,
    size: AtomicUsize,
    /// Lowest populated bucket, `buckets.len()` when empty
    first: AtomicUsize,
    /// Highest populated bucket
    last: AtomicUsize,
    dead: Mutex<Vec<Arc<RuntimeNetwork>>>,
    capacity: usize,
    work_lock: RwLock<()>,
    cleanup_lock: Mutex<()>,
}

impl Frontier {
    /// A frontier accepting output sizes `0..=max_out_size`.
    pub fn new(max_out_size: usize, capacity: usize) -> Self {
        let buckets = (0..=max_out_size).map(|_| Mutex::new(Vec::new())).collect::<Vec<_>>();
        Frontier {
            first: AtomicUsize::new(buckets.len()),
            buckets,
            next_id: Mutex::new(0),
            max_id: AtomicU64::new(0),
            size: AtomicUsize::new(0),
            last: AtomicUsize::new(0),
            dead: Mutex::new(Vec::new()),
            capacity,
            work_lock: RwLock::new(()),
            cleanup_lock: Mutex::new(()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn max_out_size(&self) -> usize {
        self.buckets.len() - 1
    }

    /// Entries in the buckets, dead or alive
    pub fn size(&self) -> usize {
        self.size.load(Ordering::SeqCst)
    }

    pub fn dead_count(&self) -> usize {
        self.dead.lock().len()
    }

    pub fn alive_size(&self) -> usize {
        self.size().saturating_sub(self.dead_count())
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// The live count has reached capacity.
    pub fn is_full(&self) -> bool {
        self.alive_size() >= self.capacity
    }

    /// Evictions allowed before the live count drops back to capacity.
    pub fn kill_limit(&self) -> usize {
        self.alive_size().saturating_sub(self.capacity)
    }

    pub fn first(&self) -> usize {
        self.first.load(Ordering::SeqCst)
    }

    pub fn last(&self) -> usize {
        self.last.load(Ordering::SeqCst)
    }

    /// Highest id of any network currently inserted.
    pub fn max_id(&self) -> u64 {
        self.max_id.load(Ordering::SeqCst)
    }

    /// Shared side of the work lock, held while scanning buckets.
    ///
    /// Must not be held across [`Frontier::add_network`] or compaction.
    pub fn read(&self) -> RwLockReadGuard<'_, ()> {
        self.work_lock.read()
    }

    /// Snapshot of one bucket; empty for an index past the range.
    pub fn bucket(&self, out_size: usize) -> Vec<Arc<RuntimeNetwork>> {
        self.buckets
            .get(out_size)
            .map(|b| b.lock().clone())
            .unwrap_or_default()
    }

    /// Empty every bucket for the next level.
    pub fn clear(&self) {
        let _guard = self.work_lock.write();
        for bucket in &self.buckets {
            bucket.lock().clear();
        }
        self.dead.lock().clear();
        self.size.store(0, Ordering::SeqCst);
        self.max_id.store(0, Ordering::SeqCst);
        self.first.store(self.buckets.len(), Ordering::SeqCst);
        self.last.store(0, Ordering::SeqCst);
    }

    /// Assign a fresh id and insert into the bucket for the network's output size.
    pub fn add_network(&self, mut net: RuntimeNetwork) -> Result<Arc<RuntimeNetwork>> {
        let out_size = net.out_size();
        if out_size >= self.buckets.len() {
            return Err(SearchError::FrontierCapacity {
                out_size,
                max: self.max_out_size(),
            });
        }
        let _guard = self.work_lock.read();
        // Everything up to max_id is in its bucket once max_id is visible
        let mut next_id = self.next_id.lock();
        *next_id += 1;
        net.id = *next_id;
        let net = Arc::new(net);
        self.buckets[out_size].lock().push(Arc::clone(&net));
        self.size.fetch_add(1, Ordering::SeqCst);
        self.first.fetch_min(out_size, Ordering::SeqCst);
        self.last.fetch_max(out_size, Ordering::SeqCst);
        self.max_id.fetch_max(net.id(), Ordering::SeqCst);
        Ok(net)
    }

    /// Stage a network for removal; false if it was already dead.
    pub fn add_dead(&self, net: &Arc<RuntimeNetwork>) -> bool {
        let mut dead = self.dead.lock();
        if !net.mark_dead() {
            return false;
        }
        dead.push(Arc::clone(net));
        true
    }

    /// Stage `victim` for removal unless `killer` died first.
    ///
    /// Checked under the staging lock, so two equivalent networks cannot
    /// remove each other.
    pub fn add_dead_by(&self, killer: &RuntimeNetwork, victim: &Arc<RuntimeNetwork>) -> bool {
        let mut dead = self.dead.lock();
        if killer.is_dead() || !victim.mark_dead() {
            return false;
        }
        dead.push(Arc::clone(victim));
        true
    }

    /// Drop every staged network from its bucket. Returns how many went.
    pub fn remove_all_dead(&self) -> usize {
        let _guard = self.work_lock.write();
        self.compact()
    }

    /// Compact if more than `threshold` networks are staged and no other
    /// worker is compacting already.
    pub fn try_compact(&self, threshold: usize) -> bool {
        if self.dead_count() <= threshold {
            return false;
        }
        let Some(_cleanup) = self.cleanup_lock.try_lock() else {
            return false;
        };
        let _guard = self.work_lock.write();
        let removed = self.compact();
        debug!(removed, "compacted frontier");
        true
    }

    /// Caller holds the work lock exclusively.
    fn compact(&self) -> usize {
        let staged = std::mem::take(&mut *self.dead.lock());
        if staged.is_empty() {
            return 0;
        }
        let ids: HashSet<u64> = staged.iter().map(|n| n.id()).collect();
        let mut touched: Vec<usize> = staged.iter().map(|n| n.out_size()).collect();
        touched.sort_unstable();
        touched.dedup();

        let mut removed = 0;
        for index in touched {
            let mut bucket = self.buckets[index].lock();
            let before = bucket.len();
            bucket.retain(|n| !ids.contains(&n.id()));
            removed += before - bucket.len();
        }
        self.size.fetch_sub(removed, Ordering::SeqCst);

        let len = self.buckets.len();
        let mut first = self.first();
        while first < len && self.buckets[first].lock().is_empty() {
            first += 1;
        }
        let mut last = self.last().min(len - 1);
        while last > 0 && self.buckets[last].lock().is_empty() {
            last -= 1;
        }
        self.first.store(first, Ordering::SeqCst);
        self.last.store(last, Ordering::SeqCst);
        removed
    }

    /// Every live entry, smallest output size first.
    pub fn networks(&self) -> Vec<Arc<RuntimeNetwork>> {
        let (first, last) = (self.first(), self.last());
        (first..=last)
            .flat_map(|i| self.bucket(i))
            .filter(|n| !n.is_dead())
            .collect()
    }

    /// Copies of the live networks, smallest output size first, for the next level.
    pub fn join_lists(&self) -> Vec<Network> {
        self.networks().iter().map(|n| n.network().clone()).collect()
    }

    /// Populated bucket sizes, `(output size, entries)`.
    pub fn occupancy(&self) -> Vec<(usize, usize)> {
        (self.first()..=self.last())
            .filter_map(|i| {
                let count = self.buckets[i].lock().len();
                (count > 0).then_some((i, count))
            })
            .collect()
    }
}
