//! Work-stealing worker pool.
//!
//! Every worker owns a deque. A worker pops its own deque from the back and
//! steals from the front of a peer's, so a victim and its thieves work on
//! opposite ends. Workers that find nothing park on a condition variable
//! until a submission wakes them or the idle wait runs out.

use super::channel::{TaskFailure, failure_channel, panic_message};
use super::config::PoolConfig;
use crate::error::Result;
use crossbeam_channel::{Receiver, Sender};
use parking_lot::{Condvar, Mutex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, error};

/// A unit of work; an `Err` or a panic is reported through [`WorkerPool::wait`].
pub type Task = Box<dyn FnOnce(&mut WorkerContext) -> Result<()> + Send + 'static>;

struct Shared {
    queues: Vec<Mutex<VecDeque<Task>>>,
    /// Tasks sitting in some queue
    queued: AtomicUsize,
    /// Tasks submitted and not yet finished
    in_flight: AtomicUsize,
    next_queue: AtomicUsize,
    shutdown: AtomicBool,
    idle_lock: Mutex<()>,
    idle: Condvar,
    done_lock: Mutex<()>,
    done: Condvar,
    failures: Sender<TaskFailure>,
    steal_attempts: usize,
    idle_wait: Duration,
}

impl Shared {
    fn push(&self, queue: usize, task: Task) {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.queued.fetch_add(1, Ordering::SeqCst);
        self.queues[queue].lock().push_back(task);
        let _guard = self.idle_lock.lock();
        self.idle.notify_one();
    }

    fn pop_own(&self, id: usize) -> Option<Task> {
        let task = self.queues[id].lock().pop_back();
        if task.is_some() {
            self.queued.fetch_sub(1, Ordering::SeqCst);
        }
        task
    }

    fn steal(&self, victim: usize) -> Option<Task> {
        let task = self.queues[victim].lock().pop_front();
        if task.is_some() {
            self.queued.fetch_sub(1, Ordering::SeqCst);
        }
        task
    }

    fn find_task(&self, id: usize, rng: &mut ChaCha8Rng) -> Option<Task> {
        if let Some(task) = self.pop_own(id) {
            return Some(task);
        }
        let n = self.queues.len();
        if n > 1 {
            for _ in 0..self.steal_attempts {
                let victim = rng.random_range(0..n);
                if victim != id
                    && let Some(task) = self.steal(victim)
                {
                    return Some(task);
                }
            }
        }
        // Random probes missed; sweep every peer once if anything is queued
        if self.queued.load(Ordering::SeqCst) > 0 {
            for offset in 1..n {
                if let Some(task) = self.steal((id + offset) % n) {
                    return Some(task);
                }
            }
        }
        None
    }

    fn finish(&self) {
        if self.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
            let _guard = self.done_lock.lock();
            self.done.notify_all();
        }
    }
}

/// What a running task can see of its worker.
pub struct WorkerContext {
    id: usize,
    rng: ChaCha8Rng,
    shared: Arc<Shared>,
}

impl WorkerContext {
    pub fn id(&self) -> usize {
        self.id
    }

    /// This worker's random stream, seeded from the pool's base seed plus the worker id.
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Queue a follow-up task on this worker's own deque.
    pub fn submit<F>(&self, task: F)
    where
        F: FnOnce(&mut WorkerContext) -> Result<()> + Send + 'static,
    {
        self.shared.push(self.id, Box::new(task));
    }
}

fn worker_loop(mut ctx: WorkerContext) {
    let shared = Arc::clone(&ctx.shared);
    while !shared.shutdown.load(Ordering::SeqCst) {
        match shared.find_task(ctx.id, &mut ctx.rng) {
            Some(task) => run_task(&shared, &mut ctx, task),
            None => {
                let mut guard = shared.idle_lock.lock();
                if shared.queued.load(Ordering::SeqCst) == 0 && !shared.shutdown.load(Ordering::SeqCst) {
                    shared.idle.wait_for(&mut guard, shared.idle_wait);
                }
            }
        }
    }
}

fn run_task(shared: &Shared, ctx: &mut WorkerContext, task: Task) {
    let outcome = catch_unwind(AssertUnwindSafe(|| task(ctx)));
    let failure = match outcome {
        Ok(Ok(())) => None,
        Ok(Err(e)) => Some(e.to_string()),
        Err(payload) => Some(panic_message(payload.as_ref())),
    };
    if let Some(message) = failure {
        error!(worker = ctx.id, %message, "task failed");
        let _ = shared.failures.send(TaskFailure {
            worker: ctx.id,
            message,
        });
    }
    shared.finish();
}

/// Fixed set of worker threads fed through per-worker deques.
pub struct WorkerPool {
    shared: Arc<Shared>,
    handles: Vec<JoinHandle<()>>,
    failures: Receiver<TaskFailure>,
}

impl WorkerPool {
    pub fn new(config: &PoolConfig) -> Result<Self> {
        let workers = config.num_workers.max(1);
        let (tx, rx) = failure_channel();
        let shared = Arc::new(Shared {
            queues: (0..workers).map(|_| Mutex::new(VecDeque::new())).collect(),
            queued: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            next_queue: AtomicUsize::new(0),
            shutdown: AtomicBool::new(false),
            idle_lock: Mutex::new(()),
            idle: Condvar::new(),
            done_lock: Mutex::new(()),
            done: Condvar::new(),
            failures: tx,
            steal_attempts: config.steal_attempts,
            idle_wait: config.idle_wait,
        });

        // Already-spawned workers are joined by Drop if a later spawn fails
        let mut pool = WorkerPool {
            shared,
            handles: Vec::with_capacity(workers),
            failures: rx,
        };
        for id in 0..workers {
            let rng = match config.base_seed {
                Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(id as u64)),
                None => ChaCha8Rng::from_os_rng(),
            };
            let ctx = WorkerContext {
                id,
                rng,
                shared: Arc::clone(&pool.shared),
            };
            let handle = std::thread::Builder::new()
                .name(format!("sortnet-worker-{id}"))
                .spawn(move || worker_loop(ctx))?;
            pool.handles.push(handle);
        }
        debug!(workers, "worker pool started");
        Ok(pool)
    }

    pub fn workers(&self) -> usize {
        self.shared.queues.len()
    }

    /// Queue a task on the next worker in round-robin order.
    pub fn submit<F>(&self, task: F)
    where
        F: FnOnce(&mut WorkerContext) -> Result<()> + Send + 'static,
    {
        let queue = self.shared.next_queue.fetch_add(1, Ordering::Relaxed) % self.workers();
        self.shared.push(queue, Box::new(task));
    }

    pub fn in_flight(&self) -> usize {
        self.shared.in_flight.load(Ordering::SeqCst)
    }

    /// Block until every submitted task, including tasks they submitted, has finished.
    ///
    /// Returns the first failure reported since the previous `wait`.
    pub fn wait(&self) -> Result<()> {
        {
            let mut guard = self.shared.done_lock.lock();
            while self.shared.in_flight.load(Ordering::SeqCst) > 0 {
                self.shared.done.wait(&mut guard);
            }
        }
        let mut failures = self.failures.try_iter();
        match failures.next() {
            Some(first) => {
                let others = failures.count();
                if others > 0 {
                    error!(others, "further task failures suppressed");
                }
                Err(first.into())
            }
            None => Ok(()),
        }
    }

    /// Stop the workers and join them. Queued tasks that have not started are dropped.
    pub fn shutdown(&mut self) {
        self.shared.shutdown.store(true, Ordering::SeqCst);
        {
            let _guard = self.shared.idle_lock.lock();
            self.shared.idle.notify_all();
        }
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}
