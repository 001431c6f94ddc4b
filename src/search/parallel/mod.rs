//! Parallel execution for the level search.
//!
//! # Architecture
//!
//! - A **pool** of worker threads, each with its own task deque, that steal
//!   from one another when idle
//! - A **drain barrier**: [`WorkerPool::wait`] returns once every submitted
//!   task, including tasks submitted by tasks, has finished
//! - A **failure channel** carrying task errors and panics back to the
//!   thread that waits
//!
//! # Example
//!
//! ```ignore
//! use sortnet_search::search::parallel::{PoolConfig, WorkerPool};
//!
//! let pool = WorkerPool::new(&PoolConfig::default().with_workers(4).with_seed(7))?;
//! for net in seeds {
//!     pool.submit(move |ctx| expand(&net, ctx.rng()));
//! }
//! pool.wait()?;
//! ```

pub mod channel;
pub mod config;
pub mod pool;

pub use channel::TaskFailure;
pub use config::PoolConfig;
pub use pool::{Task, WorkerContext, WorkerPool};
