//! Search for small sorting networks
//!
//! This module provides two drivers:
//! - Level search: parallel, level-by-level expansion over a shared
//!   frontier, pruned by dominance and a capacity rule
//! - Greedy: a sequential best-first variant keeping a bounded list per level

pub mod acceptance;
pub mod candidate;
pub mod config;
pub mod context;
pub mod frontier;
pub mod generator;
pub mod greedy;
pub mod monitor;
pub mod parallel;
pub mod progress;
pub mod result;
pub mod tasks;

pub use config::{Prefix, SearchConfig};
pub use context::SearchContext;
pub use frontier::Frontier;
pub use generator::LevelSearch;
pub use greedy::GreedySearch;
pub use monitor::Monitor;
pub use parallel::{PoolConfig, WorkerPool};
pub use progress::{Phase, Progress};
pub use result::{LevelReport, SearchResult, Statistics, StatisticsSnapshot};
