//! Output sets: the achieved outputs of a network grouped by cardinality
//!
//! The aggregate coverage data kept here drives the cheap rejections that run
//! before any permutation search.

pub mod cluster;
pub mod set;

pub use cluster::OutputCluster;
pub use set::{ClusterBounds, OutputSet, PositionCounts};
