//! Comparator networks
//!
//! [`Network`] is the sequential model (comparators, layers, cached outputs).
//! [`RuntimeNetwork`] wraps it with the id, liveness flag and comparison
//! watermarks used while it sits in the concurrent frontier.

pub mod comparator;
pub mod known;
pub mod layer;
#[allow(clippy::module_inception)]
pub mod network;
pub mod runtime;

pub use comparator::Comparator;
pub use known::{OPT_SIZE, green_filter, known_instance, optimal_size};
pub use layer::Layer;
pub use network::{Network, RedundancyReason};
pub use runtime::RuntimeNetwork;
