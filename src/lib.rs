//! Search for minimum-size sorting networks
//!
//! Networks are grown one comparator at a time. Each level keeps only
//! networks whose achieved outputs are not dominated, up to a wire
//! permutation, by another network of the same size.

pub mod error;
pub mod fitness;
pub mod network;
pub mod output;
pub mod parser;
pub mod search;
pub mod sequence;
pub mod store;
pub mod subsumption;

pub use error::{Result, SearchError};
pub use network::Network;
pub use search::{GreedySearch, LevelSearch, SearchConfig};
