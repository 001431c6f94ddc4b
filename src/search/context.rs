//! State shared by every task of a run

use super::config::SearchConfig;
use super::frontier::Frontier;
use super::progress::Progress;
use super::result::Statistics;
use crate::fitness::FitnessEstimator;
use crate::subsumption::Subsumption;

/// Built once per run and handed to tasks behind an `Arc`.
pub struct SearchContext {
    pub frontier: Frontier,
    pub oracle: Box<dyn Subsumption>,
    pub estimator: Box<dyn FitnessEstimator>,
    pub statistics: Statistics,
    pub progress: Progress,
    pub expansion_subsumption: bool,
    pub compaction_threshold: usize,
}

impl SearchContext {
    pub fn new(config: &SearchConfig) -> Self {
        SearchContext {
            frontier: Frontier::new(config.max_output_size(), config.capacity),
            oracle: config.subsumption.build(),
            estimator: config.fitness.build(),
            statistics: Statistics::default(),
            progress: Progress::default(),
            expansion_subsumption: config.expansion_subsumption,
            compaction_threshold: config.compaction_threshold,
        }
    }
}

impl std::fmt::Debug for SearchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchContext")
            .field("oracle", &self.oracle.name())
            .field("estimator", &self.estimator.name())
            .field("frontier_size", &self.frontier.size())
            .field("expansion_subsumption", &self.expansion_subsumption)
            .finish()
    }
}
