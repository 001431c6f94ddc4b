//! Configuration for the level search

use crate::error::{Result, SearchError, check_wires};
use crate::fitness::FitnessKind;
use crate::network::optimal_size;
use crate::subsumption::SubsumptionKind;
use std::path::PathBuf;
use std::time::Duration;

/// Where the first level's networks come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Prefix {
    /// The empty network, or the stored generation just below `from`
    #[default]
    None,
    /// The Green filter for the configured wire count
    GreenFilter,
}

impl std::fmt::Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Prefix::None => write!(f, "none"),
            Prefix::GreenFilter => write!(f, "green"),
        }
    }
}

impl std::str::FromStr for Prefix {
    type Err = SearchError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "none" | "empty" => Ok(Prefix::None),
            "green" | "green-filter" | "greenfilter" => Ok(Prefix::GreenFilter),
            _ => Err(SearchError::UnknownStrategy {
                kind: "prefix",
                name: s.to_string(),
                valid: "none, green",
            }),
        }
    }
}

/// Run parameters for [`super::LevelSearch`].
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub wires: usize,
    /// First comparator count to build
    pub from: usize,
    /// Last comparator count to build (None = the known optimal size)
    pub to: Option<usize>,
    /// Worker threads (0 = all available)
    pub threads: usize,
    /// Widest sequence table to prepare up front
    pub max_wires: usize,
    pub subsumption: SubsumptionKind,
    pub fitness: FitnessKind,
    /// Live networks kept per level before the eviction rule kicks in
    pub capacity: usize,
    /// Check dominance while expanding, not only in the final pass
    pub expansion_subsumption: bool,
    /// Dead entries tolerated before a worker compacts the frontier
    pub compaction_threshold: usize,
    pub monitor_interval: Option<Duration>,
    /// Log at debug level
    pub trace: bool,
    /// Directory for generation files (None = no persistence)
    pub out_dir: Option<PathBuf>,
    /// Base random seed (workers get seed + worker_id)
    pub seed: Option<u64>,
    pub prefix: Prefix,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            wires: 4,
            from: 1,
            to: None,
            threads: 0,
            max_wires: 4,
            subsumption: SubsumptionKind::default(),
            fitness: FitnessKind::default(),
            capacity: 8000,
            expansion_subsumption: true,
            compaction_threshold: 1000,
            monitor_interval: None,
            trace: false,
            out_dir: None,
            seed: None,
            prefix: Prefix::None,
        }
    }
}

impl SearchConfig {
    /// Configuration for `wires` wires with every other field at its default.
    pub fn new(wires: usize) -> Self {
        Self {
            wires,
            max_wires: wires,
            ..Self::default()
        }
    }

    pub fn with_range(mut self, from: usize, to: usize) -> Self {
        self.from = from;
        self.to = Some(to);
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_max_wires(mut self, max_wires: usize) -> Self {
        self.max_wires = max_wires;
        self
    }

    pub fn with_subsumption(mut self, kind: SubsumptionKind) -> Self {
        self.subsumption = kind;
        self
    }

    pub fn with_fitness(mut self, kind: FitnessKind) -> Self {
        self.fitness = kind;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_expansion_subsumption(mut self, enabled: bool) -> Self {
        self.expansion_subsumption = enabled;
        self
    }

    pub fn with_compaction_threshold(mut self, threshold: usize) -> Self {
        self.compaction_threshold = threshold;
        self
    }

    /// A zero interval disables the monitor.
    pub fn with_monitor_interval(mut self, interval: Duration) -> Self {
        self.monitor_interval = (!interval.is_zero()).then_some(interval);
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn with_out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(dir.into());
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_seed_option(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = prefix;
        self
    }

    /// Worker threads after resolving 0 to the hardware count.
    pub fn worker_count(&self) -> usize {
        if self.threads == 0 {
            num_cpus::get().max(1)
        } else {
            self.threads
        }
    }

    /// Last level to build.
    pub fn last_level(&self) -> usize {
        self.to
            .or_else(|| optimal_size(self.wires))
            .unwrap_or(self.from)
    }

    /// Largest achievable output-set size, `2^wires`.
    pub fn max_output_size(&self) -> usize {
        1usize << self.wires
    }

    pub fn validate(&self) -> Result<()> {
        check_wires(self.wires)?;
        check_wires(self.max_wires)?;
        if self.wires > self.max_wires {
            return Err(SearchError::UnsupportedWireCount(self.wires));
        }
        if self.from == 0 {
            return Err(SearchError::InvalidConfig("levels start at 1".to_string()));
        }
        if self.capacity == 0 {
            return Err(SearchError::InvalidConfig(
                "frontier capacity must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.capacity, 8000);
        assert_eq!(config.compaction_threshold, 1000);
        assert!(config.expansion_subsumption);
        assert!(config.monitor_interval.is_none());
        assert!(config.worker_count() >= 1);
        assert_eq!(config.subsumption, SubsumptionKind::Matching);
    }

    #[test]
    fn test_config_builder() {
        let config = SearchConfig::new(5)
            .with_range(2, 7)
            .with_threads(3)
            .with_capacity(100)
            .with_seed(42)
            .with_prefix(Prefix::GreenFilter)
            .with_monitor_interval(Duration::ZERO);
        assert_eq!(config.max_wires, 5);
        assert_eq!((config.from, config.last_level()), (2, 7));
        assert_eq!(config.worker_count(), 3);
        assert_eq!(config.seed, Some(42));
        assert!(config.monitor_interval.is_none());
        assert_eq!(config.max_output_size(), 32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_last_level_defaults_to_optimum() {
        assert_eq!(SearchConfig::new(5).last_level(), 9);
        assert_eq!(SearchConfig::new(18).last_level(), 1);
    }

    #[test]
    fn test_validate_rejects() {
        assert!(SearchConfig::new(0).validate().is_err());
        assert!(SearchConfig::new(6).with_max_wires(4).validate().is_err());
        assert!(SearchConfig::new(4).with_range(0, 3).validate().is_err());
        assert!(SearchConfig::new(4).with_capacity(0).validate().is_err());
    }

    #[test]
    fn test_prefix_names() {
        assert_eq!("green".parse::<Prefix>().unwrap(), Prefix::GreenFilter);
        assert_eq!("None".parse::<Prefix>().unwrap(), Prefix::None);
        assert!("red".parse::<Prefix>().is_err());
    }
}
