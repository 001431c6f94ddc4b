//! Error types shared by every layer of the search

use thiserror::Error;

/// Largest wire count the sequence cache and the frontier are sized for.
pub const MAX_WIRES: usize = 20;

/// Errors raised by the network model, the subsumption oracle and the search driver.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A strategy was requested by a name nothing is registered under.
    #[error("unknown {kind} implementation: '{name}'. Valid options: {valid}")]
    UnknownStrategy {
        kind: &'static str,
        name: String,
        valid: &'static str,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("permutation has {actual} entries, expected {expected}")]
    PermutationLength { expected: usize, actual: usize },

    #[error("not a permutation: {0:?}")]
    InvalidPermutation(Vec<usize>),

    #[error("invalid comparator ({wire0},{wire1}) on a {wires}-wire network")]
    InvalidComparator {
        wire0: usize,
        wire1: usize,
        wires: usize,
    },

    #[error("split index {index} must be below {len}")]
    SplitIndex { index: usize, len: usize },

    #[error("{estimators} fitness estimators but {weights} weights")]
    WeightMismatch { estimators: usize, weights: usize },

    #[error("input has {actual} values, network has {expected} wires")]
    InputLength { expected: usize, actual: usize },

    /// The frontier was sized for a smaller maximum output size than it received.
    #[error("output size {out_size} exceeds frontier bucket range 0..={max}")]
    FrontierCapacity { out_size: usize, max: usize },

    #[error("wire count {0} outside supported range 1..={max}", max = MAX_WIRES)]
    UnsupportedWireCount(usize),

    #[error("cannot parse {what}: {reason}")]
    Parse { what: &'static str, reason: String },

    /// A scheduled task returned an error or panicked.
    #[error("task failed on worker {worker}: {message}")]
    TaskFailed { worker: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Validate a wire count against the supported range.
pub fn check_wires(wires: usize) -> Result<()> {
    if wires == 0 || wires > MAX_WIRES {
        Err(SearchError::UnsupportedWireCount(wires))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_wires_bounds() {
        assert!(check_wires(0).is_err());
        assert!(check_wires(1).is_ok());
        assert!(check_wires(MAX_WIRES).is_ok());
        assert!(matches!(
            check_wires(MAX_WIRES + 1),
            Err(SearchError::UnsupportedWireCount(w)) if w == MAX_WIRES + 1
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = SearchError::UnknownStrategy {
            kind: "subsumption",
            name: "Nope".to_string(),
            valid: "matching, bipartite",
        };
        assert!(err.to_string().contains("'Nope'"));

        let err = SearchError::InvalidPermutation(vec![0, 0, 1]);
        assert_eq!(err.to_string(), "not a permutation: [0, 0, 1]");
    }
}
