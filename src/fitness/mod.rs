//! Fitness estimators
//!
//! A fitness score ranks candidate networks when the frontier is at capacity.
//! Estimators are selected by name through [`FitnessKind`].

pub mod estimators;

pub use estimators::{Article, Bad0, Bad1, BadPosCount, ClusterSize, Composite, OutputSize};

use crate::error::SearchError;
use crate::network::Network;

/// Scores a network; lower is better.
pub trait FitnessEstimator: Send + Sync {
    fn compute(&self, net: &Network) -> f64;

    fn name(&self) -> &'static str;
}

/// Named estimator selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitnessKind {
    #[default]
    BadPosCount,
    Article,
    ClusterSize,
    OutputSize,
    Bad0,
    Bad1,
}

impl FitnessKind {
    pub fn build(self) -> Box<dyn FitnessEstimator> {
        match self {
            FitnessKind::BadPosCount => Box::new(BadPosCount),
            FitnessKind::Article => Box::new(Article),
            FitnessKind::ClusterSize => Box::new(ClusterSize),
            FitnessKind::OutputSize => Box::new(OutputSize),
            FitnessKind::Bad0 => Box::new(Bad0),
            FitnessKind::Bad1 => Box::new(Bad1),
        }
    }
}

impl std::fmt::Display for FitnessKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitnessKind::BadPosCount => write!(f, "bad-pos-count"),
            FitnessKind::Article => write!(f, "article"),
            FitnessKind::ClusterSize => write!(f, "cluster-size"),
            FitnessKind::OutputSize => write!(f, "output-size"),
            FitnessKind::Bad0 => write!(f, "bad0"),
            FitnessKind::Bad1 => write!(f, "bad1"),
        }
    }
}

impl std::str::FromStr for FitnessKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "bad-pos-count" | "badposcount" | "fitnessbadposcount" => Ok(FitnessKind::BadPosCount),
            "article" | "fitnessarticleformula" => Ok(FitnessKind::Article),
            "cluster-size" | "clustersize" | "fitnessclustersize" => Ok(FitnessKind::ClusterSize),
            "output-size" | "outputsize" | "fitnessoutputsize" => Ok(FitnessKind::OutputSize),
            "bad0" | "fitnessbad0" => Ok(FitnessKind::Bad0),
            "bad1" | "fitnessbad1" => Ok(FitnessKind::Bad1),
            _ => Err(SearchError::UnknownStrategy {
                kind: "fitness",
                name: s.to_string(),
                valid: "bad-pos-count, article, cluster-size, output-size, bad0, bad1",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in [
            FitnessKind::BadPosCount,
            FitnessKind::Article,
            FitnessKind::ClusterSize,
            FitnessKind::OutputSize,
            FitnessKind::Bad0,
            FitnessKind::Bad1,
        ] {
            let parsed: FitnessKind = kind.to_string().parse().unwrap();
            assert_eq!(parsed, kind);
            assert_eq!(kind.build().name(), kind.to_string());
        }
    }

    #[test]
    fn test_unknown_kind() {
        let err = "entropy".parse::<FitnessKind>().unwrap_err();
        assert!(matches!(err, SearchError::UnknownStrategy { kind: "fitness", .. }));
    }

    #[test]
    fn test_aliases() {
        assert_eq!("FitnessBadPosCount".parse::<FitnessKind>().unwrap(), FitnessKind::BadPosCount);
        assert_eq!("cluster_size".parse::<FitnessKind>().unwrap(), FitnessKind::ClusterSize);
    }
}
