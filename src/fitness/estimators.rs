//! Concrete scoring formulas. Lower is better; sorting networks score 0.

use super::FitnessEstimator;
use crate::error::{Result, SearchError};
use crate::network::Network;

/// `2^n` as a float.
fn inputs(net: &Network) -> f64 {
    (1u64 << net.wires()) as f64
}

/// Output-set size above the n+1 sorted outputs.
fn excess_outputs(net: &Network) -> f64 {
    net.output_size() as f64 - (net.wires() + 1) as f64
}

fn bad_wires(net: &Network) -> (f64, f64) {
    let (bad0, bad1) = net.output_set().position_counts().bad_wires();
    (bad0 as f64, bad1 as f64)
}

/// Wires carrying a misplaced value, weighted above the output size.
#[derive(Debug, Clone, Copy, Default)]
pub struct BadPosCount;

impl FitnessEstimator for BadPosCount {
    fn compute(&self, net: &Network) -> f64 {
        let n = net.wires() as f64;
        let factor = inputs(net);
        let (bad0, bad1) = bad_wires(net);
        (factor * (bad0 + bad1) + excess_outputs(net)) / (factor * 2.0 * (n - 1.0) + factor)
    }

    fn name(&self) -> &'static str {
        "bad-pos-count"
    }
}

fn article_score(net: &Network, bad: f64) -> f64 {
    let n = net.wires() as f64;
    let factor = inputs(net);
    (factor * bad + excess_outputs(net)) / ((n + 1.0) * (factor - 1.0))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Article;

impl FitnessEstimator for Article {
    fn compute(&self, net: &Network) -> f64 {
        let (bad0, bad1) = bad_wires(net);
        article_score(net, bad0 + bad1)
    }

    fn name(&self) -> &'static str {
        "article"
    }
}

/// [`Article`] counting only misplaced zeros.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bad0;

impl FitnessEstimator for Bad0 {
    fn compute(&self, net: &Network) -> f64 {
        article_score(net, bad_wires(net).0)
    }

    fn name(&self) -> &'static str {
        "bad0"
    }
}

/// [`Article`] counting only misplaced ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bad1;

impl FitnessEstimator for Bad1 {
    fn compute(&self, net: &Network) -> f64 {
        article_score(net, bad_wires(net).1)
    }

    fn name(&self) -> &'static str {
        "bad1"
    }
}

/// Cluster sizes weighted by distance from the middle level.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClusterSize;

impl FitnessEstimator for ClusterSize {
    fn compute(&self, net: &Network) -> f64 {
        let n = net.wires();
        let out = net.output_set();
        let score: f64 = (1..n.saturating_sub(1))
            .map(|i| {
                let weight = 2f64.powi(i.abs_diff(n / 2) as i32);
                weight * (out.cluster(i).size() as f64 - 1.0)
            })
            .sum();
        if score == 0.0 { 0.0 } else { 1.0 - 1.0 / score }
    }

    fn name(&self) -> &'static str {
        "cluster-size"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OutputSize;

impl FitnessEstimator for OutputSize {
    fn compute(&self, net: &Network) -> f64 {
        excess_outputs(net) / inputs(net)
    }

    fn name(&self) -> &'static str {
        "output-size"
    }
}

/// Weighted mean of several estimators.
pub struct Composite {
    estimators: Vec<Box<dyn FitnessEstimator>>,
    weights: Vec<f64>,
}

impl Composite {
    pub fn new(estimators: Vec<Box<dyn FitnessEstimator>>, weights: Vec<f64>) -> Result<Self> {
        if estimators.len() != weights.len() {
            return Err(SearchError::WeightMismatch {
                estimators: estimators.len(),
                weights: weights.len(),
            });
        }
        Ok(Composite { estimators, weights })
    }
}

impl FitnessEstimator for Composite {
    fn compute(&self, net: &Network) -> f64 {
        let total: f64 = self.weights.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }
        let sum: f64 = self
            .estimators
            .iter()
            .zip(&self.weights)
            .map(|(e, w)| w * e.compute(net))
            .sum();
        sum / total
    }

    fn name(&self) -> &'static str {
        "composite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorter() -> Network {
        Network::from_pairs(3, &[(0, 1), (1, 2), (0, 1)]).unwrap()
    }

    #[test]
    fn test_sorting_network_scores_zero() {
        let net = sorter();
        assert_eq!(BadPosCount.compute(&net), 0.0);
        assert_eq!(Article.compute(&net), 0.0);
        assert_eq!(Bad0.compute(&net), 0.0);
        assert_eq!(Bad1.compute(&net), 0.0);
        assert_eq!(OutputSize.compute(&net), 0.0);
        assert_eq!(ClusterSize.compute(&net), 0.0);
    }

    #[test]
    fn test_empty_network_output_size() {
        let net = Network::new(3).unwrap();
        // 8 outputs, 4 of them sorted
        assert!((OutputSize.compute(&net) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_progress_lowers_score() {
        let partial = Network::from_pairs(4, &[(0, 1)]).unwrap();
        let further = Network::from_pairs(4, &[(0, 1), (2, 3), (0, 2)]).unwrap();
        assert!(BadPosCount.compute(&further) < BadPosCount.compute(&partial));
        assert!(OutputSize.compute(&further) < OutputSize.compute(&partial));
    }

    #[test]
    fn test_composite() {
        let net = Network::from_pairs(4, &[(0, 1)]).unwrap();
        let composite = Composite::new(
            vec![Box::new(OutputSize), Box::new(Article)],
            vec![1.0, 3.0],
        )
        .unwrap();
        let expected = (OutputSize.compute(&net) + 3.0 * Article.compute(&net)) / 4.0;
        assert!((composite.compute(&net) - expected).abs() < 1e-12);

        assert!(matches!(
            Composite::new(vec![Box::new(OutputSize)], vec![]),
            Err(SearchError::WeightMismatch { estimators: 1, weights: 0 })
        ));
    }
}
