//! Wire permutations used by the subsumption oracle

use crate::error::{Result, SearchError};
use std::fmt;

/// A bijection on wire indices: wire `i` is relabelled as `self[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    /// The identity permutation on `n` wires.
    pub fn identity(n: usize) -> Self {
        Permutation((0..n).collect())
    }

    /// Build a permutation, rejecting anything that is not a bijection on `0..len`.
    pub fn new(map: Vec<usize>) -> Result<Self> {
        let n = map.len();
        let mut seen = vec![false; n];
        for &target in &map {
            if target >= n || seen[target] {
                return Err(SearchError::InvalidPermutation(map));
            }
            seen[target] = true;
        }
        Ok(Permutation(map))
    }

    /// Wrap a map produced by a perfect matching, which is a bijection by construction.
    pub(crate) fn from_matching(map: Vec<usize>) -> Self {
        debug_assert!(Permutation::new(map.clone()).is_ok());
        Permutation(map)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn is_identity(&self) -> bool {
        self.0.iter().enumerate().all(|(i, &p)| i == p)
    }

    /// The permutation undoing this one.
    pub fn inverse(&self) -> Self {
        let mut inv = vec![0; self.0.len()];
        for (i, &p) in self.0.iter().enumerate() {
            inv[p] = i;
        }
        Permutation(inv)
    }

    /// Fail unless this permutation acts on exactly `expected` wires.
    pub fn check_len(&self, expected: usize) -> Result<()> {
        if self.0.len() != expected {
            return Err(SearchError::PermutationLength {
                expected,
                actual: self.0.len(),
            });
        }
        Ok(())
    }
}

impl std::ops::Index<usize> for Permutation {
    type Output = usize;

    fn index(&self, wire: usize) -> &usize {
        &self.0[wire]
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|p| p.to_string()).collect();
        write!(f, "[{}]", parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let p = Permutation::identity(4);
        assert!(p.is_identity());
        assert_eq!(p.as_slice(), &[0, 1, 2, 3]);
        assert_eq!(p.to_string(), "[0 1 2 3]");
    }

    #[test]
    fn test_rejects_non_bijection() {
        assert!(Permutation::new(vec![0, 0, 2]).is_err());
        assert!(Permutation::new(vec![0, 3, 1]).is_err());
        assert!(Permutation::new(vec![2, 0, 1]).is_ok());
    }

    #[test]
    fn test_inverse() {
        let p = Permutation::new(vec![2, 0, 1]).unwrap();
        let inv = p.inverse();
        assert_eq!(inv.as_slice(), &[1, 2, 0]);
        for i in 0..3 {
            assert_eq!(inv[p[i]], i);
        }
    }

    #[test]
    fn test_check_len() {
        let p = Permutation::identity(3);
        assert!(p.check_len(3).is_ok());
        assert!(matches!(
            p.check_len(4),
            Err(SearchError::PermutationLength {
                expected: 4,
                actual: 3
            })
        ));
    }
}
