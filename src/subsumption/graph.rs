//! Bipartite graph of admissible wire assignments
//!
//! Left vertices are the wires of the dominating candidate, right vertices
//! the wires of the dominated one. Edge `(u, v)` survives only if sending
//! wire `u` to wire `v` agrees with the zero/one coverage of every cluster.
//! Any valid permutation is a perfect matching of this graph.

use crate::output::OutputSet;

/// Adjacency kept as one bit mask of right vertices per left vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateGraph {
    n: usize,
    rows: Vec<u32>,
}

impl CandidateGraph {
    pub fn build(a: &OutputSet, b: &OutputSet) -> Self {
        let n = a.wires();
        let mut rows = vec![0u32; n];
        for (u, row) in rows.iter_mut().enumerate() {
            for v in 0..n {
                if (1..n).all(|k| edge_allowed(a, b, k, u, v)) {
                    *row |= 1 << v;
                }
            }
        }
        CandidateGraph { n, rows }
    }

    /// A graph given directly by its adjacency rows.
    pub fn from_rows(n: usize, rows: Vec<u32>) -> Self {
        debug_assert_eq!(rows.len(), n);
        CandidateGraph { n, rows }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.rows[u] & (1 << v) != 0
    }

    pub fn edge_count(&self) -> usize {
        self.rows.iter().map(|r| r.count_ones() as usize).sum()
    }

    pub fn left_degree(&self, u: usize) -> usize {
        self.rows[u].count_ones() as usize
    }

    pub fn right_degree(&self, v: usize) -> usize {
        self.rows.iter().filter(|&&r| r & (1 << v) != 0).count()
    }

    /// Some wire on either side has no candidate partner.
    pub fn has_isolated_vertex(&self) -> bool {
        let covered = self.rows.iter().fold(0u32, |acc, &r| acc | r);
        let all = if self.n == 32 { u32::MAX } else { (1u32 << self.n) - 1 };
        self.rows.contains(&0) || covered != all
    }

    pub fn remove_edge(&mut self, u: usize, v: usize) {
        self.rows[u] &= !(1 << v);
    }

    /// Keep `(u, v)` and drop every other edge at `u` or at `v`.
    pub fn force_edge(&mut self, u: usize, v: usize) {
        for (w, row) in self.rows.iter_mut().enumerate() {
            if w == u {
                *row &= 1 << v;
            } else {
                *row &= !(1 << v);
            }
        }
    }

    /// Some perfect matching as `matching[u] = v`, found with augmenting paths.
    pub fn perfect_matching(&self) -> Option<Vec<usize>> {
        let mut owner: Vec<Option<usize>> = vec![None; self.n];
        for u in 0..self.n {
            let mut seen = 0u32;
            if !self.augment(u, &mut seen, &mut owner) {
                return None;
            }
        }
        let mut matching = vec![0; self.n];
        for (v, u) in owner.into_iter().enumerate() {
            matching[u?] = v;
        }
        Some(matching)
    }

    fn augment(&self, u: usize, seen: &mut u32, owner: &mut [Option<usize>]) -> bool {
        for v in 0..self.n {
            if !self.has_edge(u, v) || *seen & (1 << v) != 0 {
                continue;
            }
            *seen |= 1 << v;
            let free = match owner[v] {
                None => true,
                Some(w) => self.augment(w, seen, owner),
            };
            if free {
                owner[v] = Some(u);
                return true;
            }
        }
        false
    }

    /// Left vertices `u0, u1, .., uk` such that each `u(i+1)` can take the
    /// partner of `u(i)` and `u0` can take the partner of `uk`.
    ///
    /// Rotating partners along the cycle yields a different perfect matching.
    pub fn alternating_cycle(&self, matching: &[usize]) -> Option<Vec<usize>> {
        // 0 = unvisited, 1 = on the current path, 2 = finished
        let mut state = vec![0u8; self.n];
        let mut path = Vec::with_capacity(self.n);
        for start in 0..self.n {
            if state[start] == 0
                && let Some(cycle) = self.cycle_from(start, matching, &mut state, &mut path)
            {
                return Some(cycle);
            }
        }
        None
    }

    fn cycle_from(
        &self,
        u: usize,
        matching: &[usize],
        state: &mut [u8],
        path: &mut Vec<usize>,
    ) -> Option<Vec<usize>> {
        state[u] = 1;
        path.push(u);
        let partner = matching[u];
        for w in 0..self.n {
            if w == u || !self.has_edge(w, partner) {
                continue;
            }
            match state[w] {
                1 => {
                    let at = path.iter().position(|&x| x == w).unwrap_or(0);
                    return Some(path[at..].to_vec());
                }
                0 => {
                    if let Some(cycle) = self.cycle_from(w, matching, state, path) {
                        return Some(cycle);
                    }
                }
                _ => {}
            }
        }
        path.pop();
        state[u] = 2;
        None
    }
}

/// Rotate partners along `cycle`: each vertex takes its predecessor's partner.
pub fn exchange(matching: &[usize], cycle: &[usize]) -> Vec<usize> {
    let mut next = matching.to_vec();
    let k = cycle.len();
    for i in 0..k {
        let prev = cycle[(i + k - 1) % k];
        next[cycle[i]] = matching[prev];
    }
    next
}

fn edge_allowed(a: &OutputSet, b: &OutputSet, level: usize, u: usize, v: usize) -> bool {
    let ca = a.cluster(level);
    let cb = b.cluster(level);
    if ca.has_zero(u) && !cb.has_zero(v) {
        return false;
    }
    if ca.has_one(u) && !cb.has_one(v) {
        return false;
    }
    if ca.size() == cb.size()
        && ((cb.has_zero(v) && !ca.has_zero(u)) || (cb.has_one(v) && !ca.has_one(u)))
    {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full(n: usize) -> CandidateGraph {
        CandidateGraph::from_rows(n, vec![(1 << n) - 1; n])
    }

    #[test]
    fn test_identical_outputs_allow_identity() {
        let out = OutputSet::from_values(4, [0, 1, 2, 3, 7, 15]).unwrap();
        let g = CandidateGraph::build(&out, &out);
        for w in 0..4 {
            assert!(g.has_edge(w, w));
        }
        assert!(!g.has_isolated_vertex());
    }

    #[test]
    fn test_isolated_vertex() {
        let mut g = full(3);
        assert!(!g.has_isolated_vertex());
        g.remove_edge(0, 0);
        g.remove_edge(1, 0);
        g.remove_edge(2, 0);
        assert!(g.has_isolated_vertex());
        assert_eq!(g.right_degree(0), 0);
    }

    #[test]
    fn test_force_edge() {
        let mut g = full(3);
        g.force_edge(1, 2);
        assert_eq!(g.left_degree(1), 1);
        assert_eq!(g.right_degree(2), 1);
        assert!(g.has_edge(1, 2));
        assert_eq!(g.edge_count(), 5);
    }

    #[test]
    fn test_perfect_matching() {
        // 0 -> {1}, 1 -> {0, 1}, 2 -> {2}
        let g = CandidateGraph::from_rows(3, vec![0b010, 0b011, 0b100]);
        assert_eq!(g.perfect_matching(), Some(vec![1, 0, 2]));

        let g = CandidateGraph::from_rows(2, vec![0b01, 0b01]);
        assert_eq!(g.perfect_matching(), None);
    }

    #[test]
    fn test_cycle_exchange_gives_new_matching() {
        let g = full(3);
        let m = vec![0, 1, 2];
        let cycle = g.alternating_cycle(&m).unwrap();
        assert!(cycle.len() >= 2);
        let next = exchange(&m, &cycle);
        assert_ne!(next, m);
        let mut sorted = next.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2]);
        for (u, &v) in next.iter().enumerate() {
            assert!(g.has_edge(u, v));
        }
    }

    #[test]
    fn test_unique_matching_has_no_cycle() {
        let g = CandidateGraph::from_rows(3, vec![0b001, 0b010, 0b100]);
        assert_eq!(g.alternating_cycle(&[0, 1, 2]), None);
    }
}
