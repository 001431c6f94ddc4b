//! Randomized acceptance rules for a frontier at capacity
//!
//! Fitness scores lie in `[0, 1]`, lower is better. When the frontier is
//! full, a better-scoring network may push out a worse one, but only with a
//! probability that grows with the gap between the two scores.

use rand::Rng;

/// Whether a new child evicts a worse frontier member.
///
/// Two independent draws must both land inside the gap: the first above the
/// child's score, the second below the peer's.
pub fn should_evict_peer<R: Rng + ?Sized>(rng: &mut R, child_fitness: f64, peer_fitness: f64) -> bool {
    if child_fitness >= peer_fitness {
        return false;
    }
    let r1: f64 = rng.random();
    let r2: f64 = rng.random();
    r1 > child_fitness && r2 < peer_fitness
}

/// Whether a new child is dropped in favour of a better frontier member.
pub fn should_drop_child<R: Rng + ?Sized>(rng: &mut R, child_fitness: f64, peer_fitness: f64) -> bool {
    if child_fitness <= peer_fitness {
        return false;
    }
    let r1: f64 = rng.random();
    let r2: f64 = rng.random();
    r1 < child_fitness && r2 > peer_fitness
}

/// Single-draw variant used by the greedy search: the worse network goes
/// when one draw separates the two scores.
pub fn single_draw_evicts<R: Rng + ?Sized>(rng: &mut R, better_fitness: f64, worse_fitness: f64) -> bool {
    if better_fitness >= worse_fitness {
        return false;
    }
    let x: f64 = rng.random();
    better_fitness < x && worse_fitness > x
}
