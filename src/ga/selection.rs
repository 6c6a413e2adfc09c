//! Tournament parent selection.
//!
//! Each tournament samples `k` distinct individuals (without replacement
//! within the tournament) and returns the two fittest as parents. The same
//! individual may appear again in later tournaments.
//!
//! # References
//!
//! - Miller & Goldberg (1995), "Genetic Algorithms, Tournament Selection,
//!   and the Effects of Noise"

use rand::seq::index;
use rand::Rng;

/// Runs one tournament over `fitness` and returns the indices of the best
/// and second-best competitors.
///
/// Higher fitness wins. Ties keep sampling order, so the result depends
/// only on the random draws.
///
/// # Panics
/// Panics if `k < 2` or `k > fitness.len()`.
pub fn tournament_pair<R: Rng>(fitness: &[f64], k: usize, rng: &mut R) -> (usize, usize) {
    assert!(k >= 2, "tournament needs at least 2 competitors");
    assert!(
        k <= fitness.len(),
        "tournament size {k} exceeds population of {}",
        fitness.len()
    );

    let mut competitors = index::sample(rng, fitness.len(), k).into_vec();
    competitors.sort_by(|&a, &b| {
        fitness[b]
            .partial_cmp(&fitness[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    (competitors[0], competitors[1])
}
