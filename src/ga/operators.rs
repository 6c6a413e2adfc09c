//! Generic recombination operators for position-indexed chromosomes.
//!
//! These work on any slice of `Clone` genes and keep every gene at its
//! original position, which is what a timetable encoding needs: position
//! `i` always belongs to course `i`, only the gene contents move between
//! parents.
//!
//! # Crossover Operators
//!
//! - [`one_point_crossover`]: swap tails after a uniform cut point — O(n)
//! - [`uniform_crossover`]: independent fair coin per position — O(n)
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::TimetableError;

/// Crossover strategy, chosen once when the GA is configured.
///
/// Parsing from a string is the only place an unknown strategy can appear,
/// so an invalid name is rejected before any generation runs.
///
/// ```
/// use u_timetable::ga::CrossoverType;
///
/// let kind: CrossoverType = "uniform".parse().unwrap();
/// assert_eq!(kind, CrossoverType::Uniform);
/// assert!("two_point".parse::<CrossoverType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossoverType {
    /// Single cut point; tails are exchanged.
    #[default]
    OnePoint,
    /// Each position is inherited from a parent chosen by a fair coin.
    Uniform,
}

impl CrossoverType {
    /// The canonical lowercase name, as used in run records.
    pub fn as_str(self) -> &'static str {
        match self {
            CrossoverType::OnePoint => "one_point",
            CrossoverType::Uniform => "uniform",
        }
    }
}

impl fmt::Display for CrossoverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CrossoverType {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "one_point" => Ok(CrossoverType::OnePoint),
            "uniform" => Ok(CrossoverType::Uniform),
            other => Err(TimetableError::config(format!(
                "unsupported crossover type {other:?} (expected \"one_point\" or \"uniform\")"
            ))),
        }
    }
}

/// One-point crossover with a uniformly drawn cut in `[0, n]`.
///
/// Both ends are inclusive, so a cut of `0` or `n` reproduces the parents
/// (swapped or unchanged) and is a legitimate outcome.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn one_point_crossover<T: Clone, R: Rng>(
    parent1: &[T],
    parent2: &[T],
    rng: &mut R,
) -> (Vec<T>, Vec<T>) {
    let cut = rng.random_range(0..=parent1.len());
    one_point_crossover_at(parent1, parent2, cut)
}

/// One-point crossover at an explicit cut.
///
/// `child1 = parent1[..cut] ++ parent2[cut..]`,
/// `child2 = parent2[..cut] ++ parent1[cut..]`.
///
/// # Panics
/// Panics if parents have different lengths or `cut > n`.
pub fn one_point_crossover_at<T: Clone>(
    parent1: &[T],
    parent2: &[T],
    cut: usize,
) -> (Vec<T>, Vec<T>) {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");
    assert!(cut <= parent1.len(), "cut point out of range");

    let child1 = parent1[..cut].iter().chain(&parent2[cut..]).cloned().collect();
    let child2 = parent2[..cut].iter().chain(&parent1[cut..]).cloned().collect();
    (child1, child2)
}

/// Uniform crossover.
///
/// For every position a fair coin decides which parent feeds `child1`; the
/// other parent feeds `child2`, so the children are always complementary.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn uniform_crossover<T: Clone, R: Rng>(
    parent1: &[T],
    parent2: &[T],
    rng: &mut R,
) -> (Vec<T>, Vec<T>) {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");

    let n = parent1.len();
    let mut child1 = Vec::with_capacity(n);
    let mut child2 = Vec::with_capacity(n);

    for (a, b) in parent1.iter().zip(parent2) {
        if rng.random_bool(0.5) {
            child1.push(a.clone());
            child2.push(b.clone());
        } else {
            child1.push(b.clone());
            child2.push(a.clone());
        }
    }

    (child1, child2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_crossover_type_parse() {
        assert_eq!("one_point".parse::<CrossoverType>().unwrap(), CrossoverType::OnePoint);
        assert_eq!("uniform".parse::<CrossoverType>().unwrap(), CrossoverType::Uniform);
    }

    #[test]
    fn test_crossover_type_rejects_unknown() {
        let err = "onepoint".parse::<CrossoverType>().unwrap_err();
        assert!(matches!(err, TimetableError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_crossover_type_display_matches_parse() {
        for kind in [CrossoverType::OnePoint, CrossoverType::Uniform] {
            assert_eq!(kind.to_string().parse::<CrossoverType>().unwrap(), kind);
        }
    }

    #[test]
    fn test_crossover_type_serde_name() {
        let json = serde_json::to_string(&CrossoverType::OnePoint).unwrap();
        assert_eq!(json, "\"one_point\"");
    }

    #[test]
    fn test_one_point_at_middle() {
        let (c1, c2) = one_point_crossover_at(&[1, 2, 3, 4], &[5, 6, 7, 8], 2);
        assert_eq!(c1, vec![1, 2, 7, 8]);
        assert_eq!(c2, vec![5, 6, 3, 4]);
    }

    #[test]
    fn test_one_point_degenerate_cuts() {
        let p1 = [1, 2, 3];
        let p2 = [4, 5, 6];

        let (c1, c2) = one_point_crossover_at(&p1, &p2, 0);
        assert_eq!(c1, p2.to_vec());
        assert_eq!(c2, p1.to_vec());

        let (c1, c2) = one_point_crossover_at(&p1, &p2, 3);
        assert_eq!(c1, p1.to_vec());
        assert_eq!(c2, p2.to_vec());
    }

    #[test]
    fn test_one_point_cut_covers_both_ends() {
        let p1 = [0u8; 3];
        let p2 = [1u8; 3];
        let mut rng = create_rng(42);
        let mut seen = [false; 4];

        for _ in 0..1000 {
            let (c1, _) = one_point_crossover(&p1, &p2, &mut rng);
            let cut = c1.iter().take_while(|&&g| g == 0).count();
            seen[cut] = true;
        }
        assert!(seen.iter().all(|&s| s), "cuts seen: {seen:?}");
    }

    #[test]
    fn test_uniform_children_complementary() {
        let p1: Vec<u32> = (0..50).collect();
        let p2: Vec<u32> = (100..150).collect();
        let mut rng = create_rng(7);

        let (c1, c2) = uniform_crossover(&p1, &p2, &mut rng);
        for i in 0..p1.len() {
            let pair = (c1[i], c2[i]);
            assert!(pair == (p1[i], p2[i]) || pair == (p2[i], p1[i]));
        }
    }

    #[test]
    fn test_uniform_mixes_parents() {
        let p1 = vec![0u8; 200];
        let p2 = vec![1u8; 200];
        let mut rng = create_rng(42);

        let (c1, _) = uniform_crossover(&p1, &p2, &mut rng);
        let from_p2 = c1.iter().filter(|&&g| g == 1).count();
        assert!((60..140).contains(&from_p2), "got {from_p2}/200 from parent2");
    }

    #[test]
    fn test_empty_parents() {
        let mut rng = create_rng(42);
        let empty: [u8; 0] = [];
        let (c1, c2) = one_point_crossover(&empty, &empty, &mut rng);
        assert!(c1.is_empty() && c2.is_empty());
        let (c1, c2) = uniform_crossover(&empty, &empty, &mut rng);
        assert!(c1.is_empty() && c2.is_empty());
    }

    #[test]
    #[should_panic(expected = "parents must have equal length")]
    fn test_length_mismatch_panics() {
        one_point_crossover_at(&[1, 2], &[1], 0);
    }
}
