//! Population management and generational replacement.
//!
//! [`Population::evolve`] produces the next generation:
//! rank → copy elites → tournament selection → crossover → mutation →
//! truncate to the original size.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use rand::Rng;

use super::chromosome::Chromosome;
use super::config::{elite_count, GaConfig};
use super::fitness::calculate_fitness;
use super::selection::tournament_pair;
use crate::catalog::Catalog;
use crate::error::{Result, TimetableError};

/// One generation of candidate timetables.
///
/// The population size is fixed at construction and preserved by every
/// call to [`evolve`](Self::evolve). No history is kept here.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    individuals: Vec<Chromosome>,
}

impl Population {
    /// Creates `size` random chromosomes for `catalog`.
    ///
    /// Fails with [`TimetableError::CatalogInconsistency`] when the catalog
    /// has no courses, rooms, or timeslots to draw indices from.
    pub fn random<R: Rng>(size: usize, catalog: &Catalog, rng: &mut R) -> Result<Self> {
        if size == 0 {
            return Err(TimetableError::config("population size must be at least 1"));
        }
        if catalog.course_count() == 0 || catalog.room_count() == 0 || catalog.timeslot_count() == 0 {
            return Err(TimetableError::catalog(format!(
                "cannot draw genes from {} courses, {} rooms, {} timeslots",
                catalog.course_count(),
                catalog.room_count(),
                catalog.timeslot_count()
            )));
        }
        let individuals = (0..size)
            .map(|_| Chromosome::random(catalog, rng))
            .collect();
        Ok(Self { individuals })
    }

    /// Wraps existing chromosomes, checking each against `catalog`.
    pub fn from_individuals(individuals: Vec<Chromosome>, catalog: &Catalog) -> Result<Self> {
        if individuals.is_empty() {
            return Err(TimetableError::config("population size must be at least 1"));
        }
        for chromosome in &individuals {
            chromosome.validate(catalog)?;
        }
        Ok(Self { individuals })
    }

    pub fn individuals(&self) -> &[Chromosome] {
        &self.individuals
    }

    pub fn into_individuals(self) -> Vec<Chromosome> {
        self.individuals
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Fitness of every individual, in population order.
    pub fn evaluate(&self, catalog: &Catalog, parallel: bool) -> Vec<f64> {
        evaluate_all(&self.individuals, catalog, parallel)
    }

    /// Indices of individuals sorted by fitness, best first.
    ///
    /// Equal fitness keeps population order.
    pub fn ranked(&self, catalog: &Catalog) -> Vec<usize> {
        rank(&self.evaluate(catalog, false))
    }

    /// The fittest individual and its fitness. The earliest one wins ties.
    pub fn best(&self, catalog: &Catalog) -> (&Chromosome, f64) {
        let fitness = self.evaluate(catalog, false);
        let idx = best_index(&fitness);
        (&self.individuals[idx], fitness[idx])
    }

    /// Replaces the population with the next generation.
    ///
    /// `config` is validated first; on error the population is unchanged.
    pub fn evolve<R: Rng>(&mut self, catalog: &Catalog, config: &GaConfig, rng: &mut R) -> Result<()> {
        config.validate()?;
        let fitness = self.evaluate(catalog, config.parallel);
        self.breed(catalog, &fitness, config, rng)
    }

    /// Like [`evolve`](Self::evolve), reusing fitness values already
    /// computed for the current individuals.
    ///
    /// The ranked snapshot is read-only until the new generation is fully
    /// assembled; only the single `rng` stream is consumed.
    pub fn evolve_with_fitness<R: Rng>(
        &mut self,
        catalog: &Catalog,
        fitness: &[f64],
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<()> {
        config.validate()?;
        self.breed(catalog, fitness, config, rng)
    }

    /// Generational replacement for an already validated `config`.
    pub(crate) fn breed<R: Rng>(
        &mut self,
        catalog: &Catalog,
        fitness: &[f64],
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<()> {
        let size = self.individuals.len();
        if fitness.len() != size {
            return Err(TimetableError::config(format!(
                "got {} fitness values for {size} individuals",
                fitness.len()
            )));
        }

        let order = rank(fitness);
        let ranked: Vec<&Chromosome> = order.iter().map(|&i| &self.individuals[i]).collect();
        let ranked_fitness: Vec<f64> = order.iter().map(|&i| fitness[i]).collect();

        let elites = elite_count(size, config.elitism_rate).min(size);
        let mut next: Vec<Chromosome> = ranked[..elites].iter().map(|&c| c.clone()).collect();

        if next.len() < size && config.tournament_size > size {
            return Err(TimetableError::config(format!(
                "tournament_size {} exceeds population of {size}",
                config.tournament_size
            )));
        }

        while next.len() < size {
            let (a, b) = tournament_pair(&ranked_fitness, config.tournament_size, rng);
            let (mut child1, mut child2) =
                ranked[a].crossover(ranked[b], config.crossover_rate, config.crossover_type, rng);
            child1.mutate(config.mutation_rate, catalog, rng);
            child2.mutate(config.mutation_rate, catalog, rng);
            next.push(child1);
            next.push(child2);
        }

        // The last pair may overshoot by one.
        next.truncate(size);
        self.individuals = next;
        Ok(())
    }
}

/// Indices sorted by fitness descending; stable for ties.
pub(crate) fn rank(fitness: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..fitness.len()).collect();
    order.sort_by(|&a, &b| {
        fitness[b]
            .partial_cmp(&fitness[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order
}

/// Index of the first maximum.
///
/// # Panics
/// Panics if `fitness` is empty.
pub(crate) fn best_index(fitness: &[f64]) -> usize {
    assert!(!fitness.is_empty(), "population must not be empty");
    let mut best = 0;
    for (i, &f) in fitness.iter().enumerate().skip(1) {
        if f > fitness[best] {
            best = i;
        }
    }
    best
}

fn evaluate_all(individuals: &[Chromosome], catalog: &Catalog, parallel: bool) -> Vec<f64> {
    if parallel {
        evaluate_parallel(individuals, catalog)
    } else {
        individuals
            .iter()
            .map(|c| calculate_fitness(c, catalog))
            .collect()
    }
}

#[cfg(feature = "parallel")]
fn evaluate_parallel(individuals: &[Chromosome], catalog: &Catalog) -> Vec<f64> {
    individuals
        .par_iter()
        .map(|c| calculate_fitness(c, catalog))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn evaluate_parallel(individuals: &[Chromosome], catalog: &Catalog) -> Vec<f64> {
    evaluate_all(individuals, catalog, false)
}
