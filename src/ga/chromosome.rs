//! Timetable chromosome encoding.
//!
//! # Encoding
//!
//! A chromosome holds one [`Gene`] per catalog course. Position `i` always
//! carries course `i`; the GA only varies the room and timeslot indices.
//! Crossover therefore exchanges whole genes at fixed positions and never
//! reorders them.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::operators::{one_point_crossover, uniform_crossover, CrossoverType};
use crate::catalog::Catalog;
use crate::error::{Result, TimetableError};

/// One course's assignment: `(course, room, timeslot)` catalog indices.
///
/// Serialized as a three-element array `[course, room, timeslot]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[usize; 3]", into = "[usize; 3]")]
pub struct Gene {
    pub course: usize,
    pub room: usize,
    pub timeslot: usize,
}

impl Gene {
    pub fn new(course: usize, room: usize, timeslot: usize) -> Self {
        Self {
            course,
            room,
            timeslot,
        }
    }
}

impl From<[usize; 3]> for Gene {
    fn from([course, room, timeslot]: [usize; 3]) -> Self {
        Self::new(course, room, timeslot)
    }
}

impl From<Gene> for [usize; 3] {
    fn from(gene: Gene) -> Self {
        [gene.course, gene.room, gene.timeslot]
    }
}

/// A complete timetable candidate.
///
/// Fitness is not stored here; it is recomputed from the genes whenever it
/// is needed, so mutation and crossover can never leave a stale score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chromosome {
    genes: Vec<Gene>,
}

impl Chromosome {
    /// Creates a chromosome with a uniformly random room and timeslot for
    /// every course.
    pub fn random<R: Rng>(catalog: &Catalog, rng: &mut R) -> Self {
        let genes = (0..catalog.course_count())
            .map(|course| {
                Gene::new(
                    course,
                    rng.random_range(0..catalog.room_count()),
                    rng.random_range(0..catalog.timeslot_count()),
                )
            })
            .collect();
        Self { genes }
    }

    /// Wraps explicit genes after checking them against `catalog`.
    ///
    /// Fails with [`TimetableError::CatalogInconsistency`] if the length
    /// differs from the course count, a gene's course index is not its
    /// position, or a room/timeslot index is out of range.
    pub fn from_genes(genes: Vec<Gene>, catalog: &Catalog) -> Result<Self> {
        let chromosome = Self { genes };
        chromosome.validate(catalog)?;
        Ok(chromosome)
    }

    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    pub fn into_genes(self) -> Vec<Gene> {
        self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Checks the encoding invariants against `catalog`.
    pub fn validate(&self, catalog: &Catalog) -> Result<()> {
        if self.genes.len() != catalog.course_count() {
            return Err(TimetableError::catalog(format!(
                "chromosome has {} genes but catalog has {} courses",
                self.genes.len(),
                catalog.course_count()
            )));
        }
        for (i, gene) in self.genes.iter().enumerate() {
            if gene.course != i {
                return Err(TimetableError::catalog(format!(
                    "gene {i} carries course {}",
                    gene.course
                )));
            }
            if gene.room >= catalog.room_count() {
                return Err(TimetableError::catalog(format!(
                    "gene {i} references room {} of {}",
                    gene.room,
                    catalog.room_count()
                )));
            }
            if gene.timeslot >= catalog.timeslot_count() {
                return Err(TimetableError::catalog(format!(
                    "gene {i} references timeslot {} of {}",
                    gene.timeslot,
                    catalog.timeslot_count()
                )));
            }
        }
        Ok(())
    }

    /// Mutates genes in place.
    ///
    /// Each gene is independently selected with probability `mutation_rate`;
    /// a selected gene gets either a new room or a new timeslot (fair coin),
    /// drawn uniformly from the whole catalog list. The new index may equal
    /// the old one. Course indices never change.
    pub fn mutate<R: Rng>(&mut self, mutation_rate: f64, catalog: &Catalog, rng: &mut R) {
        for gene in &mut self.genes {
            if rng.random_range(0.0..1.0) < mutation_rate {
                if rng.random_bool(0.5) {
                    gene.room = rng.random_range(0..catalog.room_count());
                } else {
                    gene.timeslot = rng.random_range(0..catalog.timeslot_count());
                }
            }
        }
    }

    /// Recombines `self` with `other`.
    ///
    /// With probability `crossover_rate` two children are built using
    /// `kind`; otherwise copies of the two parents are returned unchanged.
    pub fn crossover<R: Rng>(
        &self,
        other: &Chromosome,
        crossover_rate: f64,
        kind: CrossoverType,
        rng: &mut R,
    ) -> (Chromosome, Chromosome) {
        if rng.random_range(0.0..1.0) >= crossover_rate {
            return (self.clone(), other.clone());
        }

        let (genes1, genes2) = match kind {
            CrossoverType::OnePoint => one_point_crossover(&self.genes, &other.genes, rng),
            CrossoverType::Uniform => uniform_crossover(&self.genes, &other.genes, rng),
        };
        (Chromosome { genes: genes1 }, Chromosome { genes: genes2 })
    }
}
