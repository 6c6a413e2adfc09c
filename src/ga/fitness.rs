//! Conflict-based timetable fitness.
//!
//! Three unweighted conflict categories are counted:
//!
//! 1. **Capacity**: +1 per gene whose course has more students than its
//!    room holds.
//! 2. **Room double-booking**: genes are scanned in order; +1 for each gene
//!    whose `(room name, day, hour)` was already taken by an earlier gene.
//!    The first occupant is never penalized.
//! 3. **Professor overlap**: +1 for every *ordered* pair of distinct genes
//!    `(g, g')` taught by the same professor on the same day with
//!    `|hour(g) - hour(g')| < duration(g)`. A mutual overlap therefore
//!    counts twice, once from each side.
//!
//! Fitness is `1 / (1 + conflicts)`, in `(0, 1]`, higher is better.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::chromosome::Chromosome;
use crate::catalog::Catalog;

/// Conflict counts by category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictBreakdown {
    pub capacity: usize,
    pub room_double_booking: usize,
    pub professor_overlap: usize,
}

impl ConflictBreakdown {
    pub fn total(&self) -> usize {
        self.capacity + self.room_double_booking + self.professor_overlap
    }
}

/// Counts conflicts per category.
///
/// # Panics
/// Panics if a gene indexes past the end of a catalog list. Chromosomes
/// built by this crate for `catalog` never do.
pub fn conflict_breakdown(chromosome: &Chromosome, catalog: &Catalog) -> ConflictBreakdown {
    let courses = catalog.courses();
    let rooms = catalog.rooms();
    let timeslots = catalog.timeslots();

    let mut breakdown = ConflictBreakdown::default();
    let mut occupied: HashSet<(&str, &str, i32)> = HashSet::new();
    let mut by_professor: HashMap<&str, Vec<usize>> = HashMap::new();

    for (pos, gene) in chromosome.genes().iter().enumerate() {
        let course = &courses[gene.course];
        let room = &rooms[gene.room];
        let slot = &timeslots[gene.timeslot];

        if course.students > room.capacity {
            breakdown.capacity += 1;
        }

        if !occupied.insert((room.name.as_str(), slot.day.as_str(), slot.hour)) {
            breakdown.room_double_booking += 1;
        }

        by_professor
            .entry(course.professor.as_str())
            .or_default()
            .push(pos);
    }

    let genes = chromosome.genes();
    for positions in by_professor.values() {
        for &i in positions {
            let duration = i64::from(courses[genes[i].course].duration);
            let slot = &timeslots[genes[i].timeslot];
            for &j in positions {
                if genes[j].course == genes[i].course {
                    continue;
                }
                let other = &timeslots[genes[j].timeslot];
                if other.day == slot.day
                    && (i64::from(other.hour) - i64::from(slot.hour)).abs() < duration
                {
                    breakdown.professor_overlap += 1;
                }
            }
        }
    }

    breakdown
}

/// Total number of conflicts in `chromosome`.
pub fn count_conflicts(chromosome: &Chromosome, catalog: &Catalog) -> usize {
    conflict_breakdown(chromosome, catalog).total()
}

/// Fitness in `(0, 1]`: `1 / (1 + conflicts)`. Exactly `1.0` only for a
/// conflict-free timetable.
pub fn calculate_fitness(chromosome: &Chromosome, catalog: &Catalog) -> f64 {
    1.0 / (1.0 + count_conflicts(chromosome, catalog) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Course, Room, TimeSlot};
    use crate::ga::Gene;

    fn chromosome(catalog: &Catalog, assignment: &[(usize, usize)]) -> Chromosome {
        let genes = assignment
            .iter()
            .enumerate()
            .map(|(i, &(room, slot))| Gene::new(i, room, slot))
            .collect();
        Chromosome::from_genes(genes, catalog).unwrap()
    }

    #[test]
    fn test_conflict_free_is_one() {
        let cat = Catalog::new(
            vec![Course::new("A", "P", 10, 2), Course::new("B", "Q", 10, 2)],
            vec![Room::new("R1", 20), Room::new("R2", 20)],
            vec![TimeSlot::new("Monday", 9)],
        )
        .unwrap();
        let c = chromosome(&cat, &[(0, 0), (1, 0)]);

        assert_eq!(count_conflicts(&c, &cat), 0);
        assert_eq!(calculate_fitness(&c, &cat), 1.0);
    }

    #[test]
    fn test_capacity_scenario_bounds_fitness() {
        let cat = Catalog::new(
            vec![Course::new("A", "P", 10, 1), Course::new("B", "Q", 10, 1)],
            vec![Room::new("Small", 5)],
            vec![TimeSlot::new("Monday", 9), TimeSlot::new("Tuesday", 9)],
        )
        .unwrap();

        for assignment in [[(0, 0), (0, 0)], [(0, 0), (0, 1)], [(0, 1), (0, 0)], [(0, 1), (0, 1)]] {
            let c = chromosome(&cat, &assignment);
            let b = conflict_breakdown(&c, &cat);
            assert_eq!(b.capacity, 2);
            assert!(calculate_fitness(&c, &cat) <= 1.0 / 3.0);
        }
    }

    #[test]
    fn test_room_double_booking_penalizes_later_occupants_only() {
        let cat = Catalog::new(
            (0..3).map(|i| Course::new(format!("C{i}"), format!("P{i}"), 1, 1)).collect(),
            vec![Room::new("R1", 10)],
            vec![TimeSlot::new("Monday", 9)],
        )
        .unwrap();
        let c = chromosome(&cat, &[(0, 0), (0, 0), (0, 0)]);

        let b = conflict_breakdown(&c, &cat);
        assert_eq!(b.room_double_booking, 2);
        assert_eq!(b.capacity, 0);
        assert_eq!(b.professor_overlap, 0);
    }

    #[test]
    fn test_double_booking_keys_on_day_and_hour_not_slot_index() {
        // Two catalog slots with identical day/hour collide.
        let cat = Catalog::new(
            vec![Course::new("A", "P", 1, 1), Course::new("B", "Q", 1, 1)],
            vec![Room::new("R1", 10)],
            vec![TimeSlot::new("Monday", 9), TimeSlot::new("Monday", 9)],
        )
        .unwrap();
        let c = chromosome(&cat, &[(0, 0), (0, 1)]);
        assert_eq!(conflict_breakdown(&c, &cat).room_double_booking, 1);
    }

    #[test]
    fn test_professor_overlap_counts_each_ordered_pair() {
        let cat = Catalog::new(
            (0..3).map(|i| Course::new(format!("C{i}"), "Dr. Same", 1, 1)).collect(),
            (0..3).map(|i| Room::new(format!("R{i}"), 10)).collect(),
            vec![TimeSlot::new("Monday", 9)],
        )
        .unwrap();
        // Distinct rooms so only the professor rule fires.
        let c = chromosome(&cat, &[(0, 0), (1, 0), (2, 0)]);

        let b = conflict_breakdown(&c, &cat);
        assert_eq!(b.professor_overlap, 6, "3 courses -> 6 directional pairs");
        assert_eq!(b.total(), 6);
        assert!((calculate_fitness(&c, &cat) - 1.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_professor_overlap_uses_duration_of_first_course() {
        // A lasts 3h from 9, B lasts 1h from 11: A sees B (|2| < 3), B does not see A (|2| >= 1).
        let cat = Catalog::new(
            vec![Course::new("A", "P", 1, 3), Course::new("B", "P", 1, 1)],
            vec![Room::new("R1", 10), Room::new("R2", 10)],
            vec![TimeSlot::new("Monday", 9), TimeSlot::new("Monday", 11)],
        )
        .unwrap();
        let c = chromosome(&cat, &[(0, 0), (1, 1)]);
        assert_eq!(conflict_breakdown(&c, &cat).professor_overlap, 1);
    }

    #[test]
    fn test_professor_overlap_ignores_other_days() {
        let cat = Catalog::new(
            vec![Course::new("A", "P", 1, 4), Course::new("B", "P", 1, 4)],
            vec![Room::new("R1", 10)],
            vec![TimeSlot::new("Monday", 9), TimeSlot::new("Tuesday", 9)],
        )
        .unwrap();
        let c = chromosome(&cat, &[(0, 0), (0, 1)]);
        assert_eq!(count_conflicts(&c, &cat), 0);
    }

    #[test]
    fn test_categories_are_additive() {
        let cat = Catalog::new(
            vec![Course::new("A", "P", 50, 1), Course::new("B", "P", 50, 1)],
            vec![Room::new("R1", 10)],
            vec![TimeSlot::new("Monday", 9)],
        )
        .unwrap();
        let c = chromosome(&cat, &[(0, 0), (0, 0)]);

        let b = conflict_breakdown(&c, &cat);
        assert_eq!(b, ConflictBreakdown { capacity: 2, room_double_booking: 1, professor_overlap: 2 });
        assert!((calculate_fitness(&c, &cat) - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_fitness_is_pure() {
        let cat = Catalog::new(
            vec![Course::new("A", "P", 50, 1)],
            vec![Room::new("R1", 10)],
            vec![TimeSlot::new("Monday", 9)],
        )
        .unwrap();
        let c = chromosome(&cat, &[(0, 0)]);
        let before = c.clone();
        assert_eq!(calculate_fitness(&c, &cat), calculate_fitness(&c, &cat));
        assert_eq!(c, before);
    }
}
