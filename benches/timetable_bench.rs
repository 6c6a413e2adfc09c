//! Criterion benchmarks for the timetabling GA.
//!
//! Uses synthetic catalogs so the numbers reflect algorithm overhead
//! rather than any particular data set.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_timetable::catalog::{Catalog, Course, Room, TimeSlot};
use u_timetable::ga::{calculate_fitness, Chromosome, CrossoverType, GaConfig, GaRunner};
use u_timetable::random::create_rng;

// ===========================================================================
// Synthetic catalog
// ===========================================================================

fn synthetic_catalog(courses: usize) -> Catalog {
    let rooms = (courses / 5).max(2);
    Catalog::new(
        (0..courses)
            .map(|i| {
                Course::new(
                    format!("Course {i}"),
                    format!("Prof {}", i % (courses / 4).max(1)),
                    15 + (i as u32 * 13) % 120,
                    1 + (i as u32) % 3,
                )
            })
            .collect(),
        (0..rooms)
            .map(|i| Room::new(format!("Room {i}"), 30 + 20 * (i as u32 % 6)))
            .collect(),
        ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]
            .iter()
            .flat_map(|d| (9..17).map(move |h| TimeSlot::new(*d, h)))
            .collect(),
    )
    .expect("synthetic catalog is non-empty")
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_fitness(c: &mut Criterion) {
    let mut group = c.benchmark_group("fitness");

    for &n in &[20usize, 80, 200] {
        let catalog = synthetic_catalog(n);
        let chromosome = Chromosome::random(&catalog, &mut create_rng(42));
        group.bench_with_input(
            BenchmarkId::from_parameter(n),
            &(catalog, chromosome),
            |b, (cat, chrom)| b.iter(|| black_box(calculate_fitness(black_box(chrom), cat))),
        );
    }
    group.finish();
}

fn bench_ga_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_run");
    group.sample_size(10);

    for (courses, pop, gen) in [(20usize, 50usize, 50usize), (80, 100, 30), (200, 100, 20)] {
        for kind in [CrossoverType::OnePoint, CrossoverType::Uniform] {
            let catalog = synthetic_catalog(courses);
            let config = GaConfig {
                population_size: pop,
                max_generations: gen,
                crossover_type: kind,
                elitism_rate: 0.1,
                seed: Some(42),
                ..GaConfig::default()
            };
            group.bench_with_input(
                BenchmarkId::new(format!("{kind}_c{courses}_p{pop}_g{gen}"), courses),
                &(catalog, config),
                |b, (cat, cfg)| {
                    b.iter(|| {
                        let record = GaRunner::run(black_box(cat), black_box(cfg));
                        black_box(record)
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_fitness, bench_ga_run);
criterion_main!(benches);
