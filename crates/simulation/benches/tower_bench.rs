//! Criterion benchmarks for the tower core.
//!
//! Benchmarks:
//!   - style resolution of the demo recommendation strings
//!   - full floor stack generation
//!   - BuildingPlan derivation from the demo assessment
//!   - 600 hazard controller frames (ten seconds at 60 Hz) per hazard
//!   - headless app frames through `TestTower`
//!
//! Run with: cargo bench -p simulation --features bench --bench tower_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use simulation::assessment::RiskAssessmentResult;
use simulation::building_plan::BuildingPlan;
use simulation::hazard_sim::{HazardController, HazardKind, SeverityTier};
use simulation::style_resolver;
use simulation::test_harness::TestTower;
use simulation::tower_geometry::generate_floors;

// ---------------------------------------------------------------------------
// Benchmark: derivation
// ---------------------------------------------------------------------------

fn bench_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("tower_derivation");
    let demo = RiskAssessmentResult::demo();

    group.bench_function("resolve_style", |b| {
        b.iter(|| {
            black_box(style_resolver::resolve(
                black_box(&demo.recommendations.material),
                black_box(&demo.recommendations.structure),
            ))
        });
    });

    group.bench_function("generate_floors", |b| {
        b.iter(|| black_box(generate_floors(black_box(&demo.geometry_params))));
    });

    group.bench_function("building_plan", |b| {
        b.iter(|| black_box(BuildingPlan::from_assessment(black_box(&demo))));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: hazard controller
// ---------------------------------------------------------------------------

fn bench_controller(c: &mut Criterion) {
    let mut group = c.benchmark_group("hazard_controller_600_frames");

    for kind in HazardKind::ALL {
        group.bench_function(kind.label(), |b| {
            b.iter(|| {
                let mut controller = HazardController::new(SeverityTier::High, SeverityTier::High);
                controller.toggle(kind);
                for frame in 0..600 {
                    controller.tick(frame as f32 / 60.0, false);
                }
                black_box(controller.visuals)
            });
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: headless app frame
// ---------------------------------------------------------------------------

fn bench_app_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("tower_app");
    group.sample_size(50);

    let mut tower = TestTower::with_demo();
    tower.toggle(HazardKind::Quake);
    group.bench_function("frame", |b| {
        b.iter(|| tower.tick());
    });

    group.finish();
}

criterion_group!(benches, bench_derivation, bench_controller, bench_app_frame);
criterion_main!(benches);
