use std::time::Instant;

use crate::simulation::engine::Engine;
use crate::simulation::forces::{AttractorForce, KickSet, UniformGravity};
use crate::simulation::params::Parameters;
use crate::simulation::scheduler::advance_store;
use crate::simulation::states::{FrameSnapshot, ParticleStore, NVec2};

/// Throughput of the partitioned physics update across population sizes
/// and worker counts, at a fixed 60 Hz step
pub fn bench_advance() {
    // Different population sizes to test
    let ns = [10_000, 25_000, 50_000, 100_000];
    // Worker counts to sweep per population
    let workers = [1, 2, 4, 8];

    let parameters = Parameters::default();

    // Attractor parked at the viewport center, both modes active, so the
    // timed path includes every kick term
    let frame = FrameSnapshot {
        attractor: NVec2::new(960.0, 540.0),
        force_enabled: true,
        gravity_enabled: true,
    };

    let forces = KickSet::new()
        .with(AttractorForce::from_params(&parameters))
        .with(UniformGravity {
            distance_unit: parameters.distance_unit,
        });

    let dt = 1.0 / 60.0;
    let steps = 120;

    for n in ns {
        for w in workers {
            let engine = Engine {
                particle_count: n,
                worker_count: w,
                ..Engine::default()
            };

            let mut store =
                ParticleStore::seed_raster(n, engine.viewport_width, engine.viewport_height);

            // Warm up
            advance_store(&mut store, &forces, &frame, &engine, dt)
                .expect("physics update failed");

            let t0 = Instant::now();
            for _ in 0..steps {
                advance_store(&mut store, &forces, &frame, &engine, dt)
                    .expect("physics update failed");
            }
            let per_step = t0.elapsed().as_secs_f64() / steps as f64;

            println!("N = {n:6}, workers = {w}, step = {per_step:8.6} s");
        }
    }
}
