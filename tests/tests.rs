use dustsim::simulation::engine::Engine;
use dustsim::simulation::forces::{AttractorForce, KickSet, UniformGravity, VelocityKick};
use dustsim::simulation::params::Parameters;
use dustsim::simulation::scheduler::{advance_store, shard_ranges, AdvanceError};
use dustsim::simulation::states::{FrameSnapshot, NVec2, Particle, ParticleStore, RenderPoint};

/// Engine sized for tests: 1920x1080 walls, explicit count/workers
pub fn test_engine(count: usize, workers: usize) -> Engine {
    Engine {
        particle_count: count,
        viewport_width: 1920.0,
        viewport_height: 1080.0,
        worker_count: workers,
    }
}

/// Default physical constants for tests
pub fn test_params() -> Parameters {
    Parameters::default()
}

/// Build the full kick set (attraction + gravity)
pub fn kick_set(p: &Parameters) -> KickSet {
    KickSet::new()
        .with(AttractorForce::from_params(p))
        .with(UniformGravity {
            distance_unit: p.distance_unit,
        })
}

/// Store with explicit particle states; render buffer seeded to match
pub fn store_from(particles: Vec<Particle>) -> ParticleStore {
    let render = particles
        .iter()
        .map(|p| RenderPoint {
            x: p.x.x as i32,
            y: p.x.y as i32,
        })
        .collect();
    ParticleStore { particles, render }
}

pub fn particle(x: (f64, f64), v: (f64, f64)) -> Particle {
    Particle {
        x: NVec2::new(x.0, x.1),
        v: NVec2::new(v.0, v.1),
    }
}

pub fn frame(attractor: (f64, f64), force: bool, gravity: bool) -> FrameSnapshot {
    FrameSnapshot {
        attractor: NVec2::new(attractor.0, attractor.1),
        force_enabled: force,
        gravity_enabled: gravity,
    }
}

// ==================================================================================
// Partition tests
// ==================================================================================

#[test]
fn partition_covers_every_index() {
    let cases = [(10, 3), (100_000, 8), (7, 8), (0, 4), (9, 1), (1_000, 7), (5, 0)];

    for (count, workers) in cases {
        let ranges = shard_ranges(count, workers);

        assert_eq!(ranges.len(), workers.max(1), "one shard per worker");
        assert_eq!(ranges.first().unwrap().start, 0);
        assert_eq!(ranges.last().unwrap().end, count);

        // Contiguous and non-overlapping: each shard starts where the
        // previous one ended
        for pair in ranges.windows(2) {
            assert_eq!(
                pair[0].end, pair[1].start,
                "gap or overlap for count={count}, workers={workers}"
            );
        }

        let total: usize = ranges.iter().map(|r| r.len()).sum();
        assert_eq!(total, count, "shards must cover exactly [0, count)");
    }
}

#[test]
fn partition_remainder_goes_to_last_shard() {
    let ranges = shard_ranges(10, 3);
    assert_eq!(ranges, vec![0..3, 3..6, 6..10]);
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn boundary_clamp_all_four_walls() {
    // Four particles, each about to cross a different wall. Both modes off
    // so the step is pure drift + bounce. Three workers so the update also
    // exercises an uneven partition.
    let mut store = store_from(vec![
        particle((1.0, 540.0), (-300.0, 0.0)),    // crosses x = 0
        particle((1919.0, 540.0), (300.0, 0.0)),  // crosses x = 1920
        particle((960.0, 1.0), (0.0, -300.0)),    // crosses y = 0
        particle((960.0, 1079.0), (0.0, 300.0)),  // crosses y = 1080
    ]);

    let engine = test_engine(4, 3);
    let forces = kick_set(&test_params());
    advance_store(&mut store, &forces, &frame((0.0, 0.0), false, false), &engine, 0.01)
        .expect("update failed");

    let p = &store.particles;

    assert_eq!(p[0].x.x, 0.0, "low x wall clamps to exactly 0");
    assert_eq!(p[0].v.x, -300.0 * -0.1);

    assert_eq!(p[1].x.x, 1920.0, "high x wall clamps to the extent");
    assert_eq!(p[1].v.x, 300.0 * -0.1);

    assert_eq!(p[2].x.y, 0.0, "low y wall clamps to exactly 0");
    assert_eq!(p[2].v.y, -300.0 * -0.1);

    assert_eq!(p[3].x.y, 1080.0, "high y wall clamps to the extent");
    assert_eq!(p[3].v.y, 300.0 * -0.1);

    // Untouched axes keep their state
    assert_eq!(p[0].x.y, 540.0);
    assert_eq!(p[0].v.y, 0.0);
}

#[test]
fn zero_force_idempotence() {
    // Both modes off and zero velocity: any number of steps with any dt
    // must leave every position untouched
    let mut store = ParticleStore::seed_raster(100, 1920.0, 1080.0);
    let initial = store.clone();

    let engine = test_engine(100, 4);
    let forces = kick_set(&test_params());
    let f = frame((300.0, 300.0), false, false);

    for dt in [0.016, 1.0, 123.0, 1e-9] {
        for _ in 0..10 {
            advance_store(&mut store, &forces, &f, &engine, dt).expect("update failed");
        }
    }

    for (a, b) in store.particles.iter().zip(initial.particles.iter()) {
        assert_eq!(a.x, b.x, "position drifted with no forces and no velocity");
        assert_eq!(a.v, b.v);
    }
}

#[test]
fn division_safety_at_attractor() {
    // Attractor placed exactly on the particle: the force direction is
    // undefined and must yield a zero kick, never NaN/inf
    let mut store = store_from(vec![particle((960.0, 540.0), (3.0, 4.0))]);

    let engine = test_engine(1, 1);
    let forces = kick_set(&test_params());
    let f = frame((960.0, 540.0), true, false);

    for _ in 0..50 {
        advance_store(&mut store, &forces, &f, &engine, 0.016).expect("update failed");

        let p = &store.particles[0];
        assert!(p.x.x.is_finite() && p.x.y.is_finite(), "position went non-finite");
        assert!(p.v.x.is_finite() && p.v.y.is_finite(), "velocity went non-finite");
    }
}

#[test]
fn gravity_accumulation_is_distance_independent() {
    // Gravity only, one step of dt = 1 from rest: vy = 50 * 9.82,
    // no matter how far the attractor is
    let mut store = store_from(vec![
        particle((960.0, 100.0), (0.0, 0.0)), // far from the attractor
        particle((960.0, 540.0), (0.0, 0.0)), // exactly on the attractor
    ]);

    let engine = test_engine(2, 2);
    let forces = kick_set(&test_params());
    advance_store(&mut store, &forces, &frame((960.0, 540.0), false, true), &engine, 1.0)
        .expect("update failed");

    let expected = 50.0 * 9.82;
    for p in &store.particles {
        assert!(
            (p.v.y - expected).abs() < 1e-12,
            "expected vy = {expected}, got {}",
            p.v.y
        );
        assert_eq!(p.v.x, 0.0);
    }

    // Position drift used the already-updated velocity (semi-implicit Euler)
    assert!(
        (store.particles[0].x.y - (100.0 + expected)).abs() < 1e-9,
        "position must integrate the post-kick velocity"
    );
}

#[test]
fn near_field_damping_reduces_speed() {
    // Inside the 150-unit threshold the force mode damps instead of
    // attracting: speed must go down, not up
    let mut store = store_from(vec![particle((970.0, 540.0), (25.0, -40.0))]);
    let speed_before = store.particles[0].v.norm();

    let engine = test_engine(1, 1);
    let forces = kick_set(&test_params());
    advance_store(&mut store, &forces, &frame((960.0, 540.0), true, false), &engine, 0.01)
        .expect("update failed");

    let speed_after = store.particles[0].v.norm();
    assert!(
        speed_after < speed_before,
        "near-field step increased speed: {speed_before} -> {speed_after}"
    );
}

#[test]
fn far_field_attraction_pulls_toward_attractor() {
    // Outside the threshold the particle gains velocity toward the pointer
    let mut store = store_from(vec![particle((100.0, 540.0), (0.0, 0.0))]);

    let engine = test_engine(1, 1);
    let forces = kick_set(&test_params());
    advance_store(&mut store, &forces, &frame((960.0, 540.0), true, false), &engine, 0.016)
        .expect("update failed");

    let p = &store.particles[0];
    assert!(p.v.x > 0.0, "attraction must point at the attractor");
    assert_eq!(p.v.y, 0.0, "no lateral component on the axis-aligned pull");
}

// ==================================================================================
// Scheduler tests
// ==================================================================================

#[test]
fn bad_dt_is_a_noop() {
    let mut store = ParticleStore::seed_raster(50, 1920.0, 1080.0);
    let initial = store.clone();

    let engine = test_engine(50, 4);
    let forces = kick_set(&test_params());
    let f = frame((960.0, 540.0), true, true);

    for dt in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -1.0, 0.0] {
        advance_store(&mut store, &forces, &f, &engine, dt).expect("update failed");
    }

    for (a, b) in store.particles.iter().zip(initial.particles.iter()) {
        assert_eq!(a.x, b.x, "anomalous dt must not move particles");
        assert_eq!(a.v, b.v, "anomalous dt must not kick velocities");
    }
}

#[test]
fn determinism_across_runs() {
    let run = || {
        let mut store = ParticleStore::seed_raster(1_000, 1920.0, 1080.0);
        let engine = test_engine(1_000, 4);
        let forces = kick_set(&test_params());

        for k in 0..20 {
            let kf = k as f64;
            let f = frame(
                (960.0 + 200.0 * (kf * 0.1).sin(), 540.0 + 200.0 * (kf * 0.2).cos()),
                true,
                k % 3 == 0,
            );
            let dt = 0.016 + 0.001 * (k % 5) as f64;
            advance_store(&mut store, &forces, &f, &engine, dt).expect("update failed");
        }

        store
    };

    let a = run();
    let b = run();

    for (pa, pb) in a.particles.iter().zip(b.particles.iter()) {
        assert_eq!(pa.x, pb.x, "positions must be bit-identical across runs");
        assert_eq!(pa.v, pb.v, "velocities must be bit-identical across runs");
    }
    assert_eq!(a.render, b.render);
}

/// A kick term that always fails, standing in for a worker dying mid-update
struct ExplodingKick;

impl VelocityKick for ExplodingKick {
    fn kick(&self, _p: &Particle, _frame: &FrameSnapshot, _dt: f64) -> NVec2 {
        panic!("kick term failed");
    }
}

#[test]
fn worker_panic_is_reported_not_hung() {
    let mut store = ParticleStore::seed_raster(16, 1920.0, 1080.0);
    let engine = test_engine(16, 4);
    let forces = KickSet::new().with(ExplodingKick);

    // Every shard dies on its first particle; the barrier must still join
    // them all and surface the failure instead of hanging or unwinding
    let result = advance_store(
        &mut store,
        &forces,
        &frame((960.0, 540.0), true, true),
        &engine,
        0.016,
    );

    assert!(matches!(result, Err(AdvanceError::WorkerPanicked)));
}

#[test]
fn workers_exceeding_population_degrade_gracefully() {
    // 3 particles, 8 workers: most shards are empty, the last one owns all
    let mut store = store_from(vec![
        particle((100.0, 100.0), (0.0, 0.0)),
        particle((200.0, 200.0), (0.0, 0.0)),
        particle((300.0, 300.0), (0.0, 0.0)),
    ]);

    let engine = test_engine(3, 8);
    let forces = kick_set(&test_params());
    advance_store(&mut store, &forces, &frame((960.0, 540.0), false, true), &engine, 0.5)
        .expect("update failed");

    for p in &store.particles {
        assert!(p.v.y > 0.0, "every particle must still be stepped");
    }
}

#[test]
fn empty_population_is_fine() {
    let mut store = store_from(vec![]);
    let engine = test_engine(0, 8);
    let forces = kick_set(&test_params());

    advance_store(&mut store, &forces, &frame((0.0, 0.0), true, true), &engine, 0.016)
        .expect("update failed");
    assert!(store.is_empty());
}

// ==================================================================================
// Store / render tests
// ==================================================================================

#[test]
fn raster_seed_layout() {
    let store = ParticleStore::seed_raster(1_925, 1920.0, 1080.0);

    assert_eq!(store.len(), 1_925);
    assert_eq!(store.particles[0].x, NVec2::new(0.0, 1080.0));
    assert_eq!(store.particles[5].x, NVec2::new(5.0, 1080.0));
    // Wraps to the next row after one viewport width
    assert_eq!(store.particles[1920].x, NVec2::new(0.0, 1079.0));
    assert_eq!(store.particles[1924].x, NVec2::new(4.0, 1079.0));

    for p in &store.particles {
        assert_eq!(p.v, NVec2::zeros(), "particles start at rest");
    }

    for (p, r) in store.particles.iter().zip(store.render.iter()) {
        assert_eq!(r.x, p.x.x as i32);
        assert_eq!(r.y, p.x.y as i32);
    }
}

#[test]
fn render_positions_truncate_toward_zero() {
    let mut store = store_from(vec![particle((10.9, 20.7), (0.0, 0.0))]);
    // Stale render state gets overwritten by the next update
    store.render[0] = RenderPoint { x: -1, y: -1 };

    let engine = test_engine(1, 1);
    let forces = kick_set(&test_params());
    advance_store(&mut store, &forces, &frame((0.0, 0.0), false, false), &engine, 1e-9)
        .expect("update failed");

    assert_eq!(store.render[0], RenderPoint { x: 10, y: 20 });
}

// ==================================================================================
// Scenario tests
// ==================================================================================

#[test]
fn scenario_builds_and_advances_from_config() {
    use dustsim::{Scenario, ScenarioConfig};

    let mut cfg = ScenarioConfig::default();
    cfg.engine.particle_count = 256;
    cfg.engine.worker_count = 3;

    let mut scenario = Scenario::build_scenario(cfg);
    assert_eq!(scenario.render_positions().len(), 256);

    scenario
        .advance(0.016, frame((960.0, 540.0), true, true))
        .expect("update failed");
    assert_eq!(scenario.render_positions().len(), 256);

    for r in scenario.render_positions() {
        assert!(r.x >= 0 && r.x <= 1920);
        assert!(r.y >= 0 && r.y <= 1080);
    }
}
