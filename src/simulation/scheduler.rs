//! Static partitioning and per-frame fork-join dispatch
//!
//! Splits the particle index range into contiguous, disjoint shards and
//! runs one scoped worker thread per shard, joining them all before
//! returning. Each worker receives mutable slices covering only its own
//! shard, so the particle array needs no locks: disjoint ownership is
//! enforced by `split_at_mut` rather than by convention.

use std::ops::Range;
use std::thread;

use thiserror::Error;

use super::engine::Engine;
use super::forces::KickSet;
use super::integrator::euler_step;
use super::states::{FrameSnapshot, ParticleStore};

/// Failure of a single physics update
#[derive(Debug, Error)]
pub enum AdvanceError {
    #[error("worker thread panicked during the physics update")]
    WorkerPanicked,
}

/// Contiguous, disjoint shard ranges covering exactly `[0, count)`
///
/// `shard = count / workers` (integer division); shard `i` covers
/// `[i * shard, (i + 1) * shard)` and the last shard absorbs any
/// remainder, so uneven divisions never drop particles. A worker count
/// of zero is treated as one.
pub fn shard_ranges(count: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let shard = count / workers;

    (0..workers)
        .map(|i| {
            let start = i * shard;
            let end = if i + 1 == workers { count } else { start + shard };
            start..end
        })
        .collect()
}

/// Run one full physics update over the store
///
/// Fans out one worker per shard, each stepping every particle in its
/// range in increasing index order, and returns only once every worker
/// has joined. No partial results are visible outside the barrier.
///
/// A non-finite or non-positive `dt` (clock anomaly) makes the whole
/// update a no-op rather than feeding the integrator garbage. A panicked
/// worker is reported as [`AdvanceError::WorkerPanicked`] after the
/// remaining workers have joined; the barrier never hangs.
pub fn advance_store(
    store: &mut ParticleStore,
    forces: &KickSet,
    frame: &FrameSnapshot,
    engine: &Engine,
    dt: f64,
) -> Result<(), AdvanceError> {
    if !dt.is_finite() || dt <= 0.0 {
        return Ok(());
    }

    let ranges = shard_ranges(store.len(), engine.worker_count);

    thread::scope(|s| {
        let mut tail_p = store.particles.as_mut_slice();
        let mut tail_r = store.render.as_mut_slice();
        let mut handles = Vec::with_capacity(ranges.len());

        // Peel one disjoint particle/render slice pair off per shard
        for range in &ranges {
            let (shard_p, rest_p) = std::mem::take(&mut tail_p).split_at_mut(range.len());
            let (shard_r, rest_r) = std::mem::take(&mut tail_r).split_at_mut(range.len());
            tail_p = rest_p;
            tail_r = rest_r;

            handles.push(s.spawn(move || {
                for (particle, point) in shard_p.iter_mut().zip(shard_r.iter_mut()) {
                    euler_step(particle, point, forces, frame, engine, dt);
                }
            }));
        }

        // Full barrier: every shard joins before the frame may draw
        let mut failed = false;
        for handle in handles {
            if handle.join().is_err() {
                failed = true;
            }
        }

        if failed {
            Err(AdvanceError::WorkerPanicked)
        } else {
            Ok(())
        }
    })
}
