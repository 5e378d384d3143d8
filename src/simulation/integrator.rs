//! Explicit-Euler step for the dust simulation
//!
//! Advances a single particle per call: velocity kick, position drift,
//! wall bounce, and render-space truncation, driven by a `KickSet`, the
//! `Engine` extents, and the per-frame `FrameSnapshot`.

use super::engine::Engine;
use super::forces::KickSet;
use super::states::{FrameSnapshot, Particle, RenderPoint};

/// Velocity factor applied by a wall bounce: reversed, 10% retained
pub const BOUNCE_DAMPING: f64 = -0.1;

/// Advance one particle by `dt` using semi-implicit Euler
///
/// The velocity is kicked first and the position drift uses the
/// already-updated velocity of this same step. Each axis then bounces
/// independently off the viewport walls: the position is clamped back
/// into `[0, width] x [0, height]` and the crossed axis's velocity is
/// reversed and damped. The truncated position lands in `out`.
pub fn euler_step(
    p: &mut Particle,
    out: &mut RenderPoint,
    forces: &KickSet,
    frame: &FrameSnapshot,
    engine: &Engine,
    dt: f64,
) {
    // Kick: v_n+1 = v_n + dv
    let dv = forces.accumulate_kicks(p, frame, dt);
    p.v += dv;

    // Drift: x_n+1 = x_n + dt * v_n+1
    p.x += p.v * dt;

    // Wall bounce, each axis independently. The clamp is written back on
    // all four branches
    if p.x.x < 0.0 {
        p.x.x = 0.0;
        p.v.x *= BOUNCE_DAMPING;
    } else if p.x.x > engine.viewport_width {
        p.x.x = engine.viewport_width;
        p.v.x *= BOUNCE_DAMPING;
    }
    if p.x.y < 0.0 {
        p.x.y = 0.0;
        p.v.y *= BOUNCE_DAMPING;
    } else if p.x.y > engine.viewport_height {
        p.x.y = engine.viewport_height;
        p.v.y *= BOUNCE_DAMPING;
    }

    // Render space truncates toward zero
    out.x = p.x.x as i32;
    out.y = p.x.y as i32;
}
