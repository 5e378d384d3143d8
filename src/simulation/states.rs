//! Core state types for the dust simulation.
//!
//! Defines:
//! - `Particle` physical state (position, velocity) in double precision
//! - `RenderPoint` the integer render-space position derived each frame
//! - `ParticleStore` the fixed population plus its render buffer
//! - `FrameSnapshot` the immutable per-frame inputs (attractor + toggles)
//!
//! The population is created once at startup and never grows or shrinks.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone)]
pub struct Particle {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
}

/// Truncated integer position handed to the renderer. One per particle,
/// same index, recomputed every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderPoint {
    pub x: i32,
    pub y: i32,
}

/// Per-frame inputs, snapshotted once before dispatch and passed by value.
/// Workers read the same copy for the whole update, so a toggle can never
/// flip mid-frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameSnapshot {
    pub attractor: NVec2, // last known pointer position
    pub force_enabled: bool, // directed force toggle
    pub gravity_enabled: bool, // uniform gravity toggle
}

/// The full particle population and its render-space mirror.
/// `particles[i]` and `render[i]` always refer to the same particle.
#[derive(Debug, Clone)]
pub struct ParticleStore {
    pub particles: Vec<Particle>,
    pub render: Vec<RenderPoint>,
}

impl ParticleStore {
    /// Seed `count` particles at rest in a raster scan across the viewport:
    /// particle `i` starts at `(i % width, height - i / width)`, filling the
    /// bottom edge first and wrapping upward row by row.
    pub fn seed_raster(count: usize, width: f64, height: f64) -> Self {
        let row = (width as usize).max(1);
        let mut particles = Vec::with_capacity(count);
        let mut render = Vec::with_capacity(count);

        for i in 0..count {
            let x = (i % row) as f64;
            let y = height - (i / row) as f64;
            particles.push(Particle {
                x: NVec2::new(x, y),
                v: NVec2::zeros(),
            });
            render.push(RenderPoint {
                x: x as i32,
                y: y as i32,
            });
        }

        Self { particles, render }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
