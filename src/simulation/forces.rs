//! Velocity-kick contributors for the dust simulation
//!
//! Defines the per-particle force field: pointer attraction with
//! near-field damping, and uniform downward gravity. Each term implements
//! [`VelocityKick`] and their contributions are summed by a [`KickSet`].
//!
//! Terms produce velocity deltas rather than raw accelerations because the
//! near-field damping rule depends on the particle's current velocity.

use crate::simulation::params::Parameters;
use crate::simulation::states::{FrameSnapshot, Particle, NVec2};

/// Downward gravitational acceleration, distance units / s^2
pub const GRAVITY: f64 = 9.82;

/// Screen-scale multiplier applied to `GRAVITY`
pub const GRAVITY_SCALE: f64 = 50.0;

/// Fraction of velocity shed per second inside the near-field radius
pub const NEAR_FIELD_DECAY: f64 = 0.5;

/// Collection of velocity-kick terms (attraction, gravity, etc.)
/// Each term implements [`VelocityKick`] and their contributions are summed
/// into a single per-particle velocity delta
pub struct KickSet {
    terms: Vec<Box<dyn VelocityKick + Send + Sync>>,
}

impl KickSet {
    /// Create an empty kick set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add a kick term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: VelocityKick + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Total velocity delta for one particle over `dt`
    /// - the sum of contributions from all terms; zero when every term is
    ///   toggled off for this frame
    pub fn accumulate_kicks(&self, p: &Particle, frame: &FrameSnapshot, dt: f64) -> NVec2 {
        let mut dv = NVec2::zeros();
        // Iterate over all kick contributors
        for term in &self.terms {
            dv += term.kick(p, frame, dt);
        }
        dv
    }
}

/// Trait for velocity-kick sources operating on a single [`Particle`]
/// Implementations return their own delta; gating on the frame toggles is
/// each term's responsibility
pub trait VelocityKick {
    fn kick(&self, p: &Particle, frame: &FrameSnapshot, dt: f64) -> NVec2;
}

/// Attraction toward the pointer with near-field damping
///
/// Outside `near_field_threshold` the particle is pulled along the unit
/// vector toward the attractor with magnitude `G * M / (r * unit)`, an
/// overall 1/r^2 falloff on the applied kick. Inside the threshold the
/// attraction is replaced by a velocity-decay term, which keeps particles
/// from ringing around the singularity of the force law.
pub struct AttractorForce {
    pub G: f64, // gravitational constant
    pub attractor_mass: f64, // mass assigned to the pointer
    pub distance_unit: f64, // world units per distance unit
    pub near_field_threshold: f64, // damping radius around the attractor
}

impl AttractorForce {
    pub fn from_params(params: &Parameters) -> Self {
        Self {
            G: params.G,
            attractor_mass: params.attractor_mass,
            distance_unit: params.distance_unit,
            near_field_threshold: params.near_field_threshold,
        }
    }
}

impl VelocityKick for AttractorForce {
    fn kick(&self, p: &Particle, frame: &FrameSnapshot, dt: f64) -> NVec2 {
        if !frame.force_enabled {
            return NVec2::zeros();
        }

        // d points from the particle toward the attractor
        let d = frame.attractor - p.x;
        let r = d.norm();

        // Coincident with the attractor the direction is undefined; a
        // non-finite kick here would corrupt the particle permanently
        if r == 0.0 {
            return NVec2::zeros();
        }

        if r > self.near_field_threshold {
            // f = G * M / (r * unit), applied along the unit vector d / r
            let f = (self.G * self.attractor_mass) / (r * self.distance_unit);
            d * (f / r) * dt
        } else {
            // Near-field damping: shed velocity instead of attracting
            -p.v * NEAR_FIELD_DECAY * dt
        }
    }
}

/// Uniform downward gravity, independent of attractor distance
pub struct UniformGravity {
    pub distance_unit: f64, // world units per distance unit
}

impl VelocityKick for UniformGravity {
    fn kick(&self, _p: &Particle, frame: &FrameSnapshot, dt: f64) -> NVec2 {
        if !frame.gravity_enabled {
            return NVec2::zeros();
        }
        NVec2::new(0.0, GRAVITY_SCALE * GRAVITY / self.distance_unit * dt)
    }
}
