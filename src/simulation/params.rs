//! Physical constants for the simulation
//!
//! `Parameters` holds the force-law constants:
//! - gravitational constant `G` and the mass assigned to the pointer,
//! - the distance-unit scale,
//! - the near-field damping threshold around the attractor

#[derive(Debug, Clone)]
pub struct Parameters {
    pub G: f64, // gravitational constant
    pub attractor_mass: f64, // mass assigned to the pointer
    pub distance_unit: f64, // world units per distance unit
    pub near_field_threshold: f64, // damping radius around the attractor
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            G: 6.673e-11,
            attractor_mass: 8.5f64.powi(17),
            distance_unit: 1.0,
            near_field_threshold: 150.0,
        }
    }
}
