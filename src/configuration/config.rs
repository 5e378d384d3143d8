//! Configuration types for loading a simulation setup from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation setup. A setup consists of:
//!
//! - [`EngineConfig`]     – structural settings (population, viewport, workers)
//! - [`ParametersConfig`] – physical constants of the force law
//! - [`ScenarioConfig`]   – top-level wrapper used to load a setup from YAML
//!
//! Every field is optional; missing fields fall back to the documented
//! defaults, so an empty file (or no file at all) yields the stock setup.
//!
//! # YAML format
//! A full setup YAML matching these types:
//!
//! ```yaml
//! engine:
//!   particle_count: 100000  # fixed population size
//!   viewport_width: 1920.0  # world extent on x
//!   viewport_height: 1080.0 # world extent on y
//!   worker_count: 8         # shards per physics update
//!
//! parameters:
//!   G: 6.673e-11              # gravitational constant
//!   attractor_mass: 6311342330065436.0 # mass assigned to the pointer (8.5^17, exact f64)
//!   distance_unit: 1.0        # world units per distance unit
//!   near_field_threshold: 150.0 # damping radius around the attractor
//! ```
//!
//! The engine then maps this configuration into its internal runtime
//! representation before the viewer starts.

use serde::Deserialize;

/// Structural engine configuration
/// Controls the shape of the simulation, not its physics
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub particle_count: usize, // fixed population size
    pub viewport_width: f64,   // world extent on x
    pub viewport_height: f64,  // world extent on y
    pub worker_count: usize,   // shards per physics update
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            particle_count: 100_000,
            viewport_width: 1920.0,
            viewport_height: 1080.0,
            worker_count: 8,
        }
    }
}

/// Physical constants of the force law
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub G: f64,                   // gravitational constant
    pub attractor_mass: f64,      // mass assigned to the pointer
    pub distance_unit: f64,       // world units per distance unit
    pub near_field_threshold: f64, // damping radius around the attractor
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            G: 6.673e-11,
            attractor_mass: 8.5f64.powi(17),
            distance_unit: 1.0,
            near_field_threshold: 150.0,
        }
    }
}

/// Top-level setup configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,         // structural settings
    pub parameters: ParametersConfig, // physical constants
}
