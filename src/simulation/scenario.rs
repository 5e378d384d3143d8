//! Build the fully-initialized runtime simulation from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! (`Scenario`) containing:
//! - engine settings (`Engine`)
//! - physical constants (`Parameters`)
//! - the particle population (`ParticleStore`, raster-seeded at rest)
//! - the active kick set (`KickSet`)
//!
//! The scenario is inserted into Bevy as a `Resource` and consumed by the
//! input, physics, and drawing systems

use bevy::prelude::Resource;

use crate::configuration::config::ScenarioConfig;
use crate::simulation::engine::Engine;
use crate::simulation::forces::{AttractorForce, KickSet, UniformGravity};
use crate::simulation::params::Parameters;
use crate::simulation::scheduler::{advance_store, AdvanceError};
use crate::simulation::states::{FrameSnapshot, ParticleStore, RenderPoint};

/// Bevy resource representing a fully-initialized simulation
///
/// This is the main runtime bundle constructed from a [`ScenarioConfig`]:
/// it contains the engine settings, the physical constants, the particle
/// population, and the set of active kick terms
#[derive(Resource)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub store: ParticleStore,
    pub forces: KickSet,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Self {
        // Engine (runtime) from EngineConfig
        let e_cfg = cfg.engine;
        let engine = Engine {
            particle_count: e_cfg.particle_count,
            viewport_width: e_cfg.viewport_width,
            viewport_height: e_cfg.viewport_height,
            worker_count: e_cfg.worker_count,
        };

        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            G: p_cfg.G,
            attractor_mass: p_cfg.attractor_mass,
            distance_unit: p_cfg.distance_unit,
            near_field_threshold: p_cfg.near_field_threshold,
        };

        // Population: raster scan across the viewport width, at rest
        let store = ParticleStore::seed_raster(
            engine.particle_count,
            engine.viewport_width,
            engine.viewport_height,
        );

        // Forces: pointer attraction plus uniform gravity; each term gates
        // itself on the per-frame toggles
        let forces = KickSet::new()
            .with(AttractorForce::from_params(&parameters))
            .with(UniformGravity {
                distance_unit: parameters.distance_unit,
            });

        Self {
            engine,
            parameters,
            store,
            forces,
        }
    }

    /// One full partitioned physics update
    /// Returns once every shard has finished, so render positions are
    /// never observed mid-frame
    pub fn advance(&mut self, dt: f64, frame: FrameSnapshot) -> Result<(), AdvanceError> {
        advance_store(&mut self.store, &self.forces, &frame, &self.engine, dt)
    }

    /// Truncated render-space positions, one per particle, in stable
    /// particle index order
    pub fn render_positions(&self) -> &[RenderPoint] {
        &self.store.render
    }
}
