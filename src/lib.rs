pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Particle, ParticleStore, RenderPoint, FrameSnapshot, NVec2};
pub use simulation::params::Parameters;
pub use simulation::engine::Engine;
pub use simulation::forces::{VelocityKick, KickSet, AttractorForce, UniformGravity};
pub use simulation::integrator::euler_step;
pub use simulation::scheduler::{shard_ranges, advance_store, AdvanceError};
pub use simulation::scenario::Scenario;

pub use configuration::config::{EngineConfig, ParametersConfig, ScenarioConfig};

pub use visualization::dust_vis2d::run_2d;

pub use benchmark::benchmark::bench_advance;
