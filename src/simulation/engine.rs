//! High-level runtime engine settings
//!
//! Fixes the population size, the viewport extent the particles bounce
//! inside, and how many worker shards each physics update is split into.
//! All of these are set at startup and never change at runtime.

#[derive(Debug, Clone)]
pub struct Engine {
    pub particle_count: usize, // fixed population size
    pub viewport_width: f64, // world extent on x
    pub viewport_height: f64, // world extent on y
    pub worker_count: usize, // shards per physics update
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            particle_count: 100_000,
            viewport_width: 1920.0,
            viewport_height: 1080.0,
            worker_count: 8,
        }
    }
}
