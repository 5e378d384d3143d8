use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::simulation::scenario::Scenario;
use crate::simulation::states::{FrameSnapshot, NVec2};

/// Component tagging each quad with its particle index into Scenario.store
#[derive(Component)]
struct ParticleIndex(pub usize);

/// Pointer-driven simulation inputs, written only by the input system and
/// snapshotted into a [`FrameSnapshot`] before each physics update
#[derive(Resource)]
struct PointerState {
    attractor: NVec2,
    force_enabled: bool,
    gravity_enabled: bool,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            attractor: NVec2::zeros(),
            force_enabled: false,
            gravity_enabled: false,
        }
    }
}

/// Particle quad side length in pixels
const PARTICLE_SIZE: f32 = 2.0;

/// Bright / dim channel levels of the particle palette
const COLOR_MAX: f32 = 200.0 / 255.0;
const COLOR_MIN: f32 = 10.0 / 255.0;

/// Per-frame dimming applied to the previous frame, producing the trails
const FADE_ALPHA: f32 = 20.0 / 255.0;

fn particle_color(gravity: bool) -> Color {
    Color::srgb(
        COLOR_MIN,
        if gravity { COLOR_MAX * 0.2 } else { COLOR_MIN * 0.6 },
        if gravity { COLOR_MIN * 0.3 } else { COLOR_MAX * 0.4 },
    )
}

pub fn run_2d(scenario: Scenario) {
    println!("run_2d: starting Bevy 2D viewer with {} particles", scenario.store.len());

    let width = scenario.engine.viewport_width as f32;
    let height = scenario.engine.viewport_height as f32;

    App::new()
        .insert_resource(scenario)
        .init_resource::<PointerState>()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "dustsim".into(),
                resolution: (width, height).into(),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .add_systems(Startup, setup_particles_system)
        .add_systems(
            Update,
            (
                trail_accumulation_system,
                pointer_input_system,
                physics_step_system,
                sync_transforms_system,
                recolor_system,
            )
                .chain(),
        )
        .run();
}

/// Startup system: spawn camera, fade overlay, and one quad per particle
fn setup_particles_system(mut commands: Commands, scenario: Res<Scenario>) {
    // 2D camera. The first frame clears to black; after that clearing is
    // disabled so the previous frame persists and the fade overlay turns
    // motion into trails (the swapchain's initial contents are undefined,
    // so starting with no clear can present garbage)
    commands.spawn(Camera2dBundle {
        camera: Camera {
            clear_color: ClearColorConfig::Custom(Color::srgb(0.0, 0.0, 0.0)),
            ..Default::default()
        },
        ..Default::default()
    });

    let width = scenario.engine.viewport_width as f32;
    let height = scenario.engine.viewport_height as f32;

    // Translucent black overlay drawn under the particles every frame,
    // dimming whatever the last frame left behind
    commands.spawn(SpriteBundle {
        sprite: Sprite {
            color: Color::srgba(0.0, 0.0, 0.0, FADE_ALPHA),
            custom_size: Some(Vec2::new(width, height)),
            ..Default::default()
        },
        transform: Transform::from_xyz(0.0, 0.0, 0.0),
        ..Default::default()
    });

    // One quad per particle, above the fade overlay
    let color = particle_color(false);
    for (i, point) in scenario.render_positions().iter().enumerate() {
        commands.spawn((
            SpriteBundle {
                sprite: Sprite {
                    color,
                    custom_size: Some(Vec2::splat(PARTICLE_SIZE)),
                    ..Default::default()
                },
                transform: Transform::from_xyz(
                    point.x as f32 - width / 2.0,
                    height / 2.0 - point.y as f32,
                    1.0,
                ),
                ..Default::default()
            },
            ParticleIndex(i),
        ));
    }
}

/// Stop clearing once the first frame has been presented, letting trails
/// accumulate from a known-black background
fn trail_accumulation_system(mut cameras: Query<&mut Camera>, mut frames: Local<u32>) {
    *frames += 1;
    // Update runs before this frame is rendered, so the flip must wait for
    // the second update: frame one still clears, frame two starts the trails
    if *frames == 2 {
        for mut camera in &mut cameras {
            camera.clear_color = ClearColorConfig::None;
        }
    }
}

/// Track the cursor and toggle the force/gravity modes on clicks
fn pointer_input_system(
    windows: Query<&Window, With<PrimaryWindow>>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut pointer: ResMut<PointerState>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };

    // Window coordinates are top-left origin, same as simulation space
    if let Some(cursor) = window.cursor_position() {
        pointer.attractor = NVec2::new(cursor.x as f64, cursor.y as f64);
    }

    if buttons.just_pressed(MouseButton::Left) {
        pointer.force_enabled = !pointer.force_enabled;
        info!(
            "force toggled {} at ({:.0}, {:.0})",
            if pointer.force_enabled { "on" } else { "off" },
            pointer.attractor.x,
            pointer.attractor.y,
        );
    }
    if buttons.just_pressed(MouseButton::Right) {
        pointer.gravity_enabled = !pointer.gravity_enabled;
        info!(
            "gravity toggled {}",
            if pointer.gravity_enabled { "on" } else { "off" },
        );
    }
}

/// Run one partitioned physics update with this frame's inputs
fn physics_step_system(
    mut scenario: ResMut<Scenario>,
    pointer: Res<PointerState>,
    time: Res<Time>,
) {
    // Snapshot the inputs once; workers never see a toggle flip mid-update
    let frame = FrameSnapshot {
        attractor: pointer.attractor,
        force_enabled: pointer.force_enabled,
        gravity_enabled: pointer.gravity_enabled,
    };

    if let Err(err) = scenario.advance(time.delta_seconds_f64(), frame) {
        // The store keeps its last consistent state; draw that instead
        error!("physics update failed: {err}");
    }
}

/// Copy the render positions into the particle quads' transforms
fn sync_transforms_system(
    scenario: Res<Scenario>,
    mut query: Query<(&ParticleIndex, &mut Transform)>,
) {
    let width = scenario.engine.viewport_width as f32;
    let height = scenario.engine.viewport_height as f32;
    let points = scenario.render_positions();

    for (ParticleIndex(i), mut transform) in &mut query {
        if let Some(p) = points.get(*i) {
            transform.translation.x = p.x as f32 - width / 2.0;
            transform.translation.y = height / 2.0 - p.y as f32;
        }
    }
}

/// Swap the particle palette when the gravity toggle changes
fn recolor_system(
    pointer: Res<PointerState>,
    mut was_gravity: Local<bool>,
    mut query: Query<&mut Sprite, With<ParticleIndex>>,
) {
    if pointer.gravity_enabled == *was_gravity {
        return;
    }
    *was_gravity = pointer.gravity_enabled;

    let color = particle_color(pointer.gravity_enabled);
    for mut sprite in &mut query {
        sprite.color = color;
    }
}
