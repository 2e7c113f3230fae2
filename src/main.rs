//! Arcade - headless demo of the arcade character controls
//!
//! Builds a small level, drives a player node through it with scripted key
//! presses and logs where it ends up.
//!
//! Usage: `arcade [SETTINGS.toml] [--save]`

mod settings;

use anyhow::{Context, Result};
use arcade_core::{GameTime, Transform, Vec2, Vec3};
use arcade_game::{ArcadeController, CameraController};
use arcade_scene::{MeshShape, NodeId, NodeKind, SceneGraph};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use winit::event::ElementState;
use winit::keyboard::{Key, NamedKey};

use settings::DemoSettings;

/// Nodes of the demo level the driver refers to
struct Level {
    player: NodeId,
    step: NodeId,
}

fn build_level(scene: &mut SceneGraph) -> Result<Level> {
    // Top face at y = 0
    scene.spawn(
        "ground",
        NodeKind::Mesh(MeshShape::cuboid(Vec3::new(40.0, 1.0, 40.0))),
        Transform::from_position(Vec3::new(0.0, -0.5, 0.0)),
    );

    let walls = scene.spawn("walls", NodeKind::Group, Transform::default());
    for (name, position, size) in [
        ("north wall", Vec3::new(0.0, 1.5, -8.0), Vec3::new(16.0, 3.0, 0.5)),
        ("south wall", Vec3::new(0.0, 1.5, 8.0), Vec3::new(16.0, 3.0, 0.5)),
        ("east wall", Vec3::new(8.0, 1.5, 0.0), Vec3::new(0.5, 3.0, 16.0)),
        ("west wall", Vec3::new(-8.0, 1.5, 0.0), Vec3::new(0.5, 3.0, 16.0)),
    ] {
        scene
            .spawn_child(
                walls,
                name,
                NodeKind::Mesh(MeshShape::cuboid(size)),
                Transform::from_position(position),
            )
            .context("building walls")?;
    }

    let step = scene.spawn(
        "step",
        NodeKind::Mesh(MeshShape::cuboid(Vec3::new(2.0, 0.3, 2.0))),
        Transform::from_position(Vec3::new(0.0, 0.15, -4.0)),
    );

    let lights = scene.spawn("lights", NodeKind::Group, Transform::default());
    let lamp = scene
        .spawn_child(
            lights,
            "lamp",
            NodeKind::Light,
            Transform::from_position(Vec3::new(3.0, 2.5, 3.0)),
        )
        .context("building lights")?;
    scene
        .spawn_child(
            lamp,
            "lamp shade",
            NodeKind::Mesh(MeshShape::ball(0.25)),
            Transform::default(),
        )
        .context("building lights")?;
    scene.spawn(
        "pillar",
        NodeKind::Mesh(MeshShape::cylinder(3.0, 0.4)),
        Transform::from_position(Vec3::new(-4.0, 1.5, -2.0)),
    );

    let player = scene.spawn(
        "player",
        NodeKind::Group,
        Transform::from_position(Vec3::new(0.0, 1.0, 0.0)),
    );
    scene
        .spawn_child(
            player,
            "avatar",
            NodeKind::Mesh(MeshShape::cylinder(2.0, 0.25)),
            Transform::default(),
        )
        .context("building player")?;

    Ok(Level { player, step })
}

/// Key events the script sends at a given tick
fn scripted_keys(tick: u32, ticks: u32) -> Vec<(Key, ElementState)> {
    let w = || Key::Character("w".into());
    let d = || Key::Character("d".into());
    let space = || Key::Named(NamedKey::Space);

    let quarter = (ticks / 4).max(1);
    match tick {
        0 => vec![(w(), ElementState::Pressed)],
        t if t == quarter => vec![(space(), ElementState::Pressed)],
        t if t == quarter + 1 => vec![(space(), ElementState::Released)],
        t if t == 2 * quarter => vec![(w(), ElementState::Released), (d(), ElementState::Pressed)],
        t if t == 3 * quarter => vec![(w(), ElementState::Pressed)],
        _ => Vec::new(),
    }
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    let mut path = None;
    let mut save = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--save" => save = true,
            _ => path = Some(std::path::PathBuf::from(arg)),
        }
    }

    let settings = match &path {
        Some(path) => DemoSettings::load_from(path),
        None => DemoSettings::load(),
    };
    if save {
        match &path {
            Some(path) => settings.save_to(path),
            None => settings.save(),
        }
        .context("saving settings")?;
    }

    info!("Starting arcade demo...");

    let mut scene = SceneGraph::new();
    let level = build_level(&mut scene)?;
    info!(nodes = scene.len(), "level built");

    let mut camera = CameraController::with_config(settings.camera.clone());
    // Swing the view a little to the right before starting.
    camera.handle_mouse_look(Vec2::new(60.0, 0.0));

    let mut controller =
        ArcadeController::new(&scene, level.player, camera, settings.controls.clone())
            .context("creating controller")?;
    let mut time = GameTime::new(settings.time.clone());

    let ticks = settings.demo.ticks;
    let focus_lost = ticks * 3 / 4 + ticks / 16;
    let focus_regained = focus_lost + ticks / 16;
    for tick in 0..ticks {
        for (key, state) in scripted_keys(tick, ticks) {
            controller.handle_keyboard(&key, state);
        }
        if tick == ticks / 2 {
            controller
                .camera_mut()
                .handle_mouse_look(Vec2::new(-120.0, 0.0));
        }
        // Simulated focus loss: key-up events are lost, so drop every held
        // key and freeze the clock until focus returns.
        if tick == focus_lost {
            info!(tick, "focus lost");
            controller.release_all_keys();
            time.pause();
        }
        if tick == focus_regained {
            info!(tick, "focus regained");
            time.resume();
            controller.handle_keyboard(&Key::Character("d".into()), ElementState::Pressed);
        }

        time.update(settings.demo.tick_ms);
        controller.on_tick(&mut scene, time.total_ms, time.delta_ms);

        if tick % 30 == 0 {
            let position = scene.position(level.player).unwrap_or_default();
            let state = controller.state();
            info!(
                tick,
                x = position.x,
                y = position.y,
                z = position.z,
                airborne = state.airborne,
                vertical_velocity = state.vertical_velocity,
                "player"
            );
        }
    }

    let position = scene
        .position(level.player)
        .context("player node disappeared")?;
    let step_top = scene.position(level.step).map_or(0.0, |p| p.y + 0.15);
    info!(
        x = position.x,
        y = position.y,
        z = position.z,
        step_top,
        collidables = controller.collidables().len(),
        elapsed_ms = time.total_ms,
        "demo finished"
    );

    Ok(())
}
