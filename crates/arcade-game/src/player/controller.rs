//! Arcade controller: keyboard movement, jumping and collision for one node

use std::sync::Arc;

use arcade_core::Vec3;
use arcade_physics::{planar_forward, CharacterController, KinematicState, MoveInput, Probe};
use arcade_scene::{CollidableCrawler, NodeId, SceneGraph};
use tracing::info;
use winit::event::ElementState;
use winit::keyboard::Key;

use crate::camera::CameraSource;
use crate::input::PressedKeys;
use crate::ControllerError;

use super::ControlsConfig;

/// Drives one scene node from keyboard input.
///
/// The host calls `on_key_down`/`on_key_up` as key events arrive and
/// `on_tick` once per frame. Each tick advances the collidable crawl by one
/// step, then resolves vertical and horizontal motion against the current
/// collidables and writes the result into the node's position.
pub struct ArcadeController<C> {
    config: ControlsConfig,
    /// The node whose position is driven
    target: NodeId,
    camera: C,
    crawler: CollidableCrawler,
    character: CharacterController,
    pressed: PressedKeys,
    /// Host time of the last tick in milliseconds
    time: f64,
}

impl<C: CameraSource> ArcadeController<C> {
    /// Create a controller for `target`, crawling the whole scene for collidables.
    pub fn new(
        scene: &SceneGraph,
        target: NodeId,
        camera: C,
        config: ControlsConfig,
    ) -> Result<Self, ControllerError> {
        config.validate()?;
        if !scene.is_alive(target) {
            return Err(ControllerError::MissingTarget(target));
        }

        info!(
            %target,
            movement_speed = config.movement_speed,
            height = config.height,
            width = config.width,
            "arcade controller created"
        );

        Ok(Self {
            character: CharacterController::with_config(config.body()),
            config,
            target,
            camera,
            crawler: CollidableCrawler::new(scene.root()),
            pressed: PressedKeys::new(),
            time: 0.0,
        })
    }

    pub fn config(&self) -> &ControlsConfig {
        &self.config
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut C {
        &mut self.camera
    }

    /// Vertical velocity and jumping/airborne flags
    pub fn state(&self) -> &KinematicState {
        self.character.state()
    }

    pub fn pressed_keys(&self) -> &PressedKeys {
        &self.pressed
    }

    /// Host time of the last tick in milliseconds
    pub fn time(&self) -> f64 {
        self.time
    }

    /// The collidables snapshot used by the last tick
    pub fn collidables(&self) -> Arc<[NodeId]> {
        self.crawler.collideables()
    }

    pub fn on_key_down(&mut self, key: &str) {
        self.pressed.press(key, self.time);
    }

    pub fn on_key_up(&mut self, key: &str) {
        self.pressed.release(key);
    }

    /// Forget every held key. Hosts call this when the window loses focus,
    /// since the matching key-up events will never arrive.
    pub fn release_all_keys(&mut self) {
        self.pressed.clear();
    }

    /// Feed a winit keyboard event
    pub fn handle_keyboard(&mut self, key: &Key, element_state: ElementState) {
        self.pressed.handle_keyboard(key, element_state, self.time);
    }

    /// Advance the simulation by one frame. `time` and `time_delta` are in
    /// milliseconds.
    pub fn on_tick(&mut self, scene: &mut SceneGraph, time: f64, time_delta: f64) {
        self.crawler.crawl(scene);
        self.time = time;

        let Some(mut position) = scene.position(self.target) else {
            return;
        };
        let collidables = self.crawler.collideables();
        let dt = (time_delta / 1000.0) as f32;

        {
            let probe = Probe::new(scene, &collidables).with_owner(self.target);
            self.update_y(&probe, &mut position, dt);
            self.update_xz(&probe, &mut position, dt);
        }

        scene.set_position(self.target, position);
    }

    fn update_y(&mut self, probe: &Probe<'_>, position: &mut Vec3, dt: f32) {
        let jump_held = self.pressed.is_held(&self.config.jump_key);
        self.character.update_vertical(probe, position, jump_held, dt);
    }

    fn update_xz(&mut self, probe: &Probe<'_>, position: &mut Vec3, dt: f32) {
        let input = MoveInput {
            forward: self.pressed.is_held(&self.config.forward_key),
            backward: self.pressed.is_held(&self.config.backward_key),
            left: self.pressed.is_held(&self.config.left_key),
            right: self.pressed.is_held(&self.config.right_key),
        };
        if !input.any() {
            return;
        }

        let forward = planar_forward(self.camera.world_direction(probe.scene));
        self.character
            .update_horizontal(probe, position, forward, input, dt);
    }
}
