//! Kinematic character controller driven by ray probes
//!
//! Vertical motion integrates gravity and snaps onto the surface found by a
//! downward probe. Horizontal motion moves along up to four camera-relative
//! directions, each rejected on its own when a probe finds geometry within
//! half the character's width.

use arcade_core::{Vec3, WORLD_UP};
use tracing::{debug, trace};

use crate::{PhysicsConfig, Probe};

/// Character body and movement configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterControllerConfig {
    /// Horizontal speed in units per second (default: 2)
    pub movement_speed: f32,
    /// Body height; the position sits at half this height (default: 2)
    pub height: f32,
    /// Body width; horizontal probes reject hits within half of it (default: 0.5)
    pub width: f32,
    /// Vertical launch speed of a jump in units per second (default: 5)
    pub jump_start_speed: f32,
}

impl Default for CharacterControllerConfig {
    fn default() -> Self {
        Self {
            movement_speed: 2.0,
            height: 2.0,
            width: 0.5,
            jump_start_speed: 5.0,
        }
    }
}

/// Vertical kinematic state. The position itself lives in the scene graph.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KinematicState {
    /// Signed vertical velocity in units per second
    pub vertical_velocity: f32,
    /// Set by a jump impulse, cleared once the velocity turns negative
    pub jumping: bool,
    /// Not resting on a detected surface
    pub airborne: bool,
}

/// Directional keys held this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveInput {
    pub fn any(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}

/// Horizontal forward direction for a camera facing `camera_direction`.
///
/// The facing axis points behind the view, so it is negated, flattened onto
/// the horizontal plane and normalized. A camera looking straight up or down
/// yields `Vec3::ZERO`.
pub fn planar_forward(camera_direction: Vec3) -> Vec3 {
    let view = -camera_direction;
    (view - WORLD_UP * view.dot(WORLD_UP)).normalize_or_zero()
}

/// Character controller resolving one character against probed geometry
#[derive(Debug, Clone, Default)]
pub struct CharacterController {
    /// Body configuration
    pub config: CharacterControllerConfig,
    /// Physics constants
    pub physics: PhysicsConfig,
    state: KinematicState,
}

impl CharacterController {
    /// Create a new character controller with default config
    pub fn new() -> Self {
        Self::with_config(CharacterControllerConfig::default())
    }

    /// Create a new character controller with custom config
    pub fn with_config(config: CharacterControllerConfig) -> Self {
        Self {
            config,
            physics: PhysicsConfig::default(),
            state: KinematicState::default(),
        }
    }

    pub fn state(&self) -> &KinematicState {
        &self.state
    }

    /// Overwrite the kinematic state (teleports, respawns, tests)
    pub fn set_state(&mut self, state: KinematicState) {
        self.state = state;
    }

    /// Distance from `position` to the surface below, within the body height.
    pub fn ground_distance(&self, probe: &Probe<'_>, position: Vec3) -> Option<f32> {
        probe.distance(position, -WORLD_UP, self.config.height)
    }

    /// Probe below, then resolve and apply this tick's vertical motion.
    pub fn update_vertical(
        &mut self,
        probe: &Probe<'_>,
        position: &mut Vec3,
        jump_held: bool,
        dt: f32,
    ) {
        let ground = self.ground_distance(probe, *position);
        position.y += self.resolve_vertical(ground, jump_held, dt);
    }

    /// Advance the vertical state by `dt` seconds given the probed distance to
    /// the surface below. Returns the vertical displacement to apply.
    pub fn resolve_vertical(&mut self, ground_distance: Option<f32>, jump_held: bool, dt: f32) -> f32 {
        let was_airborne = self.state.airborne;

        if jump_held && !self.state.jumping && !self.state.airborne {
            self.state.jumping = true;
            self.state.vertical_velocity = self.config.jump_start_speed;
            debug!(speed = self.config.jump_start_speed, "jump");
        }

        let free_drop_delta = self.state.vertical_velocity * dt;

        let delta = match ground_distance {
            Some(distance) if !self.state.jumping => {
                // Signed clearance between the body's bottom and the surface
                let distance_from_bottom = distance - self.config.height / 2.0;
                if free_drop_delta.abs() > distance_from_bottom.abs()
                    || distance_from_bottom.abs() < self.physics.snap_tolerance
                {
                    self.state.airborne = false;
                    -distance_from_bottom
                } else {
                    self.state.airborne = true;
                    free_drop_delta
                }
            }
            _ => {
                self.state.airborne = true;
                free_drop_delta
            }
        };

        // Gravity goes after the snap decision so a landing frame does not
        // carry an extra frame of fall speed.
        if self.state.airborne {
            self.state.vertical_velocity -= self.physics.gravity * dt;
        } else {
            self.state.vertical_velocity = 0.0;
        }

        if self.state.vertical_velocity < 0.0 {
            self.state.jumping = false;
        }

        if was_airborne != self.state.airborne {
            if self.state.airborne {
                debug!("left ground");
            } else {
                debug!(correction = delta, "landed");
            }
        }

        delta
    }

    /// Whether a probe along `direction` finds geometry within half the width.
    pub fn is_blocked(&self, probe: &Probe<'_>, position: Vec3, direction: Vec3) -> bool {
        probe
            .distance(position, direction, self.config.width)
            .is_some_and(|distance| distance < self.config.width / 2.0)
    }

    /// Move along each held direction that is not blocked.
    ///
    /// Directions are probed and applied one after another from the updated
    /// position, and their displacements add up: holding two keys moves
    /// `movement_speed * dt` along each, so diagonals are faster.
    pub fn update_horizontal(
        &self,
        probe: &Probe<'_>,
        position: &mut Vec3,
        forward: Vec3,
        input: MoveInput,
        dt: f32,
    ) {
        if !input.any() {
            return;
        }

        let step = self.config.movement_speed * dt;
        let right = forward.cross(WORLD_UP);
        let moves = [
            (input.forward, forward),
            (input.backward, -forward),
            (input.right, right),
            (input.left, -right),
        ];

        for (held, direction) in moves {
            if !held {
                continue;
            }
            if self.is_blocked(probe, *position, direction) {
                trace!(?direction, "horizontal move blocked");
                continue;
            }
            position.x += direction.x * step;
            position.z += direction.z * step;
        }
    }
}
