//! Camera controller with mouse look

use arcade_core::{Quat, Vec2, Vec3};
use arcade_scene::SceneGraph;

use super::{CameraConfig, CameraSource};

/// Yaw/pitch camera driven by mouse motion
#[derive(Debug, Clone)]
pub struct CameraController {
    /// Configuration
    pub config: CameraConfig,
    /// Yaw rotation in radians (horizontal)
    pub yaw: f32,
    /// Pitch rotation in radians (vertical)
    pub pitch: f32,
}

impl CameraController {
    /// Create a new camera controller
    pub fn new() -> Self {
        Self::with_config(CameraConfig::default())
    }

    /// Create a camera controller with custom config
    pub fn with_config(config: CameraConfig) -> Self {
        Self {
            config,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Get the camera's look direction
    pub fn forward(&self) -> Vec3 {
        let cos_pitch = self.pitch.cos();
        Vec3::new(
            self.yaw.sin() * cos_pitch,
            self.pitch.sin(),
            -self.yaw.cos() * cos_pitch,
        )
    }

    /// Get the rotation quaternion
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(glam::EulerRot::YXZ, -self.yaw, self.pitch, 0.0)
    }

    /// Handle mouse look input
    pub fn handle_mouse_look(&mut self, mouse_delta: Vec2) {
        self.yaw += mouse_delta.x * self.config.sensitivity;
        let pitch = self.pitch - mouse_delta.y * self.config.sensitivity;
        self.set_pitch(pitch);
    }

    /// Set the camera yaw directly
    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
    }

    /// Set the camera pitch directly
    pub fn set_pitch(&mut self, pitch: f32) {
        let pitch_min = self.config.pitch_min.to_radians();
        let pitch_max = self.config.pitch_max.to_radians();
        self.pitch = pitch.clamp(pitch_min, pitch_max);
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraSource for CameraController {
    fn world_direction(&self, _scene: &SceneGraph) -> Vec3 {
        -self.forward()
    }
}
