//! Camera configuration

use serde::{Deserialize, Serialize};

/// Mouse-look camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Mouse sensitivity (radians per pixel)
    pub sensitivity: f32,
    /// Minimum pitch angle in degrees
    pub pitch_min: f32,
    /// Maximum pitch angle in degrees
    pub pitch_max: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.003,
            pitch_min: -89.0,
            pitch_max: 89.0,
        }
    }
}
