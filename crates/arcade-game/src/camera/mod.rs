//! Camera sources
//!
//! The controller moves relative to whatever camera is active. It only needs
//! that camera's world-space facing direction, which any `CameraSource`
//! provides: a mouse-look `CameraController`, a camera node in the scene
//! graph, or a plain closure.

mod config;
mod controller;

pub use config::CameraConfig;
pub use controller::CameraController;

use arcade_core::Vec3;
use arcade_scene::{NodeId, SceneGraph};

/// Accessor for the active camera's orientation.
pub trait CameraSource {
    /// World-space facing direction: the camera's local +Z axis, which points
    /// behind the view.
    fn world_direction(&self, scene: &SceneGraph) -> Vec3;
}

/// Blanket implementation so closures can be used as camera sources.
impl<F: Fn(&SceneGraph) -> Vec3> CameraSource for F {
    fn world_direction(&self, scene: &SceneGraph) -> Vec3 {
        (self)(scene)
    }
}

/// A camera living in the scene graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraNode(pub NodeId);

impl CameraSource for CameraNode {
    fn world_direction(&self, scene: &SceneGraph) -> Vec3 {
        scene.world_direction(self.0)
    }
}
