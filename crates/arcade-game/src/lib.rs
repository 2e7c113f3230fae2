//! Arcade Game - Arcade character controls
//!
//! Provides held-key input tracking, camera sources, and the
//! `ArcadeController` that moves one scene node per tick.

pub mod camera;
mod error;
pub mod input;
pub mod player;

pub use camera::{CameraConfig, CameraController, CameraNode, CameraSource};
pub use error::ControllerError;
pub use input::{key_identifier, PressedKeys};
pub use player::{ArcadeController, ControlsConfig};
