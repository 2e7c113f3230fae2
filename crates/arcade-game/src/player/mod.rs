//! Player controller module
//!
//! Provides camera-relative keyboard movement with probe-based collision.

mod config;
mod controller;

pub use config::ControlsConfig;
pub use controller::ArcadeController;
