//! Arcade Core - Core types and utilities shared by the arcade controls
//!
//! This crate provides the foundational types used throughout the workspace:
//! - Mathematical primitives (re-exported from glam)
//! - Transform used by scene-graph nodes
//! - Tick clock converting host frame deltas into simulation ticks

pub mod time;
pub mod types;

pub use glam::{Mat4, Quat, Vec2, Vec3};
pub use time::{GameTime, TimeConfig};
pub use types::{Transform, WORLD_UP};
