//! Arcade Scene - Scene graph and collidable discovery
//!
//! A handle-based scene graph (generational indices, ordered children) and a
//! time-sliced crawler that keeps a snapshot of its mesh nodes.

mod crawler;
mod error;
mod graph;
mod node;
mod shape;

pub use crawler::CollidableCrawler;
pub use error::SceneError;
pub use graph::{Node, SceneGraph};
pub use node::NodeId;
pub use shape::{MeshShape, NodeKind};
