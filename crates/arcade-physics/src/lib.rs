//! Arcade Physics - Ray probes and kinematic resolution
//!
//! Provides bounded ray casts against scene-graph meshes (using parry through
//! rapier3d) and the vertical/horizontal resolution of a single controlled
//! character.

mod character_controller;

pub use character_controller::{
    planar_forward, CharacterController, CharacterControllerConfig, KinematicState, MoveInput,
};

use arcade_scene::{MeshShape, NodeId, SceneGraph};
use glam::{Quat, Vec3};
use nalgebra::{Isometry3, Point3, Quaternion, Translation3, UnitQuaternion, Vector3};
use rapier3d::parry::query::{Ray, RayCast};
use rapier3d::parry::shape::{Ball, Cuboid, Cylinder};

/// Physics constants for the controlled character
#[derive(Debug, Clone)]
pub struct PhysicsConfig {
    /// Gravitational acceleration magnitude in units/s² (default: 9.81)
    pub gravity: f32,
    /// Clearance under which a falling character snaps onto the surface (default: 0.05)
    pub snap_tolerance: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            snap_tolerance: 0.05,
        }
    }
}

/// Nearest intersection found by a ray cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// The mesh node that was hit
    pub node: NodeId,
    /// Distance along the (normalized) ray to the hit point
    pub distance: f32,
}

/// Casts rays against a set of candidate mesh nodes
#[derive(Debug, Clone, Copy)]
pub struct Raycaster {
    /// Hits closer than this are ignored
    pub near: f32,
    /// Hits further than this are ignored
    pub far: f32,
    /// Subtree excluded from hits
    pub exclude: Option<NodeId>,
}

impl Raycaster {
    pub fn new(near: f32, far: f32) -> Self {
        Self {
            near,
            far,
            exclude: None,
        }
    }

    /// Ignore `node` and everything below it.
    pub fn excluding(mut self, node: NodeId) -> Self {
        self.exclude = Some(node);
        self
    }

    /// Nearest hit among `candidates` within `[near, far]`.
    ///
    /// Candidates that are no longer alive or carry no mesh shape are
    /// skipped, as are shapes the ray starts inside of. Ties go to the earlier
    /// candidate.
    pub fn intersect_nearest(
        &self,
        scene: &SceneGraph,
        origin: Vec3,
        direction: Vec3,
        candidates: &[NodeId],
    ) -> Option<RayHit> {
        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO || self.far < self.near {
            return None;
        }

        let ray = Ray::new(
            Point3::new(origin.x, origin.y, origin.z),
            Vector3::new(dir.x, dir.y, dir.z),
        );

        candidates
            .iter()
            .filter(|&&node| self.exclude.map_or(true, |ex| !scene.is_within(node, ex)))
            .filter_map(|&node| {
                let shape = scene.kind(node)?.shape()?;
                let world = scene.world_transform(node);
                let isometry = to_isometry(world.position, world.rotation);
                let distance = cast_shape(&shape.scaled(world.scale), &isometry, &ray, self.far)?;
                (distance >= self.near).then_some(RayHit { node, distance })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

fn to_isometry(position: Vec3, rotation: Quat) -> Isometry3<f32> {
    Isometry3::from_parts(
        Translation3::new(position.x, position.y, position.z),
        UnitQuaternion::new_normalize(Quaternion::new(
            rotation.w, rotation.x, rotation.y, rotation.z,
        )),
    )
}

fn cast_shape(shape: &MeshShape, isometry: &Isometry3<f32>, ray: &Ray, far: f32) -> Option<f32> {
    let hit = match *shape {
        MeshShape::Cuboid { half_extents } => Cuboid::new(Vector3::new(
            half_extents.x,
            half_extents.y,
            half_extents.z,
        ))
        .cast_ray_and_get_normal(isometry, ray, far, false),
        MeshShape::Ball { radius } => {
            Ball::new(radius).cast_ray_and_get_normal(isometry, ray, far, false)
        }
        MeshShape::Cylinder {
            half_height,
            radius,
        } => Cylinder::new(half_height, radius).cast_ray_and_get_normal(isometry, ray, far, false),
    }?;

    // Only front faces count: a ray leaving a shape from the inside does not
    // hit it.
    (hit.normal.dot(&ray.dir) <= 0.0).then_some(hit.time_of_impact)
}

/// A bounded ray cast from the character against the current collidables
pub struct Probe<'a> {
    pub scene: &'a SceneGraph,
    pub collidables: &'a [NodeId],
    /// The controlled node; its own subtree never blocks it
    pub owner: Option<NodeId>,
}

impl<'a> Probe<'a> {
    pub fn new(scene: &'a SceneGraph, collidables: &'a [NodeId]) -> Self {
        Self {
            scene,
            collidables,
            owner: None,
        }
    }

    pub fn with_owner(mut self, owner: NodeId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Distance to the nearest collidable along `direction`, up to `far`.
    pub fn distance(&self, origin: Vec3, direction: Vec3, far: f32) -> Option<f32> {
        let mut raycaster = Raycaster::new(0.0, far);
        raycaster.exclude = self.owner;
        raycaster
            .intersect_nearest(self.scene, origin, direction, self.collidables)
            .map(|hit| hit.distance)
    }
}
