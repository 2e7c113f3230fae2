//! Node kinds and mesh collision shapes

use glam::Vec3;

/// Collision geometry carried by a mesh node, in the node's local space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeshShape {
    /// Axis-aligned box (in local space) given by its half extents
    Cuboid { half_extents: Vec3 },
    /// Sphere centred on the node origin
    Ball { radius: f32 },
    /// Y-aligned cylinder centred on the node origin
    Cylinder { half_height: f32, radius: f32 },
}

impl MeshShape {
    /// Box from full extents
    pub fn cuboid(size: Vec3) -> Self {
        Self::Cuboid {
            half_extents: size * 0.5,
        }
    }

    pub fn ball(radius: f32) -> Self {
        Self::Ball { radius }
    }

    pub fn cylinder(height: f32, radius: f32) -> Self {
        Self::Cylinder {
            half_height: height * 0.5,
            radius,
        }
    }

    /// Bake a world scale into the shape dimensions.
    ///
    /// Balls use the largest axis; cylinders scale their radius by the larger
    /// horizontal axis.
    pub fn scaled(&self, scale: Vec3) -> Self {
        let scale = scale.abs();
        match *self {
            Self::Cuboid { half_extents } => Self::Cuboid {
                half_extents: half_extents * scale,
            },
            Self::Ball { radius } => Self::Ball {
                radius: radius * scale.max_element(),
            },
            Self::Cylinder {
                half_height,
                radius,
            } => Self::Cylinder {
                half_height: half_height * scale.y,
                radius: radius * scale.x.max(scale.z),
            },
        }
    }
}

/// Type tag of a scene-graph node
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
    /// Pure grouping node with no geometry
    Group,
    /// Renderable geometry; the only kind eligible for collision
    Mesh(MeshShape),
    /// Camera rig
    Camera,
    /// Light source
    Light,
}

impl NodeKind {
    pub fn is_mesh(&self) -> bool {
        matches!(self, NodeKind::Mesh(_))
    }

    pub fn shape(&self) -> Option<&MeshShape> {
        match self {
            NodeKind::Mesh(shape) => Some(shape),
            _ => None,
        }
    }
}
