use glam::{Mat4, Vec3};

use arcade_core::Transform;

use crate::node::NodeId;
use crate::shape::NodeKind;
use crate::SceneError;

/// A single node in the scene graph.
#[derive(Debug, Clone)]
pub struct Node {
    /// Debug name
    pub name: String,
    /// Type tag
    pub kind: NodeKind,
    /// Transform relative to the parent
    pub transform: Transform,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(name: String, kind: NodeKind, transform: Transform, parent: Option<NodeId>) -> Self {
        Self {
            name,
            kind,
            transform,
            parent,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Storage cell for one node. The generation is bumped each time the cell
/// is vacated.
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// The scene graph. Owns every node; nodes refer to each other by handle.
///
/// There is always exactly one root, created with the graph, which cannot be
/// removed or re-parented.
pub struct SceneGraph {
    slots: Vec<Slot>,
    /// Vacated slot indices, reused before the storage grows
    free: Vec<u32>,
    /// Alive nodes below the root
    count: usize,
    root: NodeId,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(Node::new(
                    "scene".to_string(),
                    NodeKind::Group,
                    Transform::default(),
                    None,
                )),
            }],
            free: Vec::new(),
            count: 0,
            root: NodeId {
                index: 0,
                generation: 0,
            },
        }
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of alive nodes below the root. The root itself is not counted,
    /// so a fresh graph is empty.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    // ---- Node management ----

    /// Spawn a node as the last child of the root.
    pub fn spawn(&mut self, name: impl Into<String>, kind: NodeKind, transform: Transform) -> NodeId {
        let root = self.root;
        self.insert_node(root, name.into(), kind, transform)
    }

    /// Spawn a node as the last child of `parent`.
    pub fn spawn_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        kind: NodeKind,
        transform: Transform,
    ) -> Result<NodeId, SceneError> {
        if !self.is_alive(parent) {
            return Err(SceneError::DeadNode(parent));
        }
        Ok(self.insert_node(parent, name.into(), kind, transform))
    }

    fn insert_node(&mut self, parent: NodeId, name: String, kind: NodeKind, transform: Transform) -> NodeId {
        let node = Some(Node::new(name, kind, transform, Some(parent)));
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.node = node;
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node,
                });
                NodeId {
                    index: (self.slots.len() - 1) as u32,
                    generation: 0,
                }
            }
        };
        self.count += 1;
        if let Some(parent) = self.get_mut(parent) {
            parent.children.push(id);
        }
        id
    }

    /// Move `child` (with its subtree) to the end of `parent`'s children.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        if !self.is_alive(parent) {
            return Err(SceneError::DeadNode(parent));
        }
        if !self.is_alive(child) {
            return Err(SceneError::DeadNode(child));
        }
        if child == self.root {
            return Err(SceneError::RootReparent);
        }
        if self.is_within(parent, child) {
            return Err(SceneError::CycleDetected { parent, child });
        }

        self.detach(child);
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.get_mut(parent) {
            node.children.push(child);
        }
        Ok(())
    }

    /// Remove a node and its whole subtree. Returns `false` for dead handles
    /// and for the root.
    pub fn despawn(&mut self, node: NodeId) -> bool {
        if node == self.root || !self.is_alive(node) {
            return false;
        }
        self.detach(node);

        let mut pending = vec![node];
        while let Some(current) = pending.pop() {
            let slot = &mut self.slots[current.index as usize];
            if let Some(removed) = slot.node.take() {
                slot.generation += 1;
                self.free.push(current.index);
                self.count -= 1;
                pending.extend(removed.children);
            }
        }
        true
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.get(node).and_then(|n| n.parent) else {
            return;
        };
        if let Some(parent) = self.get_mut(parent) {
            parent.children.retain(|c| *c != node);
        }
    }

    /// Check whether a node is alive.
    pub fn is_alive(&self, node: NodeId) -> bool {
        self.get(node).is_some()
    }

    pub fn get(&self, node: NodeId) -> Option<&Node> {
        let slot = self.slots.get(node.index as usize)?;
        if slot.generation != node.generation {
            return None;
        }
        slot.node.as_ref()
    }

    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut Node> {
        let slot = self.slots.get_mut(node.index as usize)?;
        if slot.generation != node.generation {
            return None;
        }
        slot.node.as_mut()
    }

    // ---- Queries ----

    /// Ordered children of a node. Dead handles have no children.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.get(node).map_or(&[], |n| n.children.as_slice())
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node)?.parent
    }

    pub fn kind(&self, node: NodeId) -> Option<&NodeKind> {
        self.get(node).map(|n| &n.kind)
    }

    pub fn is_mesh(&self, node: NodeId) -> bool {
        self.kind(node).is_some_and(NodeKind::is_mesh)
    }

    pub fn transform(&self, node: NodeId) -> Option<&Transform> {
        self.get(node).map(|n| &n.transform)
    }

    pub fn transform_mut(&mut self, node: NodeId) -> Option<&mut Transform> {
        self.get_mut(node).map(|n| &mut n.transform)
    }

    /// Local position of a node.
    pub fn position(&self, node: NodeId) -> Option<Vec3> {
        self.transform(node).map(|t| t.position)
    }

    /// Overwrite the local position of a node. Returns `false` for dead handles.
    pub fn set_position(&mut self, node: NodeId, position: Vec3) -> bool {
        match self.transform_mut(node) {
            Some(transform) => {
                transform.position = position;
                true
            }
            None => false,
        }
    }

    /// Whether `node` is `ancestor` or lies somewhere below it.
    pub fn is_within(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// World matrix composed from the local transforms up the parent chain.
    pub fn world_matrix(&self, node: NodeId) -> Mat4 {
        let mut matrix = Mat4::IDENTITY;
        let mut current = Some(node);
        while let Some(id) = current {
            let Some(n) = self.get(id) else {
                break;
            };
            matrix = n.transform.matrix() * matrix;
            current = n.parent;
        }
        matrix
    }

    /// World transform of a node (position, rotation and scale decomposed from
    /// the world matrix).
    pub fn world_transform(&self, node: NodeId) -> Transform {
        let (scale, rotation, position) = self.world_matrix(node).to_scale_rotation_translation();
        Transform {
            position,
            rotation,
            scale,
        }
    }

    /// The node's local +Z axis expressed in world space, normalized.
    pub fn world_direction(&self, node: NodeId) -> Vec3 {
        self.world_matrix(node)
            .transform_vector3(Vec3::Z)
            .normalize_or_zero()
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MeshShape;
    use glam::Quat;

    fn mesh() -> NodeKind {
        NodeKind::Mesh(MeshShape::cuboid(Vec3::ONE))
    }

    #[test]
    fn spawn_attaches_to_root() {
        let mut scene = SceneGraph::new();
        assert!(scene.is_empty());
        let a = scene.spawn("a", NodeKind::Group, Transform::default());
        let b = scene.spawn("b", mesh(), Transform::default());
        assert_eq!(scene.children(scene.root()), &[a, b]);
        assert_eq!(scene.parent(a), Some(scene.root()));
        assert_eq!(scene.len(), 2);
        assert!(!scene.is_empty());
        assert!(scene.is_mesh(b));
        assert!(!scene.is_mesh(a));
    }

    #[test]
    fn despawn_removes_subtree() {
        let mut scene = SceneGraph::new();
        let group = scene.spawn("group", NodeKind::Group, Transform::default());
        let child = scene
            .spawn_child(group, "child", mesh(), Transform::default())
            .unwrap();

        assert!(scene.despawn(group));
        assert!(!scene.is_alive(group));
        assert!(!scene.is_alive(child));
        assert!(scene.children(scene.root()).is_empty());
        assert!(scene.children(group).is_empty());
        assert_eq!(scene.len(), 0);
        assert!(scene.is_empty());
    }

    #[test]
    fn stale_handle_does_not_resolve_after_slot_reuse() {
        let mut scene = SceneGraph::new();
        let old = scene.spawn("old", mesh(), Transform::default());
        assert!(scene.despawn(old));
        assert!(!scene.despawn(old));

        let new = scene.spawn("new", NodeKind::Group, Transform::default());
        assert_ne!(old, new);
        assert!(scene.is_alive(new));
        assert!(!scene.is_alive(old));
        assert!(scene.get(old).is_none());
        assert!(!scene.set_position(old, Vec3::ONE));
        assert_eq!(scene.position(new), Some(Vec3::ZERO));
        assert_eq!(scene.children(scene.root()), &[new]);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn root_cannot_be_despawned() {
        let mut scene = SceneGraph::new();
        let root = scene.root();
        assert!(!scene.despawn(root));
        assert!(scene.is_alive(root));
    }

    #[test]
    fn add_child_rejects_cycles() {
        let mut scene = SceneGraph::new();
        let a = scene.spawn("a", NodeKind::Group, Transform::default());
        let b = scene.spawn_child(a, "b", NodeKind::Group, Transform::default()).unwrap();

        assert_eq!(
            scene.add_child(b, a),
            Err(SceneError::CycleDetected { parent: b, child: a })
        );
        assert_eq!(scene.add_child(a, scene.root()), Err(SceneError::RootReparent));
    }

    #[test]
    fn add_child_reparents() {
        let mut scene = SceneGraph::new();
        let a = scene.spawn("a", NodeKind::Group, Transform::default());
        let b = scene.spawn("b", NodeKind::Group, Transform::default());
        scene.add_child(a, b).unwrap();

        assert_eq!(scene.children(scene.root()), &[a]);
        assert_eq!(scene.children(a), &[b]);
        assert!(scene.is_within(b, a));
        assert!(!scene.is_within(a, b));
    }

    #[test]
    fn spawn_child_on_dead_parent_fails() {
        let mut scene = SceneGraph::new();
        let a = scene.spawn("a", NodeKind::Group, Transform::default());
        scene.despawn(a);
        let result = scene.spawn_child(a, "b", NodeKind::Group, Transform::default());
        assert_eq!(result, Err(SceneError::DeadNode(a)));
    }

    #[test]
    fn world_matrix_composes_parents() {
        let mut scene = SceneGraph::new();
        let parent = scene.spawn(
            "parent",
            NodeKind::Group,
            Transform::from_position(Vec3::new(1.0, 0.0, 0.0)),
        );
        let child = scene
            .spawn_child(
                parent,
                "child",
                NodeKind::Group,
                Transform::from_position(Vec3::new(0.0, 2.0, 0.0)),
            )
            .unwrap();

        let world = scene.world_transform(child);
        assert!((world.position - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn world_direction_follows_rotation() {
        let mut scene = SceneGraph::new();
        let rig = scene.spawn(
            "rig",
            NodeKind::Group,
            Transform::from_position_rotation(
                Vec3::ZERO,
                Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            ),
        );
        let camera = scene
            .spawn_child(rig, "camera", NodeKind::Camera, Transform::default())
            .unwrap();

        let dir = scene.world_direction(camera);
        assert!((dir - Vec3::X).length() < 1e-5);
    }
}
