//! Incremental collidable discovery
//!
//! Walking the whole scene graph every frame costs O(scene). The crawler
//! instead performs a breadth-first walk one unit of work per call, so the
//! per-frame cost is bounded by the branching factor, and publishes the mesh
//! nodes it found once a full pass is over. The published snapshot therefore
//! lags the live graph by at most one cycle.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::trace;

use crate::{NodeId, SceneGraph};

/// Time-sliced breadth-first crawler collecting mesh nodes below a root.
///
/// The root itself is never classified; only its descendants are.
pub struct CollidableCrawler {
    root: NodeId,
    /// Levels waiting to be walked, each identified by the node whose
    /// children make up the level. Children are read live when walked.
    queued: VecDeque<NodeId>,
    /// Level currently being walked
    level: Option<NodeId>,
    /// Next child to visit within `level`
    level_index: usize,
    /// Last completed snapshot
    collidables: Arc<[NodeId]>,
    /// Meshes found so far in the running cycle
    pending: Vec<NodeId>,
    initial_crawl_done: bool,
    cycles: u64,
    steps: usize,
}

impl CollidableCrawler {
    /// Create a crawler for the subtree below `root`.
    pub fn new(root: NodeId) -> Self {
        Self {
            root,
            queued: VecDeque::from([root]),
            level: None,
            level_index: 0,
            collidables: Arc::from(Vec::new()),
            pending: Vec::new(),
            initial_crawl_done: false,
            cycles: 0,
            steps: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The last completed snapshot. Never a partially crawled one.
    pub fn collideables(&self) -> Arc<[NodeId]> {
        Arc::clone(&self.collidables)
    }

    /// Number of completed cycles.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Advance the traversal by one unit of work.
    ///
    /// Returns `true` when a full cycle just completed and a new snapshot was
    /// published. The very first call ever crawls the whole graph at once so
    /// that a snapshot exists before anything queries it, and returns `true`.
    pub fn crawl(&mut self, scene: &SceneGraph) -> bool {
        if !self.initial_crawl_done {
            self.initial_crawl_done = true;
            self.full_crawl(scene);
            return true;
        }
        self.step(scene)
    }

    /// Run single steps until the current cycle completes.
    pub fn full_crawl(&mut self, scene: &SceneGraph) {
        while !self.step(scene) {}
    }

    fn step(&mut self, scene: &SceneGraph) -> bool {
        self.steps += 1;

        if let Some(parent) = self.level {
            if let Some(&current) = scene.children(parent).get(self.level_index) {
                self.level_index += 1;
                // Enqueue every node so meshes nested below non-meshes are found.
                self.queued.push_back(current);
                if scene.is_mesh(current) {
                    self.pending.push(current);
                }
                return false;
            }
        }

        if let Some(next) = self.queued.pop_front() {
            self.level = Some(next);
            self.level_index = 0;
            return false;
        }

        self.collidables = Arc::from(std::mem::take(&mut self.pending));
        self.queued.push_back(self.root);
        self.level = None;
        self.level_index = 0;
        self.cycles += 1;
        trace!(
            collidables = self.collidables.len(),
            steps = self.steps,
            cycle = self.cycles,
            "collidable crawl cycle complete"
        );
        self.steps = 0;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MeshShape, NodeKind};
    use arcade_core::{Transform, Vec3};

    fn mesh() -> NodeKind {
        NodeKind::Mesh(MeshShape::cuboid(Vec3::ONE))
    }

    /// root
    /// ├── ground (mesh)
    /// ├── group
    /// │   ├── wall (mesh)
    /// │   └── light
    /// │       └── bulb (mesh)
    /// └── camera
    fn sample_scene() -> (SceneGraph, Vec<NodeId>) {
        let mut scene = SceneGraph::new();
        let ground = scene.spawn("ground", mesh(), Transform::default());
        let group = scene.spawn("group", NodeKind::Group, Transform::default());
        let wall = scene.spawn_child(group, "wall", mesh(), Transform::default()).unwrap();
        let light = scene
            .spawn_child(group, "light", NodeKind::Light, Transform::default())
            .unwrap();
        let bulb = scene.spawn_child(light, "bulb", mesh(), Transform::default()).unwrap();
        scene.spawn("camera", NodeKind::Camera, Transform::default());
        (scene, vec![ground, wall, bulb])
    }

    /// Steps needed for one cycle after the initial crawl: one per node, one
    /// per level (root plus every node) and one to publish.
    fn steps_per_cycle(node_count: usize) -> usize {
        2 * node_count + 2
    }

    #[test]
    fn first_crawl_is_full() {
        let (scene, meshes) = sample_scene();
        let mut crawler = CollidableCrawler::new(scene.root());
        assert!(crawler.collideables().is_empty());

        assert!(crawler.crawl(&scene));
        assert_eq!(&*crawler.collideables(), meshes.as_slice());
        assert_eq!(crawler.cycles(), 1);
    }

    #[test]
    fn cycle_completes_once_per_pass() {
        let (scene, meshes) = sample_scene();
        let mut crawler = CollidableCrawler::new(scene.root());
        crawler.crawl(&scene);

        let expected_steps = steps_per_cycle(scene.len());
        for _ in 0..3 {
            let mut completions = 0;
            for _ in 0..expected_steps {
                if crawler.crawl(&scene) {
                    completions += 1;
                }
            }
            assert_eq!(completions, 1);
            assert_eq!(&*crawler.collideables(), meshes.as_slice());
        }
        assert_eq!(crawler.cycles(), 4);
    }

    #[test]
    fn snapshot_independent_of_step_granularity() {
        let (scene, meshes) = sample_scene();

        let mut single = CollidableCrawler::new(scene.root());
        single.crawl(&scene);
        while !single.crawl(&scene) {}

        let mut full = CollidableCrawler::new(scene.root());
        full.crawl(&scene);
        full.full_crawl(&scene);

        assert_eq!(&*single.collideables(), meshes.as_slice());
        assert_eq!(&*full.collideables(), meshes.as_slice());
    }

    #[test]
    fn snapshot_is_not_updated_mid_cycle() {
        let (mut scene, meshes) = sample_scene();
        let mut crawler = CollidableCrawler::new(scene.root());
        crawler.crawl(&scene);

        let extra = scene.spawn("extra", mesh(), Transform::default());
        for _ in 0..3 {
            assert!(!crawler.crawl(&scene));
            assert_eq!(&*crawler.collideables(), meshes.as_slice());
        }

        while !crawler.crawl(&scene) {}
        assert!(crawler.collideables().contains(&extra));
    }

    #[test]
    fn empty_scene_yields_empty_snapshot() {
        let scene = SceneGraph::new();
        let mut crawler = CollidableCrawler::new(scene.root());
        assert!(crawler.crawl(&scene));
        assert!(crawler.collideables().is_empty());

        // Enter the root level, then publish.
        assert!(!crawler.crawl(&scene));
        assert!(crawler.crawl(&scene));
        assert!(crawler.collideables().is_empty());
    }

    #[test]
    fn scene_without_meshes_yields_empty_snapshot() {
        let mut scene = SceneGraph::new();
        let group = scene.spawn("group", NodeKind::Group, Transform::default());
        scene
            .spawn_child(group, "light", NodeKind::Light, Transform::default())
            .unwrap();

        let mut crawler = CollidableCrawler::new(scene.root());
        assert!(crawler.crawl(&scene));
        assert!(crawler.collideables().is_empty());
    }

    #[test]
    fn removed_meshes_drop_out_next_cycle() {
        let (mut scene, meshes) = sample_scene();
        let mut crawler = CollidableCrawler::new(scene.root());
        crawler.crawl(&scene);

        scene.despawn(meshes[0]);
        while !crawler.crawl(&scene) {}
        assert_eq!(&*crawler.collideables(), &meshes[1..]);
    }
}
