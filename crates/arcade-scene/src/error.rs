use crate::NodeId;

/// Errors raised by structural scene-graph operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("node {0} is not alive")]
    DeadNode(NodeId),

    #[error("the scene root cannot be re-parented")]
    RootReparent,

    #[error("attaching {child} under {parent} would create a cycle")]
    CycleDetected { parent: NodeId, child: NodeId },
}
