use arcade_scene::NodeId;

/// Reasons an `ArcadeController` refuses to initialize.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ControllerError {
    #[error("invalid value {value} for {field}")]
    InvalidConfig { field: &'static str, value: f32 },

    #[error("key binding '{0}' is empty")]
    EmptyKey(&'static str),

    #[error("controlled node {0} is not alive")]
    MissingTarget(NodeId),
}
