//! Error types for world construction and simulation input

/// Errors surfaced by the simulation core.
///
/// None of these are recoverable inside a frame: they indicate bad
/// configuration or a collaborator handing the core invalid input.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A collider referenced a material name missing from the registry.
    #[error("unknown material '{name}'. Known materials: [{known}]")]
    UnknownMaterial { name: String, known: String },

    /// A force category tag arrived as something other than a string.
    #[error("force name must be a string tag, got {found}")]
    ForceNameType { found: String },

    /// A force command referenced a body that is not in the world.
    #[error("body {0} does not exist")]
    UnknownBody(u32),

    /// An air stream was mounted on a collider that is not in the world.
    #[error("collider {0} does not exist")]
    UnknownCollider(u32),

    /// Simulation config could not be parsed or serialized.
    #[error("invalid simulation config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("config file error: {0}")]
    Io(#[from] std::io::Error),
}
