//! Error types shared by the sculpting engine and the viewer.

/// All error types for the vasaro engine.
#[derive(thiserror::Error, Debug)]
pub enum VasaroError {
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),
    #[error("Vertex {index} has no radial direction (zero-length or non-finite position)")]
    DegenerateDirection { index: usize },
    #[error("No accumulated normal for vertex {vertex}: position grouping is inconsistent")]
    MissingNormalGroup { vertex: usize },
    #[error("Mesh load error: {0}")]
    Load(String),
    #[error("Render error: {0}")]
    Render(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VasaroError>;
