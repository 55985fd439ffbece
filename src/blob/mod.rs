//! Noise-sculpted blob: triangle soup, radial deformation and normals.

mod clock;
mod deform;
mod loader;
mod mesh;
mod normals;
mod shapes;
mod system;

// Re-export public types
pub use clock::AnimationClock;
pub use deform::{DeformParams, RadialDeformer};
pub use loader::load_obj;
pub use mesh::{TriangleSoup, FLOATS_PER_TRIANGLE, FLOATS_PER_VERTEX};
pub use normals::{
    face_normal_sum, recompute_flat, recompute_normals, recompute_smooth, ExactPosition,
    NormalAccumulator, Shading, VertexGrouping,
};
pub use shapes::icosphere;
pub use system::{spin_rotation, BlobSystem};
