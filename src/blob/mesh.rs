//! Flat, non-indexed triangle mesh with a parallel normal buffer.

use glam::Vec3;

use crate::error::{Result, VasaroError};

/// Floats per vertex position (x, y, z)
pub const FLOATS_PER_VERTEX: usize = 3;

/// Floats per triangle (3 corners)
pub const FLOATS_PER_TRIANGLE: usize = 3 * FLOATS_PER_VERTEX;

/// Triangle soup: triangle `i` occupies `vertices[9i..9i + 9]`.
///
/// Positions shared by several triangles are stored once per triangle.
/// Anything that needs to know which corners coincide (normal smoothing)
/// has to compare positions, not indices.
///
/// `normals` always has the same length and indexing as `vertices`.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleSoup {
    vertices: Vec<f32>,
    normals: Vec<f32>,
}

impl TriangleSoup {
    /// Wrap a flat position buffer. Normals start zeroed.
    pub fn new(vertices: Vec<f32>) -> Result<Self> {
        if vertices.len() % FLOATS_PER_TRIANGLE != 0 {
            return Err(VasaroError::InvalidMesh(format!(
                "vertex buffer length {} is not a multiple of {}",
                vertices.len(),
                FLOATS_PER_TRIANGLE
            )));
        }

        let normals = vec![0.0; vertices.len()];
        Ok(Self { vertices, normals })
    }

    /// Build from triangles given as corner positions (in winding order)
    pub fn from_triangles<I>(triangles: I) -> Self
    where
        I: IntoIterator<Item = [Vec3; 3]>,
    {
        let mut vertices = Vec::new();
        for corners in triangles {
            for corner in corners {
                vertices.extend_from_slice(&corner.to_array());
            }
        }

        let normals = vec![0.0; vertices.len()];
        Self { vertices, normals }
    }

    /// Flat position buffer
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Flat normal buffer (same layout as `vertices`)
    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / FLOATS_PER_VERTEX
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / FLOATS_PER_TRIANGLE
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Position of vertex `i`
    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.vertices[i * FLOATS_PER_VERTEX..])
    }

    /// Normal of vertex `i`
    #[inline]
    pub fn normal(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.normals[i * FLOATS_PER_VERTEX..])
    }

    /// Corner positions of triangle `t`, in winding order
    #[inline]
    pub fn triangle(&self, t: usize) -> [Vec3; 3] {
        let base = t * 3;
        [
            self.position(base),
            self.position(base + 1),
            self.position(base + 2),
        ]
    }

    #[inline]
    pub fn set_position(&mut self, i: usize, position: Vec3) {
        position.write_to_slice(&mut self.vertices[i * FLOATS_PER_VERTEX..]);
    }

    #[inline]
    pub fn set_normal(&mut self, i: usize, normal: Vec3) {
        normal.write_to_slice(&mut self.normals[i * FLOATS_PER_VERTEX..]);
    }

    /// Iterate over vertex positions in buffer order
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices
            .chunks_exact(FLOATS_PER_VERTEX)
            .map(Vec3::from_slice)
    }
}
