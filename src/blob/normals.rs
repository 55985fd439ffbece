//! Normal recomputation for triangle soups.
//!
//! Two modes:
//! - Flat: every corner of a triangle gets that triangle's normal.
//! - Smooth: corners sharing a position get the normalized sum of the face
//!   normals of every triangle touching that position.
//!
//! Which corners "share a position" is decided by a [`VertexGrouping`].
//! [`ExactPosition`] groups by exact coordinate equality, with no tolerance:
//! two corners that differ by a single rounding step form separate groups
//! and shade with a hard seam.
//!
//! Degenerate (zero-area) triangles produce a zero face normal, and
//! normalizing it yields NaN. This is not detected or patched.

use std::collections::HashMap;
use std::hash::Hash;

use glam::Vec3;

use super::mesh::TriangleSoup;
use crate::error::{Result, VasaroError};

/// Shading mode for normal recomputation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shading {
    /// Normals averaged across triangles sharing a position
    #[default]
    Smooth,
    /// One normal per triangle
    Flat,
}

impl Shading {
    /// Map the viewer's "smooth model" toggle to a mode
    pub fn from_smooth_flag(enabled: bool) -> Self {
        if enabled {
            Shading::Smooth
        } else {
            Shading::Flat
        }
    }
}

/// Decides which vertex positions are treated as the same point.
pub trait VertexGrouping {
    type Key: Eq + Hash;

    fn key(&self, position: Vec3) -> Self::Key;
}

/// Groups positions by exact float equality of all three coordinates.
///
/// Keys are the coordinate bit patterns. `-0.0` is folded into `+0.0` so
/// that key equality agrees with `==` on zeros.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactPosition;

impl VertexGrouping for ExactPosition {
    type Key = [u32; 3];

    #[inline]
    fn key(&self, position: Vec3) -> [u32; 3] {
        [
            canonical_bits(position.x),
            canonical_bits(position.y),
            canonical_bits(position.z),
        ]
    }
}

#[inline]
fn canonical_bits(value: f32) -> u32 {
    // -0.0 + 0.0 == +0.0
    (value + 0.0).to_bits()
}

/// Per-pass map from position group to summed (unnormalized) normal.
#[derive(Debug)]
pub struct NormalAccumulator<K> {
    sums: HashMap<K, Vec3>,
}

impl<K: Eq + Hash> NormalAccumulator<K> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sums: HashMap::with_capacity(capacity),
        }
    }

    /// Add `normal` to the group's running sum (creating it if absent)
    pub fn add(&mut self, key: K, normal: Vec3) {
        *self.sums.entry(key).or_insert(Vec3::ZERO) += normal;
    }

    pub fn get(&self, key: &K) -> Option<Vec3> {
        self.sums.get(key).copied()
    }

    /// Number of distinct position groups
    pub fn len(&self) -> usize {
        self.sums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }
}

/// Sum of the three corner cross products of a triangle.
///
/// For a planar triangle the three products are parallel (each has length
/// twice the area), so this is three times the face normal up to rounding.
#[inline]
pub fn face_normal_sum([v1, v2, v3]: [Vec3; 3]) -> Vec3 {
    let n1 = (v2 - v1).cross(v3 - v1);
    let n2 = (v3 - v2).cross(v1 - v2);
    let n3 = (v1 - v3).cross(v2 - v3);
    n1 + n2 + n3
}

/// Recompute normals in the requested mode, grouping smooth normals by
/// exact position.
pub fn recompute_normals(soup: &mut TriangleSoup, shading: Shading) -> Result<()> {
    match shading {
        Shading::Flat => {
            recompute_flat(soup);
            Ok(())
        }
        Shading::Smooth => recompute_smooth(soup, &ExactPosition),
    }
}

/// Write each triangle's normalized face normal to its three corners.
pub fn recompute_flat(soup: &mut TriangleSoup) {
    for t in 0..soup.triangle_count() {
        let normal = face_normal_sum(soup.triangle(t)).normalize();
        let base = t * 3;
        for corner in base..base + 3 {
            soup.set_normal(corner, normal);
        }
    }
}

/// Two-pass smoothing: accumulate face normals per position group, then
/// resolve every vertex (in buffer order) to its group's normalized sum.
///
/// A vertex whose group is missing in the second pass means the grouping is
/// inconsistent; that is reported as [`VasaroError::MissingNormalGroup`].
pub fn recompute_smooth<G: VertexGrouping>(soup: &mut TriangleSoup, grouping: &G) -> Result<()> {
    let mut accumulator = NormalAccumulator::with_capacity(soup.vertex_count() / 2);

    for t in 0..soup.triangle_count() {
        let corners = soup.triangle(t);
        let sum = face_normal_sum(corners);
        for corner in corners {
            accumulator.add(grouping.key(corner), sum);
        }
    }

    for vertex in 0..soup.vertex_count() {
        let key = grouping.key(soup.position(vertex));
        let sum = accumulator
            .get(&key)
            .ok_or(VasaroError::MissingNormalGroup { vertex })?;
        soup.set_normal(vertex, sum.normalize());
    }

    log::trace!(
        "Smoothed {} vertices into {} position groups",
        soup.vertex_count(),
        accumulator.len()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::cell::Cell;

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-6);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-6);
        assert_abs_diff_eq!(a.z, b.z, epsilon = 1e-6);
    }

    /// Triangles A and B share the origin and (0,1,0)
    fn shared_pair() -> TriangleSoup {
        TriangleSoup::from_triangles([
            [Vec3::ZERO, Vec3::X, Vec3::Y],
            [Vec3::ZERO, Vec3::Y, Vec3::NEG_X],
        ])
    }

    /// Same shared edge, but B folded up into the YZ plane
    fn folded_pair() -> TriangleSoup {
        TriangleSoup::from_triangles([
            [Vec3::ZERO, Vec3::X, Vec3::Y],
            [Vec3::ZERO, Vec3::Y, Vec3::Z],
        ])
    }

    #[test]
    fn test_face_normal_sum_is_three_cross_products() {
        let sum = face_normal_sum([Vec3::ZERO, Vec3::X, Vec3::Y]);
        assert_eq!(sum, Vec3::new(0.0, 0.0, 3.0));

        // Reversed winding flips the sign
        let reversed = face_normal_sum([Vec3::ZERO, Vec3::Y, Vec3::X]);
        assert_eq!(reversed, Vec3::new(0.0, 0.0, -3.0));
    }

    #[test]
    fn test_flat_mode_corners_identical() {
        let mut soup = folded_pair();
        recompute_flat(&mut soup);

        for t in 0..soup.triangle_count() {
            let base = t * 3;
            assert_eq!(soup.normal(base), soup.normal(base + 1));
            assert_eq!(soup.normal(base), soup.normal(base + 2));
        }
        assert_vec_eq(soup.normal(0), Vec3::Z);
        assert_vec_eq(soup.normal(3), Vec3::X);
    }

    #[test]
    fn test_flat_mode_is_idempotent() {
        let mut soup = folded_pair();
        recompute_flat(&mut soup);
        let first = soup.normals().to_vec();
        recompute_flat(&mut soup);
        assert_eq!(soup.normals(), first.as_slice());
    }

    #[test]
    fn test_smooth_mode_shared_vertex_sums_faces() {
        let mut soup = shared_pair();
        recompute_smooth(&mut soup, &ExactPosition).unwrap();

        let tri_a = face_normal_sum(soup.triangle(0));
        let tri_b = face_normal_sum(soup.triangle(1));
        let expected = (tri_a + tri_b).normalize();

        // Origin is vertex 0 in A and vertex 3 in B
        assert_vec_eq(soup.normal(0), expected);
        assert_vec_eq(soup.normal(3), expected);
        // (0,1,0) is vertex 2 in A and vertex 4 in B
        assert_vec_eq(soup.normal(2), expected);
        assert_vec_eq(soup.normal(4), expected);
    }

    #[test]
    fn test_smooth_mode_blends_folded_faces() {
        let mut soup = folded_pair();
        recompute_smooth(&mut soup, &ExactPosition).unwrap();

        let blended = Vec3::new(1.0, 0.0, 1.0).normalize();
        // Shared corners get the blend, not either face alone
        assert_vec_eq(soup.normal(0), blended);
        assert_vec_eq(soup.normal(2), blended);
        assert_vec_eq(soup.normal(3), blended);
        assert_vec_eq(soup.normal(4), blended);

        // Unshared corners keep their own face normal
        assert_vec_eq(soup.normal(1), Vec3::Z);
        assert_vec_eq(soup.normal(5), Vec3::X);
    }

    #[test]
    fn test_smooth_mode_treats_near_equal_positions_as_distinct() {
        let nudged = Vec3::new(f32::from_bits(1), 0.0, 0.0);
        let mut soup = TriangleSoup::from_triangles([
            [Vec3::ZERO, Vec3::X, Vec3::Y],
            [nudged, Vec3::Y, Vec3::Z],
        ]);
        recompute_smooth(&mut soup, &ExactPosition).unwrap();

        // The origin corners no longer share a group
        assert_vec_eq(soup.normal(0), Vec3::Z);
        assert_ne!(soup.normal(0), soup.normal(3));
    }

    #[test]
    fn test_exact_position_folds_signed_zero() {
        let grouping = ExactPosition;
        assert_eq!(
            grouping.key(Vec3::new(-0.0, 0.0, -0.0)),
            grouping.key(Vec3::ZERO)
        );
        assert_ne!(
            grouping.key(Vec3::new(1.0, 0.0, 0.0)),
            grouping.key(Vec3::new(1.0 + f32::EPSILON, 0.0, 0.0))
        );
    }

    #[test]
    fn test_accumulator_sums_per_key() {
        let mut acc = NormalAccumulator::with_capacity(4);
        acc.add(1u8, Vec3::X);
        acc.add(1u8, Vec3::Y);
        acc.add(2u8, Vec3::Z);

        assert_eq!(acc.len(), 2);
        assert_eq!(acc.get(&1), Some(Vec3::new(1.0, 1.0, 0.0)));
        assert_eq!(acc.get(&2), Some(Vec3::Z));
        assert_eq!(acc.get(&3), None);
    }

    /// Hands out a fresh key on every call, so nothing resolves
    struct Inconsistent {
        next: Cell<u32>,
    }

    impl VertexGrouping for Inconsistent {
        type Key = u32;

        fn key(&self, _position: Vec3) -> u32 {
            let key = self.next.get();
            self.next.set(key + 1);
            key
        }
    }

    #[test]
    fn test_inconsistent_grouping_is_a_hard_error() {
        let mut soup = shared_pair();
        let grouping = Inconsistent { next: Cell::new(0) };

        let err = recompute_smooth(&mut soup, &grouping).unwrap_err();
        assert!(matches!(err, VasaroError::MissingNormalGroup { vertex: 0 }));
    }

    #[test]
    fn test_degenerate_triangle_yields_nan() {
        let mut soup = TriangleSoup::from_triangles([[Vec3::X, Vec3::X, Vec3::X]]);
        recompute_flat(&mut soup);
        assert!(soup.normals().iter().all(|n| n.is_nan()));
    }

    #[test]
    fn test_recompute_normals_dispatches_on_mode() {
        let mut smooth = folded_pair();
        let mut flat = folded_pair();
        recompute_normals(&mut smooth, Shading::from_smooth_flag(true)).unwrap();
        recompute_normals(&mut flat, Shading::from_smooth_flag(false)).unwrap();

        assert_vec_eq(flat.normal(0), Vec3::Z);
        assert_vec_eq(smooth.normal(0), Vec3::new(1.0, 0.0, 1.0).normalize());
        assert_eq!(smooth.normals().len(), smooth.vertices().len());
        assert_eq!(flat.normals().len(), flat.vertices().len());
    }
}
