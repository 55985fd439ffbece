//! Radial noise displacement of the blob surface.

use glam::Vec3;

use super::mesh::TriangleSoup;
use crate::error::{Result, VasaroError};
use crate::noise::NoiseField;

/// Inputs for one deformation pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeformParams {
    /// Accumulated noise time `w`
    pub time: f64,
    /// Displacement strength in [0, 1]
    pub strength: f32,
    /// Spatial detail (noise frequency) in [0, 1]
    pub resolution: f32,
}

impl DeformParams {
    /// Sampling frequency multiplier, remapped to [0.8, 1.8]
    pub fn frequency(&self) -> f64 {
        self.resolution as f64 * 1.0 + 0.8
    }

    /// Noise amplitude, strength remapped to [0.2, 1.2] then scaled by 0.6
    pub fn amplitude(&self) -> f64 {
        0.6 * (self.strength as f64 * 1.0 + 0.2)
    }

    /// Radius the surface takes along `direction`
    pub fn radius(&self, noise: &NoiseField, direction: Vec3) -> f64 {
        let res = self.frequency();
        let sample = noise.sample4(
            direction.x as f64 * res,
            direction.y as f64 * res,
            direction.z as f64 * res,
            self.time,
        );
        1.0 + self.amplitude() * sample
    }
}

/// Displaces each vertex along its radial direction from the origin.
///
/// Directions are captured once from the base mesh, so every pass is
/// computed from the undeformed shape and displacement never compounds.
///
/// Rebuilding a deformer from an already displaced mesh recovers the same
/// directions: with noise bounded near [-1, 1] the radius stays above
/// `1 - 0.72`, so displacement scales a vertex without flipping or rotating
/// it, and normalizing undoes the scale.
#[derive(Debug, Clone)]
pub struct RadialDeformer {
    directions: Vec<Vec3>,
}

impl RadialDeformer {
    /// Capture the unit direction of every vertex.
    ///
    /// The mesh must be centered on the origin: a vertex at the origin (or
    /// with non-finite coordinates) has no direction and is rejected.
    pub fn new(soup: &TriangleSoup) -> Result<Self> {
        let directions = soup
            .positions()
            .enumerate()
            .map(|(index, position)| {
                position
                    .try_normalize()
                    .ok_or(VasaroError::DegenerateDirection { index })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { directions })
    }

    /// Unit directions in vertex order
    pub fn directions(&self) -> &[Vec3] {
        &self.directions
    }

    /// Overwrite every vertex of `soup` with its displaced position.
    pub fn apply(
        &self,
        soup: &mut TriangleSoup,
        noise: &NoiseField,
        params: &DeformParams,
    ) -> Result<()> {
        if soup.vertex_count() != self.directions.len() {
            return Err(VasaroError::InvalidMesh(format!(
                "deformer captured {} directions but mesh has {} vertices",
                self.directions.len(),
                soup.vertex_count()
            )));
        }

        for (index, &direction) in self.directions.iter().enumerate() {
            // Scale in f64, round once on store
            let radius = params.radius(noise, direction);
            soup.set_position(index, (direction.as_dvec3() * radius).as_vec3());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::shapes::icosphere;
    use approx::assert_abs_diff_eq;

    fn params(time: f64) -> DeformParams {
        DeformParams {
            time,
            strength: 0.5,
            resolution: 0.5,
        }
    }

    #[test]
    fn test_remapped_ranges() {
        let low = DeformParams {
            time: 0.0,
            strength: 0.0,
            resolution: 0.0,
        };
        let high = DeformParams {
            time: 0.0,
            strength: 1.0,
            resolution: 1.0,
        };

        assert_abs_diff_eq!(low.frequency(), 0.8, epsilon = 1e-12);
        assert_abs_diff_eq!(high.frequency(), 1.8, epsilon = 1e-12);
        assert_abs_diff_eq!(low.amplitude(), 0.12, epsilon = 1e-12);
        assert_abs_diff_eq!(high.amplitude(), 0.72, epsilon = 1e-12);
    }

    #[test]
    fn test_deformation_preserves_direction() {
        let noise = NoiseField::new(3);
        let mut soup = icosphere(2);
        let deformer = RadialDeformer::new(&soup).unwrap();
        let before: Vec<Vec3> = soup.positions().map(Vec3::normalize).collect();

        deformer.apply(&mut soup, &noise, &params(1.25)).unwrap();

        for (after, before) in soup.positions().zip(before) {
            let after = after.normalize();
            assert_abs_diff_eq!(after.dot(before), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_deformation_does_not_accumulate() {
        let noise = NoiseField::new(11);
        let mut once = icosphere(1);
        let mut repeated = once.clone();
        let deformer = RadialDeformer::new(&once).unwrap();

        deformer.apply(&mut once, &noise, &params(4.0)).unwrap();
        for _ in 0..10 {
            deformer.apply(&mut repeated, &noise, &params(4.0)).unwrap();
        }

        assert_eq!(once.vertices(), repeated.vertices());
    }

    #[test]
    fn test_rebuilt_deformer_recovers_directions() {
        let noise = NoiseField::new(5);
        let mut soup = icosphere(2);
        let original = RadialDeformer::new(&soup).unwrap();

        let strong = DeformParams {
            time: 7.5,
            strength: 1.0,
            resolution: 1.0,
        };
        original.apply(&mut soup, &noise, &strong).unwrap();
        let rebuilt = RadialDeformer::new(&soup).unwrap();

        for (a, b) in original.directions().iter().zip(rebuilt.directions()) {
            assert_abs_diff_eq!(a.dot(*b), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_radius_matches_formula() {
        let noise = NoiseField::new(21);
        let p = DeformParams {
            time: 2.0,
            strength: 0.25,
            resolution: 0.75,
        };
        let direction = Vec3::new(1.0, 2.0, -2.0).normalize();

        let res = 0.75 + 0.8;
        let expected = 1.0
            + 0.6
                * (0.25 + 0.2)
                * noise.sample4(
                    direction.x as f64 * res,
                    direction.y as f64 * res,
                    direction.z as f64 * res,
                    2.0,
                );
        assert_abs_diff_eq!(p.radius(&noise, direction), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_positions_scaled_in_double_precision() {
        let noise = NoiseField::new(8);
        let mut soup = icosphere(4);
        let deformer = RadialDeformer::new(&soup).unwrap();
        let p = DeformParams {
            time: 3.3,
            strength: 1.0,
            resolution: 1.0,
        };
        deformer.apply(&mut soup, &noise, &p).unwrap();

        for (index, &direction) in deformer.directions().iter().enumerate() {
            let radius = p.radius(&noise, direction);
            let position = soup.position(index);
            assert_eq!(position.x, (direction.x as f64 * radius) as f32);
            assert_eq!(position.y, (direction.y as f64 * radius) as f32);
            assert_eq!(position.z, (direction.z as f64 * radius) as f32);
        }
    }

    #[test]
    fn test_origin_vertex_rejected() {
        let soup = TriangleSoup::from_triangles([[Vec3::X, Vec3::ZERO, Vec3::Y]]);
        let err = RadialDeformer::new(&soup).unwrap_err();
        assert!(matches!(err, VasaroError::DegenerateDirection { index: 1 }));
    }

    #[test]
    fn test_mismatched_mesh_rejected() {
        let noise = NoiseField::new(1);
        let deformer = RadialDeformer::new(&icosphere(0)).unwrap();
        let mut other = icosphere(1);
        let before = other.clone();

        assert!(deformer.apply(&mut other, &noise, &params(0.0)).is_err());
        assert_eq!(other, before);
    }
}
