//! Per-frame blob driver: clock, spin, deformation and normals.

use std::time::Instant;

use glam::{Mat4, Quat, Vec3};

use super::clock::AnimationClock;
use super::deform::{DeformParams, RadialDeformer};
use super::mesh::TriangleSoup;
use super::normals::{recompute_normals, Shading};
use crate::error::Result;
use crate::noise::NoiseField;
use crate::params::BlobControls;

/// Second coordinates of the three 2D noise tracks jittering the spin axis
const SPIN_AXIS_TRACKS: [f64; 3] = [2.0, 25.0, 30.0];

/// Owns the mesh, the noise field and the animation state
pub struct BlobSystem {
    pub soup: TriangleSoup,
    noise: NoiseField,
    deformer: RadialDeformer,
    clock: AnimationClock,
}

impl BlobSystem {
    /// Capture the base directions of `soup` and compute initial normals.
    pub fn new(mut soup: TriangleSoup, noise: NoiseField, shading: Shading) -> Result<Self> {
        let deformer = RadialDeformer::new(&soup)?;
        recompute_normals(&mut soup, shading)?;

        log::info!(
            "Blob ready: {} triangles, noise seed {}",
            soup.triangle_count(),
            noise.seed()
        );

        Ok(Self {
            soup,
            noise,
            deformer,
            clock: AnimationClock::new(),
        })
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    /// Advance one frame of `frame_s` seconds.
    ///
    /// Order: spin time and rotation, noise time and deformation, normals.
    /// Returns the model transform for this frame. Fails only if normal
    /// smoothing finds an ungrouped vertex.
    pub fn update(&mut self, frame_s: f32, controls: &BlobControls) -> Result<Mat4> {
        let started = Instant::now();

        self.clock.advance_spin(frame_s, controls.rotation_speed);
        let model = Mat4::from_quat(spin_rotation(&self.noise, self.clock.spin_time()));

        self.clock.advance_noise(frame_s, controls.noise_speed);
        let params = DeformParams {
            time: self.clock.noise_time(),
            strength: controls.strength,
            resolution: controls.details,
        };
        self.deformer.apply(&mut self.soup, &self.noise, &params)?;

        recompute_normals(&mut self.soup, controls.shading())?;

        log::trace!(
            "Blob frame: w={:.3} spin={:.3} in {:?}",
            self.clock.noise_time(),
            self.clock.spin_time(),
            started.elapsed()
        );

        Ok(model)
    }
}

/// Rotation about a noise-jittered axis by half the spin time (radians)
pub fn spin_rotation(noise: &NoiseField, spin_time: f64) -> Quat {
    let [x, y, z] = SPIN_AXIS_TRACKS.map(|track| (-1.0 + noise.sample2(spin_time, track)) as f32);
    let axis = Vec3::new(x, y, z).try_normalize().unwrap_or(Vec3::Y);
    Quat::from_axis_angle(axis, (0.5 * spin_time) as f32)
}
