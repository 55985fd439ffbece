//! Fixed look-at camera with mouse-wheel zoom.

use glam::{Mat4, Vec3};

use crate::params::{CameraRig, RenderConfig};

/// Camera system: stationary eye, zoom slides it along Z
pub struct CameraSystem {
    rig: CameraRig,
    zoom: f32,
}

impl CameraSystem {
    /// Create new camera system at the rig's initial zoom
    pub fn new(rig: CameraRig) -> Self {
        let zoom = rig.initial_zoom.clamp(rig.min_zoom, rig.max_zoom);
        Self { rig, zoom }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Apply mouse wheel movement in lines (positive moves the eye away)
    pub fn apply_scroll(&mut self, lines: f32) {
        if !lines.is_finite() {
            return;
        }
        self.zoom = (self.zoom + lines * self.rig.zoom_per_line)
            .clamp(self.rig.min_zoom, self.rig.max_zoom);
    }

    /// Eye position for the current zoom
    pub fn eye(&self) -> Vec3 {
        Vec3::new(
            self.rig.eye_xy[0],
            self.rig.eye_xy[1],
            self.rig.base_distance + self.zoom,
        )
    }

    /// Create view-projection matrix for rendering
    ///
    /// # Returns
    /// Tuple of (view_proj_matrix, camera_position)
    pub fn create_view_proj_matrix(&self, render_config: &RenderConfig) -> (Mat4, Vec3) {
        let eye = self.eye();
        let target = Vec3::from_array(self.rig.target);

        let view = Mat4::look_at_rh(eye, target, Vec3::Y);
        let proj = Mat4::perspective_rh(
            self.rig.fov_degrees.to_radians(),
            render_config.aspect_ratio(),
            render_config.near_plane,
            render_config.far_plane,
        );

        (proj * view, eye)
    }
}
