//! Camera rig configuration.

/// Fixed look-at camera with scroll zoom along Z
#[derive(Debug, Clone)]
pub struct CameraRig {
    /// Eye X/Y (world units); Z comes from the zoom
    pub eye_xy: [f32; 2],

    /// Look-at target (world units)
    pub target: [f32; 3],

    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Eye Z at zero zoom
    pub base_distance: f32,

    /// Zoom offset at startup
    pub initial_zoom: f32,

    /// Closest zoom (most negative offset)
    pub min_zoom: f32,

    /// Farthest zoom
    pub max_zoom: f32,

    /// Zoom change per mouse wheel line
    pub zoom_per_line: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            eye_xy: [0.0, 2.0],
            target: [0.0, -0.5, 0.0],
            fov_degrees: 45.0,
            base_distance: 10.0,
            initial_zoom: -4.0,
            min_zoom: -7.0,
            max_zoom: 0.0,
            zoom_per_line: 0.5,
        }
    }
}
